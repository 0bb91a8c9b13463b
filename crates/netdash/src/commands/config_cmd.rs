//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display, masking the plaintext password.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let _ = writeln!(out);
    let _ = writeln!(out, "[authorization]");
    let entries: Vec<String> = cfg
        .authorization
        .allow_list
        .iter()
        .map(|e| format!("\"{e}\""))
        .collect();
    let _ = writeln!(out, "allow_list = [{}]", entries.join(", "));
    let _ = writeln!(out, "resolver_url = \"{}\"", cfg.authorization.resolver_url);

    let creds = &cfg.credentials;
    if creds.username.is_some() || creds.password.is_some() || creds.password_env.is_some() {
        let _ = writeln!(out);
        let _ = writeln!(out, "[credentials]");
        if let Some(ref u) = creds.username {
            let _ = writeln!(out, "username = \"{u}\"");
        }
        if creds.password.is_some() {
            let _ = writeln!(out, "password = \"****\"");
        }
        if let Some(ref env) = creds.password_env {
            let _ = writeln!(out, "password_env = \"{env}\"");
        }
    }

    let s = &cfg.session;
    let _ = writeln!(out);
    let _ = writeln!(out, "[session]");
    let _ = writeln!(out, "history_limit = {}", s.history_limit);
    let _ = writeln!(out, "seed_sample_data = {}", s.seed_sample_data);
    let _ = writeln!(out, "scan_step = {}", s.scan_step);
    let _ = writeln!(out, "scan_tick_ms = {}", s.scan_tick_ms);
    let _ = writeln!(out, "assistant_delay_ms = {}", s.assistant_delay_ms);

    let _ = writeln!(out);
    let _ = writeln!(out, "[export]");
    if let Some(ref dir) = cfg.export.directory {
        let _ = writeln!(out, "directory = \"{}\"", dir.display());
    }
    let _ = writeln!(out, "file_prefix = \"{}\"", cfg.export.file_prefix);

    out
}

/// Prompt for a non-empty password.
fn prompt_password() -> Result<String, CliError> {
    let pass = Password::new()
        .with_prompt("Device password")
        .interact()
        .map_err(CliError::prompt)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(pass)
}

/// Offer to store the password in the system keyring or return it for
/// plaintext config.
///
/// Returns `Some(secret)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_password_storage(username: &str, secret: String) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(CliError::prompt)?;

    if selection == 0 {
        config::store_password(username, &secret)?;
        eprintln!("   ✓ Password stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret))
    }
}

/// Split a comma-separated allow-list answer, validating every entry.
fn parse_allow_list(raw: &str) -> Result<Vec<String>, CliError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<netdash_core::AllowEntry>()
                .map(|parsed| parsed.to_string())
                .map_err(|e| CliError::Validation {
                    field: "allow_list".into(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("✨ netdash configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let mut cfg = config::load_config().unwrap_or_default();

    // 1. Allow-list
    let allow_raw: String = Input::new()
        .with_prompt("Allowed caller addresses (comma-separated IPs or CIDR blocks)")
        .allow_empty(true)
        .with_initial_text(cfg.authorization.allow_list.join(", "))
        .interact_text()
        .map_err(CliError::prompt)?;
    cfg.authorization.allow_list = parse_allow_list(&allow_raw)?;
    if cfg.authorization.allow_list.is_empty() {
        eprintln!("   ! Empty allow-list: every mutating command will be refused");
    }

    // 2. Echo service
    cfg.authorization.resolver_url = Input::new()
        .with_prompt("Caller address echo service")
        .default(cfg.authorization.resolver_url.clone())
        .interact_text()
        .map_err(CliError::prompt)?;
    cfg.resolver_url()?;

    // 3. Device credentials
    let username: String = Input::new()
        .with_prompt("Device username (leave empty to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(CliError::prompt)?;
    if username.is_empty() {
        cfg.credentials.username = None;
        cfg.credentials.password = None;
    } else {
        let secret = prompt_password()?;
        cfg.credentials.password = prompt_password_storage(&username, secret)?;
        cfg.credentials.username = Some(username);
    }

    // 4. Export directory
    let dir: String = Input::new()
        .with_prompt("Export directory")
        .default(cfg.export_dir().display().to_string())
        .interact_text()
        .map_err(CliError::prompt)?;
    cfg.export.directory = Some(dir.into());

    let written = config::save_config(&cfg)?;
    output::notice(
        &format!("\n✓ Configuration saved to {}", written.display()),
        global.quiet,
    );
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword { username } => {
            let mut cfg = config::load_config()?;
            let username = username
                .or_else(|| cfg.credentials.username.clone())
                .ok_or_else(|| CliError::Validation {
                    field: "username".into(),
                    reason: "no username configured; pass --username".into(),
                })?;

            let secret = prompt_password()?;
            config::store_password(&username, &secret)?;

            // A keyring entry supersedes any plaintext copy.
            if cfg.credentials.password.take().is_some()
                || cfg.credentials.username.as_deref() != Some(username.as_str())
            {
                cfg.credentials.username = Some(username.clone());
                config::save_config(&cfg)?;
            }
            output::notice(
                &format!("✓ Password for '{username}' stored in system keyring"),
                global.quiet,
            );
            Ok(())
        }
    }
}
