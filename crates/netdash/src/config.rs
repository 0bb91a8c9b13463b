//! CLI configuration: thin wrapper around `netdash_config`.
//!
//! Re-exports the shared types and adds the CLI-specific pieces: file
//! defaults for flags left unset, resolver selection honoring
//! `--caller-ip`, and session start-up.

use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;
use clap::ValueEnum;
use clap::parser::ValueSource;
use tracing::debug;

use netdash_api::{IpEchoClient, TransportConfig};
use netdash_core::{
    CallerResolver, Catalog, Collaborators, FixedCaller, Session, TokioScheduler,
};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::collaborators::{FileDownloader, StderrNotifier, StdoutClipboard};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use netdash_config::{
    Config, config_path, load_config, save_config, store_password,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Fill flags the user left at their built-in default from `[defaults]`.
///
/// Command-line flags and `NETDASH_*` variables bound to a flag win over
/// the file.
pub fn apply_file_defaults(global: &mut GlobalOpts, matches: &ArgMatches, cfg: &Config) {
    let unset = |id: &str| matches.value_source(id) == Some(ValueSource::DefaultValue);

    if unset("output") {
        if let Ok(format) = OutputFormat::from_str(&cfg.defaults.output, true) {
            global.output = format;
        }
    }
    if unset("color") {
        if let Ok(mode) = ColorMode::from_str(&cfg.defaults.color, true) {
            global.color = mode;
        }
    }
    if unset("timeout") {
        global.timeout = cfg.defaults.timeout;
    }
}

/// Pick the caller resolver: a pinned `--caller-ip`, else the echo service.
pub fn build_resolver(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<Box<dyn CallerResolver>, CliError> {
    if let Some(ref ip) = global.caller_ip {
        debug!(caller = %ip, "using pinned caller address");
        return Ok(Box::new(FixedCaller(ip.clone())));
    }

    let url = cfg.resolver_url()?;
    let transport = TransportConfig::default().with_timeout(Duration::from_secs(global.timeout));
    let client = IpEchoClient::new(url, &transport).map_err(|e| CliError::Resolution {
        message: e.to_string(),
    })?;
    Ok(Box::new(client))
}

/// Resolve the caller and start a session wired to the CLI collaborators.
pub async fn start_session(global: &GlobalOpts, cfg: &Config) -> Result<Session, CliError> {
    let session_config = cfg.to_session_config()?;
    let resolver = build_resolver(global, cfg)?;

    let collaborators = Collaborators {
        notifier: Arc::new(StderrNotifier::new(global)),
        clipboard: Arc::new(StdoutClipboard),
        downloader: Arc::new(FileDownloader::new(cfg.export_dir(), global.quiet)),
        scheduler: Arc::new(TokioScheduler),
    };

    Ok(Session::start(
        session_config,
        Arc::new(Catalog::builtin()),
        collaborators,
        resolver.as_ref(),
    )
    .await)
}
