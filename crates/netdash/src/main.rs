mod cli;
mod collaborators;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, FromArgMatches};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli, &matches).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, matches: &clap::ArgMatches) -> Result<(), CliError> {
    let mut global = cli.global;

    match cli.command {
        // Config commands don't need a session
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "netdash", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs against a freshly started session
        cmd => {
            let cfg = config::load_config()?;
            config::apply_file_defaults(&mut global, matches, &cfg);
            let session = config::start_session(&global, &cfg).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            let result = match cmd {
                Command::Shell => commands::shell::run(&session, &global).await,
                cmd => commands::dispatch(cmd, &session, &global).await,
            };
            session.shutdown();
            result
        }
    }
}
