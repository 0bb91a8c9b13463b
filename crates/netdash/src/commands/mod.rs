//! Command dispatch: bridges CLI args -> session actions -> output formatting.

pub mod alerts;
pub mod assistant;
pub mod auth;
pub mod compose;
pub mod config_cmd;
pub mod devices;
pub mod export;
pub mod outputs;
pub mod shell;
pub mod util;
pub mod vlans;

use netdash_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(session, args, global).await,
        Command::Vlans(args) => vlans::handle(session, args, global).await,
        Command::Templates => {
            compose::templates(session, global);
            Ok(())
        }
        Command::History => {
            compose::history(session, global).await;
            Ok(())
        }
        Command::Send(args) => compose::send(session, args, global).await,
        Command::Outputs(args) => outputs::handle(session, args, global).await,
        Command::Alerts(args) => alerts::handle(session, args, global).await,
        Command::Assistant(args) => assistant::handle(session, args, global).await,
        Command::Export(args) => export::handle(session, args, global).await,
        Command::Auth => {
            auth::handle(session, global);
            Ok(())
        }
        // Shell, Config and Completions are routed by main
        Command::Shell | Command::Config(_) | Command::Completions(_) => {
            Err(CliError::Validation {
                field: "command".into(),
                reason: "not available here".into(),
            })
        }
    }
}
