//! Interactive shell: one session, many commands.
//!
//! Each line is parsed with the regular command tree, so everything the
//! one-shot CLI can do works here too, but history, outputs, alerts and
//! selections survive between lines.

use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use netdash_core::Session;

use crate::cli::{Command, GlobalOpts, ShellLine};
use crate::error::CliError;
use crate::output;

use super::{auth, dispatch};

/// Split a line into words, honoring single and double quotes.
pub fn split_words(line: &str) -> Result<Vec<String>, CliError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(CliError::Validation {
            field: "input".into(),
            reason: format!("unterminated {q} quote"),
        });
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

async fn prompt(session: &Session) {
    let target = session
        .selected_device()
        .await
        .map(|d| format!("[{}]", d.id))
        .unwrap_or_default();
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "netdash{target}> ");
    let _ = stdout.flush();
}

fn report(err: CliError) {
    eprintln!("{:?}", miette::Report::new(err));
}

pub async fn run(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    if !global.quiet {
        auth::handle(session, global);
        eprintln!("Type 'help' for commands, 'exit' to leave.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(session).await;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            _ => {}
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                report(e);
                continue;
            }
        };

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                let _ = e.print();
                continue;
            }
        };

        debug!(command = ?parsed.command, "shell command");
        match parsed.command {
            Command::Shell | Command::Config(_) | Command::Completions(_) => {
                eprintln!("That command is not available inside the shell");
            }
            cmd => {
                if let Err(e) = dispatch(cmd, session, global).await {
                    report(e);
                }
            }
        }
    }

    session.shutdown();
    output::notice("Bye", global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            split_words("  send   show version ").unwrap(),
            vec!["send", "show", "version"]
        );
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(
            split_words(r#"send "show vlan brief" -d 'ap 1'"#).unwrap(),
            vec!["send", "show vlan brief", "-d", "ap 1"]
        );
    }

    #[test]
    fn empty_quotes_make_an_empty_word() {
        assert_eq!(split_words(r#"assistant ask """#).unwrap(), vec!["assistant", "ask", ""]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(split_words("send \"show").is_err());
    }

    #[test]
    fn shell_line_parses_regular_commands() {
        let parsed = ShellLine::try_parse_from(["alerts", "list", "--status", "active"]).unwrap();
        assert!(matches!(parsed.command, Command::Alerts(_)));
    }
}
