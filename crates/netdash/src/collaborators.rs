//! Terminal implementations of the session's side-effect traits.

use std::io::{self, Write};
use std::path::PathBuf;

use owo_colors::OwoColorize;
use tracing::info;

use netdash_core::{Clipboard, CoreError, Downloader, ExportDocument, UnauthorizedNotifier};

use crate::cli::GlobalOpts;
use crate::output;

/// Prints the unauthorized-action warning to stderr.
pub struct StderrNotifier {
    color: bool,
}

impl StderrNotifier {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            color: output::should_color(&global.color),
        }
    }
}

impl UnauthorizedNotifier for StderrNotifier {
    fn notify(&self) {
        let message = "⚠️ You are not authorized to perform this action.";
        if self.color {
            eprintln!("{}", message.yellow().bold());
        } else {
            eprintln!("{message}");
        }
    }
}

/// "Copies" by writing the text to stdout, ready for `| pbcopy` or `| xclip`.
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: &str) -> Result<(), CoreError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")
            .and_then(|()| stdout.flush())
            .map_err(|e| CoreError::Clipboard {
                message: e.to_string(),
            })
    }
}

/// Writes export documents into a directory.
pub struct FileDownloader {
    directory: PathBuf,
    quiet: bool,
}

impl FileDownloader {
    pub fn new(directory: PathBuf, quiet: bool) -> Self {
        Self { directory, quiet }
    }
}

impl Downloader for FileDownloader {
    fn save(&self, document: &ExportDocument) -> Result<(), CoreError> {
        let file_name = std::path::Path::new(&document.filename)
            .file_name()
            .ok_or_else(|| CoreError::Download {
                message: format!("invalid file name: {:?}", document.filename),
            })?;
        let path = self.directory.join(file_name);

        std::fs::write(&path, &document.bytes).map_err(|e| CoreError::Download {
            message: format!("{}: {e}", path.display()),
        })?;

        info!(path = %path.display(), mime = document.mime_type, "export written");
        output::notice(&format!("Saved {}", path.display()), self.quiet);
        Ok(())
    }
}
