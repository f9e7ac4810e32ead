//! Editor abstraction for composing entry content.
//!
//! Entry text can be written in an external editor: the current text is placed in
//! a temporary Markdown file, the editor is run on it, and the saved file is read
//! back. The `Editor` trait keeps this testable without spawning processes.

use crate::errors::{AppResult, EditorError};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Trait defining the interface for an editor component.
///
/// # Examples
///
/// ```
/// use reverie::editor::{compose, Editor};
/// use reverie::errors::AppResult;
/// use std::path::Path;
///
/// struct Appender;
///
/// impl Editor for Appender {
///     fn edit(&self, path: &Path) -> AppResult<()> {
///         let mut text = std::fs::read_to_string(path)?;
///         text.push_str(" and more");
///         std::fs::write(path, text)?;
///         Ok(())
///     }
/// }
///
/// let text = compose(&Appender, "a start").unwrap();
/// assert_eq!(text, "a start and more");
/// ```
pub trait Editor {
    /// Lets the user edit the file at `path` in place.
    ///
    /// # Errors
    ///
    /// Different implementations may return different errors when editing fails.
    fn edit(&self, path: &Path) -> AppResult<()>;
}

/// An implementation of the Editor trait that launches an external editor command.
pub struct SystemEditor {
    /// The command to use for opening files (e.g., "vim", "code", "nano").
    pub editor_cmd: String,
}

impl Editor for SystemEditor {
    /// Runs the configured editor on `path` and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Editor` if the command is missing, not executable,
    /// fails to start, or exits with a non-zero status.
    fn edit(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor: {} {:?}", self.editor_cmd, path);

        let status = Command::new(&self.editor_cmd).arg(path).status();

        match status {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(EditorError::CommandNotFound {
                command: self.editor_cmd.clone(),
                source: e,
            }
            .into()),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(EditorError::PermissionDenied {
                    command: self.editor_cmd.clone(),
                    source: e,
                }
                .into())
            }
            Err(e) => Err(EditorError::ExecutionFailed {
                command: self.editor_cmd.clone(),
                source: e,
            }
            .into()),
            Ok(status) if !status.success() => Err(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into()),
            Ok(_) => Ok(()),
        }
    }
}

/// Opens `initial` in `editor` and returns the text as saved.
///
/// The scratch file is removed when this function returns.
///
/// # Errors
///
/// Returns an error if the scratch file cannot be written or read, or if the
/// editor fails.
pub fn compose(editor: &dyn Editor, initial: &str) -> AppResult<String> {
    let mut scratch = tempfile::Builder::new()
        .prefix("reverie-")
        .suffix(".md")
        .tempfile()?;
    scratch.write_all(initial.as_bytes())?;
    scratch.flush()?;

    editor.edit(scratch.path())?;

    let text = fs::read_to_string(scratch.path())?;
    debug!("Composed {} bytes of entry text", text.len());
    Ok(text)
}
