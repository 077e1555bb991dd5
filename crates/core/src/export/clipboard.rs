use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard integration is not supported here (on Linux an X11 or Wayland session is required)")]
    Unsupported,

    #[error("could not access the clipboard: {0}")]
    Failed(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(e: arboard::Error) -> Self {
        match e {
            arboard::Error::ClipboardNotSupported => ClipboardError::Unsupported,
            other => ClipboardError::Failed(other.to_string()),
        }
    }
}

/// Whether the copied text is served by this process and goes away with it.
///
/// On X11 the selection owner answers paste requests, so without a clipboard
/// manager nothing is left once the program exits.
pub const SELECTION_ENDS_WITH_PROCESS: bool =
    cfg!(all(unix, not(any(target_os = "macos", target_os = "ios", target_os = "android"))));

/// A clipboard that cannot be reached at all means no integration here,
/// e.g. no X11 or Wayland display on Linux.
fn connect_error(e: arboard::Error) -> ClipboardError {
    debug!(error = %e, "no clipboard connection");
    ClipboardError::Unsupported
}

/// Put `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    let mut clipboard = arboard::Clipboard::new().map_err(connect_error)?;
    clipboard.set_text(text.to_owned())?;
    debug!(bytes = text.len(), "copied to clipboard");
    Ok(())
}
