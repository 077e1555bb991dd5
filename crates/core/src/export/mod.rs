pub mod clipboard;
pub mod pdf;

pub use clipboard::{ClipboardError, SELECTION_ENDS_WITH_PROCESS, copy_to_clipboard};
pub use pdf::{PdfError, PdfSettings, write_pdf};
