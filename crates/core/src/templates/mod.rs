pub mod engine;
pub mod parser;
pub mod source;

pub use engine::{FilledDocument, Values, fill, substitute};
pub use parser::extract_variables;
pub use source::{SourceError, read_template_file};
