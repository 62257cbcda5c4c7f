//! Output module: terminal/JSON rendering and the plain-text export

pub mod formatter;
pub mod report;

pub use formatter::{formatter_for, ConsoleFormatter, JsonFormatter, OutputFormatter};
pub use report::{export_record, render_plain_text};
