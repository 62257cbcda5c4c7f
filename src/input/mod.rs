//! Input loading module
//! Turns inline text or document files into the two texts the analysis needs

pub mod file_detector;
pub mod text_extractor;
pub mod loader;

pub use loader::{InputLoader, TextSource};
