//! Resolves the job description and resume from inline text or files

use crate::error::{RecruiterBotError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::path::{Path, PathBuf};

/// Where one of the two texts comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Inline(String),
    File(PathBuf),
}

impl TextSource {
    /// Inline text wins over a file. With neither, the text is empty and the
    /// session reports an input error.
    pub fn from_args(inline: Option<String>, file: Option<PathBuf>) -> Self {
        match (inline, file) {
            (Some(text), _) => TextSource::Inline(text),
            (None, Some(path)) => TextSource::File(path),
            (None, None) => TextSource::Inline(String::new()),
        }
    }
}

#[derive(Debug, Default)]
pub struct InputLoader;

impl InputLoader {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, source: &TextSource) -> Result<String> {
        match source {
            TextSource::Inline(text) => Ok(text.clone()),
            TextSource::File(path) => self.extract_text(path).await,
        }
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(RecruiterBotError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File does not exist: {}", path.display()),
            )));
        }

        match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await
            }
            FileType::Unknown => Err(RecruiterBotError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
        }
    }
}
