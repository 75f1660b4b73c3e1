//! Plain-text document loading.
//!
//! Only formats that already are text are read. PDF and Word files are
//! refused with [`TokCalcError::UnsupportedDocument`]; extract their text
//! with a dedicated tool and pass the result on stdin instead.

use std::path::{Path, PathBuf};

use crate::error::{Result, TokCalcError};

/// Extensions that need text extraction this crate does not perform
pub const BINARY_EXTENSIONS: &[&str] = &["pdf", "docx", "doc"];

/// Default number of characters shown in a document preview
pub const DEFAULT_PREVIEW_CHARS: usize = 5000;

/// Text to be tokenized, with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    source: Option<PathBuf>,
    text: String,
}

impl Document {
    /// Wrap text that did not come from a file (inline argument, request
    /// body)
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            source: None,
            text: text.into(),
        }
    }

    /// Decode raw bytes (a file body or piped stdin) into a document
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD rather than
    /// rejected, so any byte content can be counted.
    pub fn from_bytes(bytes: Vec<u8>, source: Option<PathBuf>) -> Self {
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                let origin = source
                    .as_deref()
                    .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
                tracing::warn!(source = %origin, "document is not valid UTF-8, replacing invalid bytes");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            },
        };

        Self { source, text }
    }

    /// Load a text document from disk
    ///
    /// Decoding follows [`Document::from_bytes`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        if let Some(ext) = extension {
            if BINARY_EXTENSIONS.contains(&ext.as_str()) {
                return Err(TokCalcError::UnsupportedDocument {
                    path: path.to_path_buf(),
                    extension: ext,
                });
            }
        }

        let bytes = std::fs::read(path)?;
        let document = Self::from_bytes(bytes, Some(path.to_path_buf()));
        tracing::debug!(path = %path.display(), bytes = document.text.len(), "loaded document");

        Ok(document)
    }

    /// Path the document was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    /// Number of Unicode scalar values
    pub fn char_count(&self) -> usize {
        char_count(&self.text)
    }

    /// The first `max_chars` characters of the document
    pub fn preview(&self, max_chars: usize) -> &str {
        preview(&self.text, max_chars)
    }

    /// Whether the preview cuts the document short
    pub fn is_truncated_at(&self, max_chars: usize) -> bool {
        self.preview(max_chars).len() < self.text.len()
    }
}

/// Number of whitespace-separated words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of Unicode scalar values in `text`
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// The first `max_chars` characters of `text`, never splitting a character
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
