//! Token count report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding::Encoding;

/// Default number of leading token IDs kept in a report
pub const DEFAULT_PREVIEW_TOKENS: usize = 50;

/// Result of counting a document's tokens under a model's encoding
///
/// Built by [`TokenCounter::report`](crate::tokenizer::TokenCounter::report).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReport {
    /// Model identifier as supplied
    pub model: String,
    /// Encoding the model resolved to
    pub encoding: Encoding,
    /// Total number of tokens
    pub token_count: usize,
    /// Whitespace-separated words
    pub word_count: usize,
    /// Unicode scalar values
    pub char_count: usize,
    /// Leading token IDs
    pub tokens: Vec<u32>,
    /// Whether `tokens` holds fewer IDs than `token_count`
    pub truncated: bool,
}

impl TokenReport {
    /// Average characters per token, or `None` for an empty document
    pub fn chars_per_token(&self) -> Option<f64> {
        if self.token_count == 0 {
            None
        } else {
            Some(self.char_count as f64 / self.token_count as f64)
        }
    }
}

impl fmt::Display for TokenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model:      {}", self.model)?;
        writeln!(f, "Encoding:   {}", self.encoding)?;
        writeln!(f, "Words:      {}", self.word_count)?;
        writeln!(f, "Characters: {}", self.char_count)?;
        write!(f, "Tokens:     {}", self.token_count)?;

        if let Some(ratio) = self.chars_per_token() {
            write!(f, " ({ratio:.2} chars/token)")?;
        }

        if !self.tokens.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            if self.truncated {
                writeln!(f, "First {} of {} token(s):", self.tokens.len(), self.token_count)?;
            } else {
                writeln!(f, "Token(s):")?;
            }
            let ids: Vec<String> = self.tokens.iter().map(|t| t.to_string()).collect();
            write!(f, "  [{}]", ids.join(", "))?;
        }

        Ok(())
    }
}
