//! Encoding scheme identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokCalcError;

/// Byte-pair-encoding scheme
///
/// Each variant names a vocabulary plus merge rules shipped with tiktoken.
/// The scheme itself is never built here; see
/// [`TiktokenEncoder`](crate::tokenizer::TiktokenEncoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// o200k_base (GPT-4o, GPT-4.1, GPT-5, o1, o3, o4-mini)
    O200kBase,
    /// cl100k_base (GPT-4, GPT-3.5-turbo, text-embedding-3)
    Cl100kBase,
    /// p50k_base (text-davinci-002/003, Codex)
    P50kBase,
    /// p50k_edit (edit models)
    P50kEdit,
    /// r50k_base (GPT-3 base models)
    R50kBase,
    /// gpt2 (same vocabulary as r50k_base)
    Gpt2,
}

impl Encoding {
    /// Every scheme, newest first
    pub const ALL: [Encoding; 6] = [
        Encoding::O200kBase,
        Encoding::Cl100kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
        Encoding::Gpt2,
    ];

    /// Get encoding name as string
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::O200kBase => "o200k_base",
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
            Encoding::Gpt2 => "gpt2",
        }
    }

    /// Special-token literals recognised by this scheme
    ///
    /// Text containing any of these is refused under
    /// [`SpecialTokens::Reject`](crate::tokenizer::SpecialTokens::Reject).
    pub fn special_tokens(&self) -> &'static [&'static str] {
        match self {
            Encoding::O200kBase => &["<|endoftext|>", "<|endofprompt|>"],
            Encoding::Cl100kBase => &[
                "<|endoftext|>",
                "<|fim_prefix|>",
                "<|fim_middle|>",
                "<|fim_suffix|>",
                "<|endofprompt|>",
            ],
            Encoding::P50kEdit => &[
                "<|endoftext|>",
                "<|fim_prefix|>",
                "<|fim_middle|>",
                "<|fim_suffix|>",
            ],
            Encoding::P50kBase | Encoding::R50kBase | Encoding::Gpt2 => &["<|endoftext|>"],
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = TokCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Encoding::ALL
            .into_iter()
            .find(|e| e.name() == wanted)
            .ok_or_else(|| TokCalcError::UnknownEncoding(s.to_string()))
    }
}
