//! BPE encoder backed by tiktoken-rs.
//!
//! Uses lazy-loaded, process-wide `CoreBPE` instances. Once loaded they are
//! only read, so concurrent callers share them without locking.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base, CoreBPE};

use crate::encoding::Encoding;
use crate::error::{Result, TokCalcError};

// Lazy-loaded tokenizer instances (thread-safe singletons)
static O200K: OnceLock<std::result::Result<CoreBPE, String>> = OnceLock::new();
static CL100K: OnceLock<std::result::Result<CoreBPE, String>> = OnceLock::new();
static P50K: OnceLock<std::result::Result<CoreBPE, String>> = OnceLock::new();
static P50K_EDIT: OnceLock<std::result::Result<CoreBPE, String>> = OnceLock::new();
static R50K: OnceLock<std::result::Result<CoreBPE, String>> = OnceLock::new();

/// Get the tokenizer for an encoding (lazy-loaded)
///
/// `gpt2` shares the `r50k_base` vocabulary.
fn bpe(encoding: Encoding) -> Result<&'static CoreBPE> {
    let cell = match encoding {
        Encoding::O200kBase => &O200K,
        Encoding::Cl100kBase => &CL100K,
        Encoding::P50kBase => &P50K,
        Encoding::P50kEdit => &P50K_EDIT,
        Encoding::R50kBase | Encoding::Gpt2 => &R50K,
    };

    cell.get_or_init(|| {
        tracing::debug!(encoding = encoding.name(), "loading tokenizer");
        let loaded = match encoding {
            Encoding::O200kBase => o200k_base(),
            Encoding::Cl100kBase => cl100k_base(),
            Encoding::P50kBase => p50k_base(),
            Encoding::P50kEdit => p50k_edit(),
            Encoding::R50kBase | Encoding::Gpt2 => r50k_base(),
        };
        loaded.map_err(|e| e.to_string())
    })
    .as_ref()
    .map_err(|e| TokCalcError::EncodingFailure(format!("failed to load {encoding}: {e}")))
}

/// Encodes text into token IDs under a named scheme
///
/// Implementations must be deterministic and total over arbitrary Unicode
/// input: the same text and encoding always yield the same sequence.
pub trait Encoder: Send + Sync {
    /// Encode `text` into token IDs
    fn encode(&self, text: &str, encoding: Encoding) -> Result<Vec<u32>>;

    /// Number of tokens `text` encodes to
    fn count(&self, text: &str, encoding: Encoding) -> Result<usize> {
        self.encode(text, encoding).map(|tokens| tokens.len())
    }
}

/// How special-token literals such as `<|endoftext|>` in the input are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialTokens {
    /// Refuse the text with an encoding failure
    #[default]
    Reject,
    /// Encode the literal as ordinary text
    Ordinary,
    /// Encode the literal as its reserved special-token ID
    Allow,
}

impl SpecialTokens {
    /// Policy name as used in config files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            SpecialTokens::Reject => "reject",
            SpecialTokens::Ordinary => "ordinary",
            SpecialTokens::Allow => "allow",
        }
    }
}

impl fmt::Display for SpecialTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SpecialTokens {
    type Err = TokCalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(SpecialTokens::Reject),
            "ordinary" | "text" => Ok(SpecialTokens::Ordinary),
            "allow" | "special" => Ok(SpecialTokens::Allow),
            other => Err(TokCalcError::Config(format!(
                "unknown special-token policy '{other}' (use reject, ordinary, allow)"
            ))),
        }
    }
}

/// [`Encoder`] using the tiktoken vocabularies
///
/// # Example
/// ```
/// use tokcalc::encoding::Encoding;
/// use tokcalc::tokenizer::{Encoder, TiktokenEncoder};
///
/// let encoder = TiktokenEncoder::new();
/// let tokens = encoder.encode("Hello, world!", Encoding::Cl100kBase).unwrap();
/// assert_eq!(tokens, vec![9906, 11, 1917, 0]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TiktokenEncoder {
    special: SpecialTokens,
}

impl TiktokenEncoder {
    /// Create an encoder that rejects special-token literals
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the special-token policy
    pub fn with_special_tokens(mut self, special: SpecialTokens) -> Self {
        self.special = special;
        self
    }

    /// Get the special-token policy
    pub fn special_tokens(&self) -> SpecialTokens {
        self.special
    }
}

impl Encoder for TiktokenEncoder {
    fn encode(&self, text: &str, encoding: Encoding) -> Result<Vec<u32>> {
        let bpe = bpe(encoding)?;

        let tokens = match self.special {
            SpecialTokens::Reject => {
                if let Some(literal) = encoding
                    .special_tokens()
                    .iter()
                    .find(|literal| text.contains(**literal))
                {
                    return Err(TokCalcError::EncodingFailure(format!(
                        "text contains special token {literal} which {encoding} does not allow as text"
                    )));
                }
                bpe.encode_ordinary(text)
            },
            SpecialTokens::Ordinary => bpe.encode_ordinary(text),
            SpecialTokens::Allow => bpe.encode_with_special_tokens(text),
        };

        tracing::trace!(encoding = encoding.name(), tokens = tokens.len(), "encoded");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "Hello, world!";

    #[test]
    fn test_hello_world_cl100k() {
        let tokens = TiktokenEncoder::new()
            .encode(HELLO, Encoding::Cl100kBase)
            .unwrap();
        assert_eq!(tokens, vec![9906, 11, 1917, 0]);
    }

    #[test]
    fn test_gpt2_shares_r50k_vocabulary() {
        let encoder = TiktokenEncoder::new();
        let r50k = encoder.encode(HELLO, Encoding::R50kBase).unwrap();
        let gpt2 = encoder.encode(HELLO, Encoding::Gpt2).unwrap();
        assert_eq!(r50k, vec![15496, 11, 995, 0]);
        assert_eq!(r50k, gpt2);
    }

    #[test]
    fn test_empty_text_every_encoding() {
        let encoder = TiktokenEncoder::new();
        for encoding in Encoding::ALL {
            assert!(encoder.encode("", encoding).unwrap().is_empty());
            assert_eq!(encoder.count("", encoding).unwrap(), 0);
        }
    }

    #[test]
    fn test_reject_special_token_literal() {
        let err = TiktokenEncoder::new()
            .encode("before <|endoftext|> after", Encoding::Cl100kBase)
            .unwrap_err();
        assert!(matches!(err, TokCalcError::EncodingFailure(_)));
        assert!(err.to_string().contains("<|endoftext|>"));
    }

    #[test]
    fn test_ordinary_encodes_literal_as_text() {
        let encoder = TiktokenEncoder::new().with_special_tokens(SpecialTokens::Ordinary);
        let tokens = encoder.encode("<|endoftext|>", Encoding::Cl100kBase).unwrap();
        assert!(tokens.len() > 1);
        assert!(!tokens.contains(&100257));
    }

    #[test]
    fn test_allow_encodes_reserved_id() {
        let encoder = TiktokenEncoder::new().with_special_tokens(SpecialTokens::Allow);
        let tokens = encoder.encode("<|endoftext|>", Encoding::Cl100kBase).unwrap();
        assert_eq!(tokens, vec![100257]);
    }

    #[test]
    fn test_literal_unknown_to_scheme_is_plain_text() {
        // <|endofprompt|> is not special under r50k_base
        let tokens = TiktokenEncoder::new()
            .encode("<|endofprompt|>", Encoding::R50kBase)
            .unwrap();
        assert!(!tokens.is_empty());
    }

    #[test]
    fn test_arbitrary_unicode_never_fails() {
        let encoder = TiktokenEncoder::new();
        let text = "日本語 🦀 Ünïcödé \u{0} \u{10FFFF} עברית";
        for encoding in Encoding::ALL {
            assert!(!encoder.encode(text, encoding).unwrap().is_empty());
        }
    }

    #[test]
    fn test_special_tokens_policy_parsing() {
        assert_eq!("reject".parse::<SpecialTokens>().unwrap(), SpecialTokens::Reject);
        assert_eq!("Ordinary".parse::<SpecialTokens>().unwrap(), SpecialTokens::Ordinary);
        assert_eq!("allow".parse::<SpecialTokens>().unwrap(), SpecialTokens::Allow);
        assert!("sometimes".parse::<SpecialTokens>().is_err());
    }
}
