//! Token counting implementation.
//!
//! Chains the two collaborators: resolve the model to an encoding, encode
//! the text, measure the sequence.

use serde::Serialize;

use crate::document::{char_count, word_count};
use crate::encoding::{Encoding, EncodingResolver, ModelTable};
use crate::error::Result;
use crate::report::TokenReport;
use crate::tokenizer::encoder::{Encoder, TiktokenEncoder};

/// Token sequence together with its length
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    /// Number of tokens
    pub count: usize,
    /// Token IDs in order
    pub tokens: Vec<u32>,
}

impl TokenCount {
    fn from_tokens(tokens: Vec<u32>) -> Self {
        Self {
            count: tokens.len(),
            tokens,
        }
    }

    /// The first `n` token IDs (fewer if the sequence is shorter)
    pub fn prefix(&self, n: usize) -> &[u32] {
        &self.tokens[..n.min(self.tokens.len())]
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Token counter over an injected resolver and encoder
///
/// # Example
/// ```
/// use tokcalc::tokenizer::TokenCounter;
///
/// let counter = TokenCounter::default();
///
/// let encoding = counter.resolve_encoding("gpt-4").unwrap();
/// let result = counter.encode_and_count("Hello, world!", encoding).unwrap();
/// assert_eq!(result.count, 4);
/// assert_eq!(result.tokens, vec![9906, 11, 1917, 0]);
///
/// assert!(counter.resolve_encoding("not-a-real-model-xyz").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct TokenCounter<R = ModelTable, E = TiktokenEncoder> {
    resolver: R,
    encoder: E,
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new(ModelTable::new(), TiktokenEncoder::new())
    }
}

impl<R: EncodingResolver, E: Encoder> TokenCounter<R, E> {
    /// Create a counter from a resolver and an encoder
    pub fn new(resolver: R, encoder: E) -> Self {
        Self { resolver, encoder }
    }

    /// Get the resolver
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Get the encoder
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Resolve a model identifier to its encoding scheme
    pub fn resolve_encoding(&self, model: &str) -> Result<Encoding> {
        let encoding = self.resolver.resolve(model)?;
        tracing::debug!(model, encoding = encoding.name(), "resolved encoding");
        Ok(encoding)
    }

    /// Encode text into token IDs
    pub fn encode(&self, text: &str, encoding: Encoding) -> Result<Vec<u32>> {
        self.encoder.encode(text, encoding)
    }

    /// Count tokens in text
    pub fn count(&self, text: &str, encoding: Encoding) -> Result<usize> {
        self.encoder.count(text, encoding)
    }

    /// Encode text and report both the count and the sequence
    pub fn encode_and_count(&self, text: &str, encoding: Encoding) -> Result<TokenCount> {
        self.encode(text, encoding).map(TokenCount::from_tokens)
    }

    /// Count tokens in multiple texts
    pub fn count_many(&self, texts: &[&str], encoding: Encoding) -> Result<usize> {
        texts.iter().map(|t| self.count(t, encoding)).sum()
    }

    /// Resolve the model and count tokens in one step
    pub fn count_for_model(&self, text: &str, model: &str) -> Result<usize> {
        let encoding = self.resolve_encoding(model)?;
        self.count(text, encoding)
    }

    /// Build a full report for `text` under `model`, keeping the first
    /// `preview_tokens` token IDs
    pub fn report(&self, model: &str, text: &str, preview_tokens: usize) -> Result<TokenReport> {
        let encoding = self.resolve_encoding(model)?;
        let result = self.encode_and_count(text, encoding)?;

        tracing::debug!(
            model,
            encoding = encoding.name(),
            tokens = result.count,
            "counted tokens"
        );

        Ok(TokenReport {
            model: model.to_string(),
            encoding,
            token_count: result.count,
            word_count: word_count(text),
            char_count: char_count(text),
            tokens: result.prefix(preview_tokens).to_vec(),
            truncated: result.count > preview_tokens,
        })
    }
}

/// Count tokens with a specific encoding using the tiktoken encoder
///
/// # Example
/// ```
/// use tokcalc::encoding::Encoding;
/// use tokcalc::tokenizer::count_tokens;
///
/// assert_eq!(count_tokens("Hello, world!", Encoding::Cl100kBase).unwrap(), 4);
/// assert_eq!(count_tokens("", Encoding::O200kBase).unwrap(), 0);
/// ```
pub fn count_tokens(text: &str, encoding: Encoding) -> Result<usize> {
    TiktokenEncoder::new().count(text, encoding)
}

/// Count tokens for a model ID using the built-in model table
///
/// # Example
/// ```
/// use tokcalc::tokenizer::count_tokens_for_model;
///
/// let tokens = count_tokens_for_model("Hello!", "gpt-4o").unwrap();
/// assert!(tokens > 0);
///
/// assert!(count_tokens_for_model("Hello!", "not-a-real-model-xyz").is_err());
/// ```
pub fn count_tokens_for_model(text: &str, model: &str) -> Result<usize> {
    TokenCounter::default().count_for_model(text, model)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::TokCalcError;

    /// Resolver fixture that knows a single made-up model
    struct FixtureResolver(HashMap<&'static str, Encoding>);

    impl EncodingResolver for FixtureResolver {
        fn encoding_for(&self, model: &str) -> Option<Encoding> {
            self.0.get(model).copied()
        }
    }

    /// Encoder fixture: one token per byte
    struct ByteEncoder;

    impl Encoder for ByteEncoder {
        fn encode(&self, text: &str, _encoding: Encoding) -> Result<Vec<u32>> {
            Ok(text.bytes().map(u32::from).collect())
        }
    }

    #[test]
    fn test_count_matches_encode_length() {
        let counter = TokenCounter::default();
        let text = "The quick brown fox jumps over the lazy dog.";

        for encoding in Encoding::ALL {
            let tokens = counter.encode(text, encoding).unwrap();
            assert_eq!(counter.count(text, encoding).unwrap(), tokens.len());
        }
    }

    #[test]
    fn test_empty_text() {
        let counter = TokenCounter::default();
        let result = counter.encode_and_count("", Encoding::Cl100kBase).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.count, 0);
        assert!(result.prefix(50).is_empty());
    }

    #[test]
    fn test_encoding_consistency() {
        // Same text, same encoding should always give same result
        let counter = TokenCounter::default();
        let text = "Deterministic: ñ, 中文, emoji 🎉";

        let first = counter.encode(text, Encoding::O200kBase).unwrap();
        let second = counter.encode(text, Encoding::O200kBase).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concatenation_is_not_additive() {
        // BPE merges across the boundary: "Hello" is a single token
        let counter = TokenCounter::default();
        let joined = counter.count("Hello", Encoding::Cl100kBase).unwrap();
        let split = counter.count("Hel", Encoding::Cl100kBase).unwrap()
            + counter.count("lo", Encoding::Cl100kBase).unwrap();

        assert_eq!(joined, 1);
        assert_ne!(joined, split);
    }

    #[test]
    fn test_count_many() {
        let counter = TokenCounter::default();
        let total = counter
            .count_many(&["Hello", ", world!"], Encoding::Cl100kBase)
            .unwrap();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_injected_collaborators() {
        let resolver = FixtureResolver(HashMap::from([("fixture-model", Encoding::Gpt2)]));
        let counter = TokenCounter::new(resolver, ByteEncoder);

        let encoding = counter.resolve_encoding("fixture-model").unwrap();
        assert_eq!(encoding, Encoding::Gpt2);
        assert_eq!(counter.count("abc", encoding).unwrap(), 3);

        // Built-in models are unknown to the fixture
        assert!(counter
            .resolve_encoding("gpt-4")
            .unwrap_err()
            .is_unresolved_model());
    }

    #[test]
    fn test_report_truncates_preview() {
        let counter = TokenCounter::default();
        let report = counter.report("gpt-4", "Hello, world!", 2).unwrap();

        assert_eq!(report.model, "gpt-4");
        assert_eq!(report.encoding, Encoding::Cl100kBase);
        assert_eq!(report.token_count, 4);
        assert_eq!(report.word_count, 2);
        assert_eq!(report.char_count, 13);
        assert_eq!(report.tokens, vec![9906, 11]);
        assert!(report.truncated);
    }

    #[test]
    fn test_report_short_text_not_truncated() {
        let counter = TokenCounter::default();
        let report = counter.report("gpt-4", "Hello, world!", 50).unwrap();
        assert_eq!(report.tokens.len(), 4);
        assert!(!report.truncated);
    }

    #[test]
    fn test_report_unresolved_model() {
        let counter = TokenCounter::default();
        let err = counter
            .report("not-a-real-model-xyz", "Hello", 50)
            .unwrap_err();
        assert!(matches!(err, TokCalcError::UnresolvedModel { .. }));
    }

    #[test]
    fn test_free_functions() {
        assert_eq!(count_tokens("Hello, world!", Encoding::Cl100kBase).unwrap(), 4);
        assert_eq!(count_tokens_for_model("Hello, world!", "gpt-4").unwrap(), 4);
    }
}
