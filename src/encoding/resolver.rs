//! Model → encoding resolution.

use std::collections::HashMap;

use crate::encoding::scheme::Encoding;
use crate::encoding::tables::{longest_prefix_match, MODEL_TO_ENCODING};
use crate::error::{Result, TokCalcError};

/// Resolves a model identifier to its encoding scheme
///
/// Implementations are read-only lookup data and must be safe to share
/// between any number of concurrent readers.
pub trait EncodingResolver: Send + Sync {
    /// Look up the encoding for `model`, or `None` if the model is unknown
    fn encoding_for(&self, model: &str) -> Option<Encoding>;

    /// Like [`encoding_for`](Self::encoding_for) but reports absence as
    /// [`TokCalcError::UnresolvedModel`]
    fn resolve(&self, model: &str) -> Result<Encoding> {
        self.encoding_for(model).ok_or_else(|| {
            tracing::debug!(model, "no encoding for model");
            TokCalcError::UnresolvedModel {
                model: model.to_string(),
            }
        })
    }
}

/// Model table backed by the compiled-in tiktoken lookup data
///
/// Lookups try, in order:
/// 1. Overrides added with [`with_override`](Self::with_override)
/// 2. Exact model name
/// 3. Longest matching model-name prefix
///
/// # Example
/// ```
/// use tokcalc::encoding::{Encoding, EncodingResolver, ModelTable};
///
/// let table = ModelTable::new();
/// assert_eq!(table.resolve("gpt-4").unwrap(), Encoding::Cl100kBase);
/// assert_eq!(table.resolve("gpt-4o-2024-08-06").unwrap(), Encoding::O200kBase);
/// assert!(table.resolve("not-a-real-model-xyz").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelTable {
    overrides: HashMap<String, Encoding>,
}

impl ModelTable {
    /// Create a table with the built-in entries only
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an extra model name to an encoding, taking precedence over the
    /// built-in entries
    pub fn with_override(mut self, model: impl Into<String>, encoding: Encoding) -> Self {
        self.overrides.insert(model.into(), encoding);
        self
    }

    /// Add several overrides at once
    pub fn with_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (S, Encoding)>,
        S: Into<String>,
    {
        self.overrides
            .extend(overrides.into_iter().map(|(m, e)| (m.into(), e)));
        self
    }

    /// All exact model names (built-in plus overrides) with their encodings,
    /// sorted by model name
    pub fn models(&self) -> Vec<(String, Encoding)> {
        let mut models: HashMap<String, Encoding> = MODEL_TO_ENCODING
            .entries()
            .map(|(m, e)| ((*m).to_string(), *e))
            .collect();
        models.extend(self.overrides.iter().map(|(m, e)| (m.clone(), *e)));

        let mut models: Vec<_> = models.into_iter().collect();
        models.sort_by(|a, b| a.0.cmp(&b.0));
        models
    }

    /// Number of override entries
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

impl EncodingResolver for ModelTable {
    fn encoding_for(&self, model: &str) -> Option<Encoding> {
        if let Some(encoding) = self.overrides.get(model) {
            return Some(*encoding);
        }

        if let Some(encoding) = MODEL_TO_ENCODING.get(model) {
            return Some(*encoding);
        }

        longest_prefix_match(model).map(|(prefix, encoding)| {
            tracing::trace!(model, prefix, "resolved model by prefix");
            encoding
        })
    }
}
