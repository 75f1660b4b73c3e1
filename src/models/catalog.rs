//! Catalog of models with a known encoding.

use serde::{Deserialize, Serialize};

use crate::encoding::{Encoding, EncodingResolver, ModelTable};

/// A model together with the encoding it resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model identifier
    pub id: String,
    /// Encoding scheme
    pub encoding: Encoding,
}

/// Lists models whose token counts can be computed
///
/// # Example
/// ```
/// use tokcalc::encoding::ModelTable;
/// use tokcalc::models::ModelCatalog;
///
/// let catalog = ModelCatalog::new(ModelTable::new());
/// assert!(catalog.known().iter().any(|m| m.id == "gpt-4"));
///
/// let supported = catalog.filter_supported(["gpt-4-0613", "whisper-1", "dall-e-3"]);
/// assert_eq!(supported.len(), 1);
/// assert_eq!(supported[0].id, "gpt-4-0613");
/// ```
#[derive(Debug, Clone)]
pub struct ModelCatalog<R = ModelTable> {
    resolver: R,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(ModelTable::new())
    }
}

impl ModelCatalog<ModelTable> {
    /// Every exact model name in the table, sorted by id
    pub fn known(&self) -> Vec<ModelEntry> {
        self.resolver
            .models()
            .into_iter()
            .map(|(id, encoding)| ModelEntry { id, encoding })
            .collect()
    }

    /// Known models using `encoding`
    pub fn by_encoding(&self, encoding: Encoding) -> Vec<ModelEntry> {
        self.known()
            .into_iter()
            .filter(|m| m.encoding == encoding)
            .collect()
    }

    /// Known models whose id contains `query` (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<ModelEntry> {
        let query_lower = query.to_lowercase();
        self.known()
            .into_iter()
            .filter(|m| m.id.to_lowercase().contains(&query_lower))
            .collect()
    }
}

impl<R: EncodingResolver> ModelCatalog<R> {
    /// Create a catalog over a resolver
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Keep only the ids that resolve to an encoding, sorted and deduplicated
    ///
    /// Used to narrow a provider's model listing down to the models whose
    /// tokens can actually be counted.
    pub fn filter_supported<I, S>(&self, ids: I) -> Vec<ModelEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<ModelEntry> = ids
            .into_iter()
            .filter_map(|id| {
                let id = id.as_ref();
                self.resolver.encoding_for(id).map(|encoding| ModelEntry {
                    id: id.to_string(),
                    encoding,
                })
            })
            .collect();

        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries.dedup_by(|a, b| a.id == b.id);
        entries
    }
}
