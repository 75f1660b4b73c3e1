//! Model name → encoding tables.
//!
//! Mirrors the lookup data tiktoken publishes for OpenAI models: exact model
//! names first, then prefixes for dated snapshots and fine-tunes.

use phf::phf_map;

use super::scheme::Encoding;

/// Exact model names
pub static MODEL_TO_ENCODING: phf::Map<&'static str, Encoding> = phf_map! {
    // Reasoning
    "o1" => Encoding::O200kBase,
    "o3" => Encoding::O200kBase,
    "o4-mini" => Encoding::O200kBase,
    // Chat
    "gpt-5" => Encoding::O200kBase,
    "gpt-4.1" => Encoding::O200kBase,
    "gpt-4o" => Encoding::O200kBase,
    "gpt-4" => Encoding::Cl100kBase,
    "gpt-3.5-turbo" => Encoding::Cl100kBase,
    "gpt-3.5" => Encoding::Cl100kBase,
    "gpt-35-turbo" => Encoding::Cl100kBase,
    // Base
    "davinci-002" => Encoding::Cl100kBase,
    "babbage-002" => Encoding::Cl100kBase,
    // Embeddings
    "text-embedding-ada-002" => Encoding::Cl100kBase,
    "text-embedding-3-small" => Encoding::Cl100kBase,
    "text-embedding-3-large" => Encoding::Cl100kBase,
    // Legacy completions
    "text-davinci-003" => Encoding::P50kBase,
    "text-davinci-002" => Encoding::P50kBase,
    "text-davinci-001" => Encoding::R50kBase,
    "text-curie-001" => Encoding::R50kBase,
    "text-babbage-001" => Encoding::R50kBase,
    "text-ada-001" => Encoding::R50kBase,
    "davinci" => Encoding::R50kBase,
    "curie" => Encoding::R50kBase,
    "babbage" => Encoding::R50kBase,
    "ada" => Encoding::R50kBase,
    // Codex
    "code-davinci-002" => Encoding::P50kBase,
    "code-davinci-001" => Encoding::P50kBase,
    "code-cushman-002" => Encoding::P50kBase,
    "code-cushman-001" => Encoding::P50kBase,
    "davinci-codex" => Encoding::P50kBase,
    "cushman-codex" => Encoding::P50kBase,
    // Edit
    "text-davinci-edit-001" => Encoding::P50kEdit,
    "code-davinci-edit-001" => Encoding::P50kEdit,
    // Old embeddings
    "text-similarity-davinci-001" => Encoding::R50kBase,
    "text-similarity-curie-001" => Encoding::R50kBase,
    "text-similarity-babbage-001" => Encoding::R50kBase,
    "text-similarity-ada-001" => Encoding::R50kBase,
    "text-search-davinci-doc-001" => Encoding::R50kBase,
    "text-search-curie-doc-001" => Encoding::R50kBase,
    "text-search-babbage-doc-001" => Encoding::R50kBase,
    "text-search-ada-doc-001" => Encoding::R50kBase,
    "code-search-babbage-code-001" => Encoding::R50kBase,
    "code-search-ada-code-001" => Encoding::R50kBase,
    // Open source
    "gpt2" => Encoding::Gpt2,
    "gpt-2" => Encoding::Gpt2,
};

/// Model name prefixes (dated snapshots, fine-tunes)
///
/// Matched longest-first, so `ft:gpt-4o-mini:org` lands on `ft:gpt-4o`
/// rather than `ft:gpt-4`.
pub static MODEL_PREFIX_TO_ENCODING: phf::Map<&'static str, Encoding> = phf_map! {
    "o1-" => Encoding::O200kBase,
    "o3-" => Encoding::O200kBase,
    "o4-mini-" => Encoding::O200kBase,
    "gpt-5-" => Encoding::O200kBase,
    "gpt-4.5-" => Encoding::O200kBase,
    "gpt-4.1-" => Encoding::O200kBase,
    "chatgpt-4o-" => Encoding::O200kBase,
    "gpt-4o-" => Encoding::O200kBase,
    "gpt-4-" => Encoding::Cl100kBase,
    "gpt-3.5-turbo-" => Encoding::Cl100kBase,
    "gpt-35-turbo-" => Encoding::Cl100kBase,
    // Fine-tuned
    "ft:gpt-4o" => Encoding::O200kBase,
    "ft:gpt-4" => Encoding::Cl100kBase,
    "ft:gpt-3.5-turbo" => Encoding::Cl100kBase,
    "ft:davinci-002" => Encoding::Cl100kBase,
    "ft:babbage-002" => Encoding::Cl100kBase,
};

/// Longest prefix in [`MODEL_PREFIX_TO_ENCODING`] that `model` starts with
pub fn longest_prefix_match(model: &str) -> Option<(&'static str, Encoding)> {
    MODEL_PREFIX_TO_ENCODING
        .entries()
        .filter(|(prefix, _)| model.starts_with(**prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(prefix, encoding)| (*prefix, *encoding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_entries() {
        assert_eq!(MODEL_TO_ENCODING.get("gpt-4"), Some(&Encoding::Cl100kBase));
        assert_eq!(MODEL_TO_ENCODING.get("gpt-4o"), Some(&Encoding::O200kBase));
        assert_eq!(MODEL_TO_ENCODING.get("text-davinci-003"), Some(&Encoding::P50kBase));
        assert_eq!(MODEL_TO_ENCODING.get("gpt-4-0613"), None);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let (prefix, encoding) = longest_prefix_match("ft:gpt-4o-mini:acme::abc123").unwrap();
        assert_eq!(prefix, "ft:gpt-4o");
        assert_eq!(encoding, Encoding::O200kBase);

        let (prefix, encoding) = longest_prefix_match("ft:gpt-4-0613:acme::abc123").unwrap();
        assert_eq!(prefix, "ft:gpt-4");
        assert_eq!(encoding, Encoding::Cl100kBase);
    }

    #[test]
    fn test_snapshot_prefixes() {
        assert_eq!(longest_prefix_match("gpt-4-0613").unwrap().1, Encoding::Cl100kBase);
        assert_eq!(longest_prefix_match("gpt-4o-2024-08-06").unwrap().1, Encoding::O200kBase);
        assert!(longest_prefix_match("llama-3").is_none());
    }
}
