//! End-to-end counting tests.
//!
//! These tests drive the public API the way the CLI and server do:
//! resolve a model, encode, count, report.

use proptest::prelude::*;
use tokcalc::{
    count_tokens, Config, Document, Encoder, Encoding, EncodingResolver, ModelTable,
    SpecialTokens, TiktokenEncoder, TokCalcError, TokenCounter,
};

/// Golden fixture: "Hello, world!" under each vocabulary
#[test]
fn test_hello_world_golden() {
    let counter = TokenCounter::default();

    let cl100k = counter
        .encode_and_count("Hello, world!", Encoding::Cl100kBase)
        .unwrap();
    assert_eq!(cl100k.tokens, vec![9906, 11, 1917, 0]);
    assert_eq!(cl100k.count, 4);

    let r50k = counter
        .encode_and_count("Hello, world!", Encoding::R50kBase)
        .unwrap();
    assert_eq!(r50k.tokens, vec![15496, 11, 995, 0]);
}

/// Model → encoding → count, end to end
#[test]
fn test_resolve_then_count() {
    let counter = TokenCounter::default();

    let encoding = counter.resolve_encoding("gpt-4").unwrap();
    assert_eq!(encoding, Encoding::Cl100kBase);
    assert!(!encoding.name().is_empty());

    let result = counter.encode_and_count("Hello, world!", encoding).unwrap();
    assert_eq!(result.count, result.tokens.len());
}

/// Unknown models are reported, not fatal, and the caller can retry
#[test]
fn test_unresolved_model_is_recoverable() {
    let counter = TokenCounter::default();

    let err = counter.resolve_encoding("not-a-real-model-xyz").unwrap_err();
    assert!(matches!(err, TokCalcError::UnresolvedModel { .. }));

    // Re-prompted with a valid model, the same counter keeps working
    assert!(counter.count_for_model("retry", "gpt-4o").is_ok());
}

/// Versioned snapshots and fine-tunes resolve through prefixes
#[test]
fn test_snapshot_and_finetune_models() {
    let table = ModelTable::new();
    assert_eq!(table.resolve("gpt-4-0613").unwrap(), Encoding::Cl100kBase);
    assert_eq!(table.resolve("gpt-4o-mini-2024-07-18").unwrap(), Encoding::O200kBase);
    assert_eq!(
        table.resolve("ft:gpt-3.5-turbo-0125:acme::8xyz").unwrap(),
        Encoding::Cl100kBase
    );
}

/// Same text, different vocabularies, different sequences
#[test]
fn test_encodings_differ() {
    let counter = TokenCounter::default();
    let text = "Tokenizers disagree about rare words like antidisestablishmentarianism.";

    let o200k = counter.encode(text, Encoding::O200kBase).unwrap();
    let r50k = counter.encode(text, Encoding::R50kBase).unwrap();
    assert_ne!(o200k, r50k);
}

/// Text documents load and report, PDFs are refused
#[test]
fn test_document_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "Hello, world!").unwrap();

    let document = Document::load(&path).unwrap();
    let report = TokenCounter::default()
        .report("gpt-4", document.text(), 50)
        .unwrap();
    assert_eq!(report.token_count, 4);
    assert_eq!(report.word_count, document.word_count());

    let pdf = dir.path().join("paper.pdf");
    std::fs::write(&pdf, b"%PDF-1.7").unwrap();
    assert!(matches!(
        Document::load(&pdf),
        Err(TokCalcError::UnsupportedDocument { .. })
    ));
}

/// Piped bytes that are not valid UTF-8 still produce a count
#[test]
fn test_invalid_utf8_bytes_are_counted() {
    let document = Document::from_bytes(b"ok \xff end".to_vec(), None);
    let report = TokenCounter::default()
        .report("gpt-4", document.text(), 50)
        .unwrap();

    assert!(report.token_count > 0);
    assert_eq!(report.word_count, 3);
}

/// A long document keeps only the configured preview
#[test]
fn test_long_document_preview() {
    let text = "lorem ipsum dolor sit amet ".repeat(200);
    let report = TokenCounter::default().report("gpt-4o", &text, 50).unwrap();

    assert!(report.token_count > 50);
    assert_eq!(report.tokens.len(), 50);
    assert!(report.truncated);
}

/// Config drives the special-token policy and overrides
#[test]
fn test_counter_from_config() {
    let config: Config = toml::from_str(
        r#"
            [counter]
            special_tokens = "allow"

            [models.overrides]
            "acme-chat" = "cl100k_base"
        "#,
    )
    .unwrap();

    let counter = config.token_counter().unwrap();
    let report = counter.report("acme-chat", "<|endoftext|>", 50).unwrap();
    assert_eq!(report.tokens, vec![100257]);
}

/// Default policy refuses special-token literals
#[test]
fn test_default_policy_rejects_special_literal() {
    let err = TokenCounter::default()
        .report("gpt-4", "prompt <|endofprompt|>", 50)
        .unwrap_err();
    assert!(matches!(err, TokCalcError::EncodingFailure(_)));
}

/// Many threads share the loaded vocabularies
#[test]
fn test_concurrent_counting() {
    let counter = std::sync::Arc::new(TokenCounter::default());
    let expected = counter.count("Hello, world!", Encoding::Cl100kBase).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let counter = std::sync::Arc::clone(&counter);
            std::thread::spawn(move || counter.count("Hello, world!", Encoding::Cl100kBase))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_count_equals_encode_len(text in any::<String>(), idx in 0usize..Encoding::ALL.len()) {
        let encoding = Encoding::ALL[idx];
        let encoder = TiktokenEncoder::new().with_special_tokens(SpecialTokens::Ordinary);

        let tokens = encoder.encode(&text, encoding).unwrap();
        prop_assert_eq!(encoder.count(&text, encoding).unwrap(), tokens.len());
        // Every token covers at least one byte
        prop_assert!(tokens.len() <= text.len());
    }

    #[test]
    fn prop_encoding_is_deterministic(text in "\\PC{0,200}") {
        let encoder = TiktokenEncoder::new().with_special_tokens(SpecialTokens::Ordinary);
        let first = encoder.encode(&text, Encoding::Cl100kBase).unwrap();
        let second = encoder.encode(&text, Encoding::Cl100kBase).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_concatenation_tolerated(a in "[a-z ]{0,40}", b in "[a-z ]{0,40}") {
        // count(a + b) may differ from count(a) + count(b); only check that
        // every count is computed and empty parts contribute nothing
        let joined = count_tokens(&format!("{a}{b}"), Encoding::Cl100kBase).unwrap();
        let left = count_tokens(&a, Encoding::Cl100kBase).unwrap();
        let right = count_tokens(&b, Encoding::Cl100kBase).unwrap();

        if a.is_empty() {
            prop_assert_eq!(joined, right);
        }
        if b.is_empty() {
            prop_assert_eq!(joined, left);
        }
    }
}
