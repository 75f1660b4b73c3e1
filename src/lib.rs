//! # tokcalc - Token Calculator for OpenAI Models
//!
//! Counts how many tokens a document consumes under a model's
//! byte-pair-encoding scheme and shows the leading token IDs.
//!
//! ## Pipeline
//!
//! ```text
//!   model id ──> EncodingResolver ──> Encoding
//!                                        │
//!   text ───────────────────────> Encoder::encode ──> [u32] ──> count
//! ```
//!
//! Both steps are pure. The model table is static lookup data and the
//! tiktoken vocabularies are loaded once per process, then only read.
//!
//! ## Encodings
//!
//! | Encoding      | Models                                   |
//! |---------------|------------------------------------------|
//! | `o200k_base`  | gpt-4o, gpt-4.1, gpt-5, o1, o3, o4-mini  |
//! | `cl100k_base` | gpt-4, gpt-3.5-turbo, text-embedding-3-* |
//! | `p50k_base`   | text-davinci-002/003, Codex              |
//! | `p50k_edit`   | text-davinci-edit-001, code-davinci-edit |
//! | `r50k_base`   | davinci, curie, babbage, ada             |
//! | `gpt2`        | gpt2                                     |
//!
//! ## Quick Start
//!
//! ```
//! use tokcalc::TokenCounter;
//!
//! let counter = TokenCounter::default();
//!
//! let encoding = counter.resolve_encoding("gpt-4").unwrap();
//! assert_eq!(encoding.name(), "cl100k_base");
//!
//! let result = counter.encode_and_count("Hello, world!", encoding).unwrap();
//! assert_eq!(result.count, 4);
//! assert_eq!(result.tokens, vec![9906, 11, 1917, 0]);
//! ```
//!
//! Unknown models are a recoverable error:
//!
//! ```
//! use tokcalc::{TokCalcError, TokenCounter};
//!
//! let counter = TokenCounter::default();
//! match counter.resolve_encoding("not-a-real-model-xyz") {
//!     Err(TokCalcError::UnresolvedModel { model }) => println!("pick another model than {model}"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`encoding`]: Encoding schemes and the model → encoding table
//! - [`tokenizer`]: Encoder and token counter
//! - [`document`]: Plain-text document loading
//! - [`report`]: Token count report
//! - [`models`]: Known and remote model listings
//! - [`server`]: HTTP API server (Axum-based)
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod config;
pub mod document;
pub mod encoding;
pub mod error;
pub mod models;
pub mod report;
pub mod server;
pub mod tokenizer;

// Re-exports for convenience
pub use config::Config;
pub use document::Document;
pub use encoding::{Encoding, EncodingResolver, ModelTable};
pub use error::{Result, TokCalcError};
pub use models::{ModelCatalog, ModelEntry};
pub use report::TokenReport;
pub use server::{AppState, ServerConfig};
pub use tokenizer::{
    count_tokens, count_tokens_for_model, Encoder, SpecialTokens, TiktokenEncoder, TokenCount,
    TokenCounter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
