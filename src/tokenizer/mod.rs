//! Token counting utilities.
//!
//! This module provides exact BPE token counts using the tiktoken
//! vocabularies, behind two seams:
//!
//! - [`Encoder`]: text + encoding → token IDs ([`TiktokenEncoder`])
//! - [`EncodingResolver`](crate::encoding::EncodingResolver): model → encoding
//!
//! [`TokenCounter`] chains them: resolve → encode → measure.
//!
//! # Example
//!
//! ```
//! use tokcalc::tokenizer::{count_tokens, TokenCounter};
//! use tokcalc::encoding::Encoding;
//!
//! // Count with a specific encoding
//! let tokens = count_tokens("Hello, world!", Encoding::O200kBase).unwrap();
//! println!("Token count (o200k): {}", tokens);
//!
//! // Resolve a model first
//! let counter = TokenCounter::default();
//! let encoding = counter.resolve_encoding("gpt-3.5-turbo").unwrap();
//! let result = counter.encode_and_count("Hello, world!", encoding).unwrap();
//! println!("{} tokens: {:?}", result.count, result.tokens);
//! ```

mod counter;
mod encoder;

pub use counter::{count_tokens, count_tokens_for_model, TokenCount, TokenCounter};
pub use encoder::{Encoder, SpecialTokens, TiktokenEncoder};
