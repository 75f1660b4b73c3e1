//! Encoding schemes and model → encoding resolution.
//!
//! The lookup data is static and read-only. It is reached through the
//! [`EncodingResolver`] trait so callers can substitute their own table.
//!
//! # Example
//!
//! ```
//! use tokcalc::encoding::{Encoding, EncodingResolver, ModelTable};
//!
//! let table = ModelTable::new();
//! let encoding = table.resolve("gpt-3.5-turbo").unwrap();
//! assert_eq!(encoding, Encoding::Cl100kBase);
//! assert_eq!(encoding.name(), "cl100k_base");
//! ```

mod resolver;
mod scheme;
mod tables;

pub use resolver::{EncodingResolver, ModelTable};
pub use scheme::Encoding;
pub use tables::{longest_prefix_match, MODEL_PREFIX_TO_ENCODING, MODEL_TO_ENCODING};
