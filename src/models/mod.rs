//! Model listings.
//!
//! - [`ModelCatalog`]: models the built-in table (plus overrides) can resolve
//! - [`fetch_remote_models`]: a provider's live model list, narrowed to the
//!   models with a known encoding
//!
//! # Example
//!
//! ```
//! use tokcalc::encoding::Encoding;
//! use tokcalc::models::ModelCatalog;
//!
//! let catalog = ModelCatalog::default();
//! for entry in catalog.by_encoding(Encoding::O200kBase) {
//!     println!("{} -> {}", entry.id, entry.encoding);
//! }
//! ```

mod catalog;
mod remote;

pub use catalog::{ModelCatalog, ModelEntry};
pub use remote::{fetch_remote_listing, fetch_remote_models, RemoteModel, RemoteModelsResponse};
