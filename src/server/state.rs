//! Server state.

use std::time::{Duration, Instant};

use super::config::ServerConfig;
use crate::models::ModelCatalog;
use crate::tokenizer::TokenCounter;

/// Application state shared across handlers
///
/// Every member is read-only after construction, so handlers share it
/// through an `Arc` without locking.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Token counter
    pub counter: TokenCounter,
    /// Model catalog
    pub catalog: ModelCatalog,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create state with the built-in model table
    pub fn new(config: ServerConfig) -> Self {
        Self::with_counter(config, TokenCounter::default())
    }

    /// Create state around a preconfigured counter
    pub fn with_counter(config: ServerConfig, counter: TokenCounter) -> Self {
        let catalog = ModelCatalog::new(counter.resolver().clone());

        Self {
            config,
            counter,
            catalog,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
