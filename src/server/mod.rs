//! Token calculator HTTP server.
//!
//! Provides an HTTP API over the counting core:
//! - Model listing and encoding lookup
//! - Token counting with report
//!
//! Requests share one read-only [`AppState`], so they are served
//! concurrently without coordination.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokcalc::server::{create_router, AppState, ServerConfig};
//!
//! let config = ServerConfig::default().with_port(8080);
//! let app = create_router(Arc::new(AppState::new(config.clone())));
//! let listener = tokio::net::TcpListener::bind(config.addr).await?;
//! axum::serve(listener, app).await?;
//! ```

mod config;
mod handlers;
mod state;

pub use config::ServerConfig;
pub use handlers::{create_router, health_check};
pub use state::AppState;
