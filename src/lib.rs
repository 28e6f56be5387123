pub mod app;
pub mod config;
mod error;
pub mod shopify;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use shopify::AdminClient;

use tracing_subscriber::EnvFilter;

/// Tracing for production: compact single-line output, `RUST_LOG` aware,
/// defaults to `info`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .compact()
        .init();
}

/// Tracing for local development and debugging.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .without_time()
        .pretty()
        .init();
}
