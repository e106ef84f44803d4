//! Error type for `er-core` (configuration loading).
//!
//! Sub-crates define their own error enums for their boundaries (graph
//! construction, scenario loading, output writing).

use thiserror::Error;

/// Errors raised while loading a [`DispatchConfig`](crate::DispatchConfig).
#[derive(Debug, Error)]
pub enum ErError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `er-core`.
pub type ErResult<T> = Result<T, ErError>;
