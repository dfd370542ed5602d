//! Engine error taxonomy
//!
//! Only transport and backend failures surface as errors. Identifier
//! lookups that match nothing resolve to `None` or an empty collection at
//! the call site, never to an error variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Network-level failure talking to a backend
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend error {status}: {body}")]
    Backend { status: u16, body: String },

    /// Missing or invalid injected configuration
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
