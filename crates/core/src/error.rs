//! Shared error types

use thiserror::Error;

/// Core errors surfaced by directory and storage collaborators
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias using the core error
pub type Result<T> = std::result::Result<T, Error>;
