//! Error taxonomy for the session engine.
//!
//! Only genuinely exceptional conditions are errors. Expected steady-state
//! outcomes ("nothing left to draw", "ability already used") are reported
//! through `Option`/`bool` returns by the operations themselves.

use thiserror::Error;

/// Errors raised by catalog loading, encounter selection and persistence.
#[derive(Debug, Error)]
pub enum GameError {
    /// The catalog collaborator reported a failed fetch.
    #[error("card catalog unavailable: {message}")]
    CatalogUnavailable { message: String },

    /// A catalog record cannot be turned into play instances.
    #[error("invalid catalog entry '{title}': {reason}")]
    InvalidCatalogEntry { title: String, reason: String },

    /// The chosen encounter was not part of the pending offer.
    #[error("encounter {id} is not part of the current offer")]
    InvalidSelection { id: u32 },

    /// A persisted snapshot could not be decoded.
    #[error("saved session is corrupt: {0}")]
    SaveCorrupt(#[source] serde_json::Error),

    /// The key-value collaborator failed to read, write or delete.
    #[error("session storage failed: {message}")]
    Storage { message: String },

    /// Configuration JSON could not be parsed.
    #[error("invalid game configuration: {0}")]
    Config(#[source] serde_json::Error),
}

impl GameError {
    /// Wrap any collaborator error as a storage failure.
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: err.to_string(),
        }
    }
}
