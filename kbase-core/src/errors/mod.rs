//! Error taxonomy. Each subsystem owns an enum; [`KbaseError`] wraps them all.

pub mod embedding_error;
pub mod index_error;
pub mod session_error;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use session_error::SessionError;

/// Top-level error type for every kbase crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KbaseError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl KbaseError {
    /// True when the embedding capability is not ready yet.
    pub fn is_embedding_unavailable(&self) -> bool {
        matches!(self, Self::Embedding(EmbeddingError::Unavailable { .. }))
    }
}

impl From<serde_json::Error> for KbaseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            reason: e.to_string(),
        }
    }
}

pub type KbaseResult<T> = Result<T, KbaseError>;
