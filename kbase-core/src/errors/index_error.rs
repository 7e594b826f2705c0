/// Vector index population and query errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    #[error("duplicate document id: {id}")]
    DuplicateId { id: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("document {id} ({content_type}) is missing required metadata key '{key}'")]
    MissingMetadata {
        id: String,
        content_type: String,
        key: String,
    },
}
