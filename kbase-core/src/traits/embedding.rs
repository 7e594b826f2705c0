use crate::errors::KbaseResult;

/// Embedding generation capability.
///
/// Must be deterministic for the same input within a process lifetime.
/// Implementations that are not ready fail with
/// [`EmbeddingError::Unavailable`](crate::errors::EmbeddingError::Unavailable).
pub trait IEmbeddingProvider: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> KbaseResult<Vec<f32>>;

    /// Embed a batch of texts.
    fn embed_batch(&self, texts: &[String]) -> KbaseResult<Vec<Vec<f32>>>;

    /// The dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// Whether this provider is currently able to embed.
    fn is_available(&self) -> bool;
}

impl<P: IEmbeddingProvider + ?Sized> IEmbeddingProvider for std::sync::Arc<P> {
    fn embed(&self, text: &str) -> KbaseResult<Vec<f32>> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[String]) -> KbaseResult<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }

    fn dimensions(&self) -> usize {
        (**self).dimensions()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
