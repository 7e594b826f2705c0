pub mod embedding;
pub mod index;

pub use embedding::IEmbeddingProvider;
pub use index::IVectorIndex;
