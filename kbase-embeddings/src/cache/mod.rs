pub mod vector_cache;

pub use vector_cache::{VectorCache, VectorKey};
