//! # kbase-index
//!
//! Reference implementation of [`IVectorIndex`](kbase_core::traits::IVectorIndex):
//! every document held in memory, one linear scan per query. Knowledge bases
//! here are tens to low thousands of documents, so a full scan is cheap;
//! callers only see the trait and an ANN backend can replace this one.

pub mod memory;
pub mod stats;

pub use memory::InMemoryIndex;
pub use stats::IndexStats;
