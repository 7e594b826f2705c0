//! # kbase-retrieval
//!
//! Turns a question into an [`Answer`](kbase_core::Answer):
//! embed → top-k search → rank → compose.
//!
//! Answers for unfiltered questions are cached until the index changes.

pub mod cache;
pub mod compose;
pub mod engine;
pub mod ranking;

pub use compose::{KnowledgeItem, ResponseComposer};
pub use engine::RetrievalEngine;
pub use ranking::Ranker;
