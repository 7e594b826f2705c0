//! # kbase-embeddings
//!
//! The embedding capability is a black box to the rest of the system; this
//! crate supplies a deterministic in-process provider, a readiness gate that
//! models a model still loading, and an engine that caches vectors per
//! provider and text.

pub mod cache;
pub mod engine;
pub mod providers;
pub mod warmup;

pub use engine::EmbeddingEngine;
pub use providers::{create_provider, HashingProvider};
pub use warmup::{ReadinessHandle, WarmupGate};
