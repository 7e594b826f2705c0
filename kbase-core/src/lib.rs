//! # kbase-core
//!
//! Foundation crate for the kbase knowledge-base assistant.
//! Defines the document model, answer types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod document;
pub mod errors;
pub mod metric;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::KbaseConfig;
pub use document::{ContentType, Document, Metadata, MetadataFilter, MetadataValue};
pub use errors::{KbaseError, KbaseResult};
pub use metric::DistanceMetric;
pub use models::{Answer, ConfidenceTier, QueryResult, Source};
