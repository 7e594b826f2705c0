//! # kbase-loader
//!
//! Turns a knowledge model (entities, relationships, and their business
//! rules) into retrievable documents and loads them into an index.

pub mod documents;
pub mod load;
pub mod model;

pub use documents::{build_documents, DocumentDraft};
pub use load::{load_model, LoadReport};
pub use model::{EntityDef, KnowledgeModel, ModelInfo, RelationshipDef};
