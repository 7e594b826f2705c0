//! # kbase-observability
//!
//! Structured logging for every kbase crate: subscriber installation and
//! the span macros used around retrieval, sessions, and loading.

pub mod tracing_setup;

pub use tracing_setup::init;
