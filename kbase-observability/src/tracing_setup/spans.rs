//! Span definitions per operation: retrieval, session, load.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($question:expr) => {
        tracing::info_span!("kbase.retrieval", question = %$question)
    };
}

/// Create a session span.
#[macro_export]
macro_rules! session_span {
    ($session_id:expr) => {
        tracing::info_span!("kbase.session", session_id = %$session_id)
    };
}

/// Create a knowledge-model load span.
#[macro_export]
macro_rules! load_span {
    ($model:expr) => {
        tracing::info_span!("kbase.load", model = %$model)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "kbase.retrieval";
    pub const SESSION: &str = "kbase.session";
    pub const LOAD: &str = "kbase.load";
}
