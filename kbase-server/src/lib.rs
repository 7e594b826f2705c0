//! # kbase-server
//!
//! Wires the configured embedder, index, and retrieval engine together,
//! loads the knowledge model in the background, and serves one session per
//! TCP connection.

pub mod app;
pub mod cli;

pub use app::App;
pub use cli::Cli;
