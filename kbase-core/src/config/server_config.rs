use serde::{Deserialize, Serialize};

use super::defaults;

/// TCP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: String,
    /// Knowledge model JSON loaded before serving starts.
    pub knowledge_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: defaults::DEFAULT_BIND_ADDR.to_string(),
            knowledge_path: None,
        }
    }
}
