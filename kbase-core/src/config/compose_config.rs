use serde::{Deserialize, Serialize};

use super::defaults;

/// Response composer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Max attributes / rules / entities shown before a "+N more" line.
    pub sample_size: usize,
    /// Max related citations listed under the top answer.
    pub related_limit: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            sample_size: defaults::DEFAULT_SAMPLE_SIZE,
            related_limit: defaults::DEFAULT_RELATED_LIMIT,
        }
    }
}
