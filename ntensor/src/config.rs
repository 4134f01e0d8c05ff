use serde::{Deserialize, Serialize};

/// Per-tensor settings, copied into every tensor derived from an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TensorConfig {
    /// Element count of the left operand below which `matmul` runs the direct kernel instead of recursing.
    pub direct_threshold: usize,
}

impl TensorConfig {
    pub const DEFAULT_DIRECT_THRESHOLD: usize = 48;

    pub fn with_direct_threshold(mut self, direct_threshold: usize) -> Self {
        self.direct_threshold = direct_threshold;
        self
    }
}

impl Default for TensorConfig {
    fn default() -> Self {
        Self {
            direct_threshold: Self::DEFAULT_DIRECT_THRESHOLD,
        }
    }
}
