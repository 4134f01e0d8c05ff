//! Configuration for the demo driver
//!
//! Loaded from a YAML file when `NTENSOR_CONFIG` names one; `NTENSOR_DIRECT_THRESHOLD` overrides the
//! multiplication threshold either way.

use anyhow::{Context, Result, bail};
use ntensor::TensorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV: &str = "NTENSOR_CONFIG";
pub const THRESHOLD_ENV: &str = "NTENSOR_DIRECT_THRESHOLD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Edge length of the square sample matrices
    #[serde(default = "default_size")]
    pub size: usize,

    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Settings applied to every tensor the demo builds
    #[serde(default = "default_tensor_config")]
    pub tensor: TensorConfig,
}

impl DemoConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Loads the file named by `NTENSOR_CONFIG` (defaults otherwise) and applies environment overrides.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(value) = std::env::var(THRESHOLD_ENV) {
            config.tensor.direct_threshold = value
                .parse()
                .with_context(|| format!("{THRESHOLD_ENV} must be a non-negative integer, got {value:?}"))?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            bail!("size must be positive");
        }
        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            log_level: default_log_level(),
            tensor: default_tensor_config(),
        }
    }
}

fn default_size() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

// The demo multiplies through the recursive kernel unless told otherwise.
fn default_tensor_config() -> TensorConfig {
    TensorConfig::default().with_direct_threshold(0)
}
