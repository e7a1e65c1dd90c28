//! Launch configuration for a single optimizer invocation.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::{AvResult, ConfigError};

/// Everything the launcher needs to invoke the optimizer once.
///
/// Constructed by a caller (CLI, JSON file, or test harness), validated,
/// rendered into a process invocation, and discarded. Never persisted by
/// the launcher itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Dataset name token (e.g. "prime", "amazon").
    pub dataset: String,

    /// Which data partition/shard to optimize over.
    pub group_idx: u32,

    /// Embedding-model backend identifier.
    pub emb_model: String,

    /// Primary reasoning model identifier.
    pub agent_llm: String,

    /// Model used for function-call emulation.
    pub api_func_llm: String,

    /// Run the optimizer in grouped mode.
    pub use_group: bool,

    /// Device indices exposed to the child, in order. Empty hides all devices.
    pub visible_devices: Vec<u32>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            dataset: "prime".to_string(),
            group_idx: 0,
            emb_model: "text-embedding-ada-002".to_string(),
            agent_llm: "gemma-2-27b-it".to_string(),
            api_func_llm: "gemma-2-27b-it".to_string(),
            use_group: true,
            visible_devices: vec![1, 2],
        }
    }
}

impl LaunchConfig {
    pub fn new(dataset: &str, group_idx: u32) -> Self {
        Self {
            dataset: dataset.to_string(),
            group_idx,
            ..Self::default()
        }
    }

    pub fn with_dataset(mut self, dataset: &str) -> Self {
        self.dataset = dataset.to_string();
        self
    }

    pub fn with_group_idx(mut self, group_idx: u32) -> Self {
        self.group_idx = group_idx;
        self
    }

    /// Set the embedding, agent, and function-call models in one go.
    pub fn with_models(mut self, emb: &str, agent: &str, api_func: &str) -> Self {
        self.emb_model = emb.to_string();
        self.agent_llm = agent.to_string();
        self.api_func_llm = api_func.to_string();
        self
    }

    pub fn with_use_group(mut self, use_group: bool) -> Self {
        self.use_group = use_group;
        self
    }

    pub fn with_visible_devices(mut self, devices: Vec<u32>) -> Self {
        self.visible_devices = devices;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> AvResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Check the invariants the type system cannot enforce.
    ///
    /// Returns the first violation, naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("dataset", &self.dataset),
            ("emb_model", &self.emb_model),
            ("agent_llm", &self.agent_llm),
            ("api_func_llm", &self.api_func_llm),
        ] {
            if value.is_empty() {
                return Err(ConfigError::EmptyField { field });
            }
        }

        let mut seen = HashSet::new();
        for &index in &self.visible_devices {
            if !seen.insert(index) {
                return Err(ConfigError::DuplicateDevice { index });
            }
        }

        Ok(())
    }
}
