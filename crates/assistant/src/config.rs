//! Configuration types for the assistant

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// Sampling configuration for a generation call.
///
/// One instance is fixed per process; there is no per-request tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_new_tokens: usize,
    pub temperature: f64,
    /// Nucleus sampling probability threshold
    pub top_p: f64,
    pub top_k: usize,
    pub repeat_penalty: f32,
    /// Number of recent tokens the repetition penalty considers
    pub repeat_last_n: usize,
    pub seed: u64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_new_tokens: defaults::MAX_NEW_TOKENS,
            temperature: defaults::TEMPERATURE,
            top_p: defaults::TOP_P,
            top_k: defaults::TOP_K,
            repeat_penalty: defaults::REPEAT_PENALTY,
            repeat_last_n: defaults::REPEAT_LAST_N,
            seed: defaults::SEED,
        }
    }
}

/// Where the model comes from and how it samples.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Hugging Face model id, used when no local directory is set
    pub model_id: String,
    /// Local directory holding the model artifacts; skips the hub entirely
    pub model_dir: Option<PathBuf>,
    pub sampling: SamplingParams,
}

impl AssistantConfig {
    /// Read configuration from the environment (`MODEL_ID`, `MODEL_DIR`),
    /// falling back to the built-in defaults.
    pub fn from_env() -> Self {
        Self {
            model_id: std::env::var("MODEL_ID")
                .unwrap_or_else(|_| defaults::MODEL_ID.to_string()),
            model_dir: std::env::var_os("MODEL_DIR").map(PathBuf::from),
            sampling: SamplingParams::default(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model_id: defaults::MODEL_ID.to_string(),
            model_dir: None,
            sampling: SamplingParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_defaults() {
        let params = SamplingParams::default();
        assert_eq!(params.max_new_tokens, 1000);
        assert_eq!(params.temperature, 0.3);
        assert_eq!(params.top_p, 0.9);
        assert_eq!(params.top_k, 50);
        assert_eq!(params.repeat_penalty, 1.2);
    }

    #[test]
    fn test_default_config_uses_hub() {
        let config = AssistantConfig::default();
        assert!(config.model_dir.is_none());
        assert!(!config.model_id.is_empty());
    }
}
