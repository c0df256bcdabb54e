//! Model artifact bootstrap
//!
//! Verifies that the required model artifacts are present locally and
//! fetches any missing ones from the Hugging Face hub. Hub downloads go
//! through the hub cache, so repeated startups reuse existing files.

use std::path::{Path, PathBuf};

use hf_hub::api::tokio::Api;

use crate::config::AssistantConfig;
use crate::constants::REQUIRED_MODEL_FILES;
use crate::error::AssistantError;

/// Resolved locations of the model artifacts.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
    pub generation_config: PathBuf,
}

impl ModelFiles {
    /// Use artifacts from a local directory, verifying the required set
    /// is complete.
    pub fn from_dir(dir: &Path) -> Result<Self, AssistantError> {
        let missing: Vec<&str> = REQUIRED_MODEL_FILES
            .iter()
            .copied()
            .filter(|name| !dir.join(name).is_file())
            .collect();
        if !missing.is_empty() {
            return Err(AssistantError::ModelFiles(format!(
                "{} is missing {}",
                dir.display(),
                missing.join(", ")
            )));
        }
        Ok(Self {
            config: dir.join("config.json"),
            tokenizer: dir.join("tokenizer.json"),
            weights: dir.join("model.safetensors"),
            generation_config: dir.join("generation_config.json"),
        })
    }

    /// Fetch the required artifacts from the Hugging Face hub. Files
    /// already present in the hub cache are not downloaded again.
    pub async fn fetch(model_id: &str) -> Result<Self, AssistantError> {
        let api = Api::new()
            .map_err(|e| AssistantError::ModelFiles(format!("hub api unavailable: {}", e)))?;
        let repo = api.model(model_id.to_string());

        log::info!("Resolving model artifacts for {}", model_id);
        let mut paths = Vec::with_capacity(REQUIRED_MODEL_FILES.len());
        for name in REQUIRED_MODEL_FILES {
            let path = repo.get(name).await.map_err(|e| {
                AssistantError::ModelFiles(format!(
                    "failed to fetch {} for {}: {}",
                    name, model_id, e
                ))
            })?;
            log::debug!("Resolved {} -> {}", name, path.display());
            paths.push(path);
        }

        let mut paths = paths.into_iter();
        // Same order as REQUIRED_MODEL_FILES
        Ok(Self {
            config: paths.next().ok_or_else(missing_artifact)?,
            weights: paths.next().ok_or_else(missing_artifact)?,
            tokenizer: paths.next().ok_or_else(missing_artifact)?,
            generation_config: paths.next().ok_or_else(missing_artifact)?,
        })
    }

    /// Resolve artifacts: prefer the configured local directory, fall
    /// back to the hub.
    pub async fn resolve(config: &AssistantConfig) -> Result<Self, AssistantError> {
        match &config.model_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::fetch(&config.model_id).await,
        }
    }
}

fn missing_artifact() -> AssistantError {
    AssistantError::ModelFiles("artifact list incomplete".to_string())
}
