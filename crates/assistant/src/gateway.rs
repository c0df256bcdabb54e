//! The shared chat assistant
//!
//! `Assistant` owns the lazily-initialized model engine and runs the full
//! chat pipeline: prompt assembly, generation, response cleanup and code
//! block extraction. Pipeline failures never escape as errors — they are
//! logged and converted into an in-band fallback reply so the transport
//! layer always has a payload to render.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::config::AssistantConfig;
use crate::download::ModelFiles;
use crate::engine::CausalEngine;
use crate::error::AssistantError;
use crate::postprocess::{clean, extract_code_blocks};
use crate::prompt::{build_prompt, SYSTEM_PROMPT};
use crate::types::{ChatContext, ChatReply};

/// Shared handle to the lazily-loaded model engine.
///
/// The first chat request triggers artifact resolution and model loading;
/// the `OnceCell` guarantees a single load even when requests race on
/// first use. Generation calls are serialized by the engine mutex: one
/// request generates at a time, the rest queue on the lock.
pub struct Assistant {
    config: AssistantConfig,
    engine: OnceCell<Arc<Mutex<CausalEngine>>>,
}

impl Assistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            engine: OnceCell::new(),
        }
    }

    /// Whether the engine has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.engine.get().is_some()
    }

    /// Eagerly resolve artifacts and load the engine. Optional — the
    /// first chat request does the same on demand.
    pub async fn warm_up(&self) -> Result<(), AssistantError> {
        self.engine().await.map(|_| ())
    }

    async fn engine(&self) -> Result<Arc<Mutex<CausalEngine>>, AssistantError> {
        let engine = self
            .engine
            .get_or_try_init(|| async {
                let files = ModelFiles::resolve(&self.config).await?;
                log::info!("Loading model {}...", self.config.model_id);
                let engine =
                    tokio::task::spawn_blocking(move || CausalEngine::load(&files))
                        .await
                        .map_err(|e| AssistantError::TaskJoin(e.to_string()))??;
                log::info!("Model loaded");
                Ok::<_, AssistantError>(Arc::new(Mutex::new(engine)))
            })
            .await?;
        Ok(engine.clone())
    }

    /// Run the full pipeline for one chat turn. Any failure becomes a
    /// fallback reply carrying the error description; the chat endpoint
    /// never sees a transport-level error from generation.
    pub async fn respond(&self, message: &str, context: &ChatContext) -> ChatReply {
        match self.try_respond(message, context).await {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("Chat pipeline failed: {}", err);
                ChatReply {
                    message: format!("An error occurred while generating a response: {}", err),
                    suggested_changes: None,
                }
            }
        }
    }

    async fn try_respond(
        &self,
        message: &str,
        context: &ChatContext,
    ) -> Result<ChatReply, AssistantError> {
        let prompt = build_prompt(SYSTEM_PROMPT, &context.code_sections(), message);
        log::debug!("Prompt assembled: {} chars", prompt.len());

        let engine = self.engine().await?;
        let params = self.config.sampling.clone();
        let raw = tokio::task::spawn_blocking(move || {
            let mut guard = engine.lock();
            guard.generate(&prompt, &params)
        })
        .await
        .map_err(|e| AssistantError::TaskJoin(e.to_string()))??;

        let cleaned = clean(&raw);
        let changes = extract_code_blocks(&cleaned);
        Ok(ChatReply {
            message: cleaned,
            suggested_changes: Some(changes),
        })
    }
}
