//! Error types for the assistant pipeline

/// Errors from artifact resolution, model loading and generation.
///
/// The chat entry point converts all of these into an in-band fallback
/// reply; they only propagate as values inside the pipeline itself.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("model artifacts unavailable: {0}")]
    ModelFiles(String),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("unsupported model architecture: {0}")]
    UnsupportedArchitecture(String),

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("generation failed: {0}")]
    Generation(String),

    #[error("blocking task failed: {0}")]
    TaskJoin(String),
}

impl From<candle_core::Error> for AssistantError {
    fn from(err: candle_core::Error) -> Self {
        AssistantError::Generation(err.to_string())
    }
}
