//! Chat/code assistant pipeline around a local causal language model
//!
//! This library covers one chat turn end to end:
//! - **Prompt assembly**: fixed system instruction + bounded rendering of
//!   the current HTML/CSS/JS context + the user's message.
//! - **Generation**: in-process Candle inference with fixed sampling
//!   parameters against a lazily-loaded Qwen2/Llama-family decoder.
//! - **Postprocessing**: cleanup of the decoded output and extraction of
//!   fenced code blocks into a language-tag keyed mapping.
//!
//! The model handle is a process-wide singleton: loaded on first use
//! behind a once-cell, retained for the process lifetime, generation
//! serialized by a mutex.

pub mod config;
pub mod constants;
pub mod download;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod postprocess;
pub mod prompt;
pub mod types;

// Re-exports for convenience
pub use config::{AssistantConfig, SamplingParams};
pub use download::ModelFiles;
pub use error::AssistantError;
pub use gateway::Assistant;
pub use postprocess::{clean, extract_code_blocks};
pub use prompt::{build_prompt, SYSTEM_PROMPT};
pub use types::{ChatContext, ChatReply};
