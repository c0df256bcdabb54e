//! Shared constants for the assistant pipeline

/// Default model and sampling settings
pub mod defaults {
    /// Hub model used when no local directory is configured
    pub const MODEL_ID: &str = "Qwen/Qwen2.5-Coder-1.5B-Instruct";

    pub const MAX_NEW_TOKENS: usize = 1000;
    pub const TEMPERATURE: f64 = 0.3;
    pub const TOP_P: f64 = 0.9;
    pub const TOP_K: usize = 50;
    pub const REPEAT_PENALTY: f32 = 1.2;
    /// Window of recent tokens the repetition penalty is applied over
    pub const REPEAT_LAST_N: usize = 64;
    pub const SEED: u64 = 299792458;
}

/// Artifact filenames that must all be present before the model can load
pub const REQUIRED_MODEL_FILES: &[&str] = &[
    "config.json",
    "model.safetensors",
    "tokenizer.json",
    "generation_config.json",
];
