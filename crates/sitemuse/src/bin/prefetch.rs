//! Fetch the model artifacts ahead of first use
//!
//! Run this once before starting the service so the first chat request
//! does not pay for the download. Verifies the required artifact set and
//! prints where each file resolved to.

use assistant::{AssistantConfig, ModelFiles};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AssistantConfig::from_env();
    let files = ModelFiles::resolve(&config).await?;

    println!("Model artifacts for {}:", config.model_id);
    println!("  config:            {}", files.config.display());
    println!("  tokenizer:         {}", files.tokenizer.display());
    println!("  weights:           {}", files.weights.display());
    println!("  generation config: {}", files.generation_config.display());
    Ok(())
}
