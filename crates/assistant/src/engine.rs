//! In-process causal language model engine
//!
//! Loads a tokenizer and SafeTensors weights with Candle and runs the
//! sampling loop for text generation. The model architecture is detected
//! from `config.json`; Qwen2- and Llama-family decoders are supported.
//!
//! The engine is synchronous and CPU/GPU bound — callers run it inside
//! `spawn_blocking` and serialize access with a lock.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::llama::{self, Llama, LlamaConfig};
use candle_transformers::models::qwen2::{Config as Qwen2Config, ModelForCausalLM as Qwen2Model};
use tokenizers::Tokenizer;

use crate::config::SamplingParams;
use crate::download::ModelFiles;
use crate::error::AssistantError;

/// The supported causal model families. The Llama variant carries its KV
/// cache explicitly; Qwen2 manages one internally.
enum CausalModel {
    Llama {
        model: Llama,
        config: llama::Config,
        cache: llama::Cache,
    },
    Qwen2(Qwen2Model),
}

/// A loaded tokenizer plus decoder weights.
pub struct CausalEngine {
    model: CausalModel,
    tokenizer: Tokenizer,
    device: Device,
    dtype: DType,
    eos_token_id: u32,
}

impl CausalEngine {
    /// Load the engine from resolved artifact paths.
    ///
    /// Picks CUDA when available and falls back to CPU. This is a slow,
    /// blocking call.
    pub fn load(files: &ModelFiles) -> Result<Self, AssistantError> {
        let device = Device::cuda_if_available(0)
            .map_err(|e| AssistantError::Load(format!("device init failed: {}", e)))?;
        let dtype = if device.is_cuda() { DType::F16 } else { DType::F32 };

        let config_str = std::fs::read_to_string(&files.config)
            .map_err(|e| AssistantError::Load(format!("failed to read config: {}", e)))?;
        let config_json: serde_json::Value = serde_json::from_str(&config_str)
            .map_err(|e| AssistantError::Load(format!("failed to parse config JSON: {}", e)))?;

        let architectures: Vec<String> = config_json
            .get("architectures")
            .and_then(|a| a.as_array())
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        log::info!("Detected architectures: {:?}", architectures);

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| AssistantError::Load(format!("failed to load tokenizer: {}", e)))?;

        // SAFETY: the weights file is memory-mapped read-only and is not
        // modified for the lifetime of the mapping.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], dtype, &device)
                .map_err(|e| AssistantError::Load(format!("failed to map model weights: {}", e)))?
        };

        let model = if architectures.iter().any(|a| a.contains("Qwen2")) {
            log::info!("Loading Qwen2 decoder...");
            let config: Qwen2Config = serde_json::from_str(&config_str)
                .map_err(|e| AssistantError::Load(format!("failed to parse Qwen2 config: {}", e)))?;
            let model = Qwen2Model::new(&config, vb)
                .map_err(|e| AssistantError::Load(format!("failed to build Qwen2 model: {}", e)))?;
            CausalModel::Qwen2(model)
        } else if architectures.iter().any(|a| a.contains("Llama")) {
            log::info!("Loading Llama-family decoder...");
            let config: LlamaConfig = serde_json::from_str(&config_str)
                .map_err(|e| AssistantError::Load(format!("failed to parse Llama config: {}", e)))?;
            let config = config.into_config(false);
            let model = Llama::load(vb, &config)
                .map_err(|e| AssistantError::Load(format!("failed to build Llama model: {}", e)))?;
            let cache = llama::Cache::new(true, dtype, &config, &device)
                .map_err(|e| AssistantError::Load(format!("failed to build KV cache: {}", e)))?;
            CausalModel::Llama {
                model,
                config,
                cache,
            }
        } else {
            return Err(AssistantError::UnsupportedArchitecture(
                architectures.join(", "),
            ));
        };

        let eos_token_id = eos_from_generation_config(&files.generation_config)
            .or_else(|| eos_from_tokenizer(&tokenizer))
            .ok_or_else(|| {
                AssistantError::Load("no end-of-sequence token found".to_string())
            })?;

        Ok(Self {
            model,
            tokenizer,
            device,
            dtype,
            eos_token_id,
        })
    }

    /// Run the sampling loop and return the full decoded sequence (prompt
    /// plus completion). The response cleaner downstream isolates the
    /// reply, so nothing is stripped here.
    ///
    /// Stops at the end-of-sequence token or after `max_new_tokens`,
    /// whichever comes first.
    pub fn generate(
        &mut self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, AssistantError> {
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| AssistantError::Tokenization(e.to_string()))?;
        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        if tokens.is_empty() {
            return Err(AssistantError::Tokenization(
                "prompt produced no tokens".to_string(),
            ));
        }
        let prompt_len = tokens.len();

        // Fresh KV state per call
        match &mut self.model {
            CausalModel::Llama { config, cache, .. } => {
                *cache = llama::Cache::new(true, self.dtype, config, &self.device)?;
            }
            CausalModel::Qwen2(model) => model.clear_kv_cache(),
        }

        let mut logits_processor = LogitsProcessor::from_sampling(
            params.seed,
            Sampling::TopKThenTopP {
                k: params.top_k,
                p: params.top_p,
                temperature: params.temperature,
            },
        );

        for index in 0..params.max_new_tokens {
            let context_size = if index > 0 { 1 } else { tokens.len() };
            let start_pos = tokens.len() - context_size;
            let input = Tensor::new(&tokens[start_pos..], &self.device)?.unsqueeze(0)?;

            let logits = match &mut self.model {
                CausalModel::Llama { model, cache, .. } => {
                    model.forward(&input, start_pos, cache)?.squeeze(0)?
                }
                CausalModel::Qwen2(model) => {
                    model.forward(&input, start_pos)?.squeeze(0)?.squeeze(0)?
                }
            }
            .to_dtype(DType::F32)?;
            let logits = if (params.repeat_penalty - 1.0).abs() < f32::EPSILON {
                logits
            } else {
                let start_at = tokens.len().saturating_sub(params.repeat_last_n);
                candle_transformers::utils::apply_repeat_penalty(
                    &logits,
                    params.repeat_penalty,
                    &tokens[start_at..],
                )?
            };

            let next = logits_processor.sample(&logits)?;
            tokens.push(next);
            if next == self.eos_token_id {
                break;
            }
        }

        log::debug!("Generated {} new tokens", tokens.len() - prompt_len);
        self.tokenizer
            .decode(&tokens, true)
            .map_err(|e| AssistantError::Generation(format!("decoding failed: {}", e)))
    }
}

/// Read `eos_token_id` from a generation config; the field may be a
/// single id or a list.
fn eos_from_generation_config(path: &Path) -> Option<u32> {
    let raw = std::fs::read_to_string(path).ok()?;
    let value: serde_json::Value = serde_json::from_str(&raw).ok()?;
    match value.get("eos_token_id")? {
        serde_json::Value::Number(n) => n.as_u64().map(|id| id as u32),
        serde_json::Value::Array(ids) => ids.iter().find_map(|v| v.as_u64()).map(|id| id as u32),
        _ => None,
    }
}

/// Fall back to well-known end-of-sequence token strings.
fn eos_from_tokenizer(tokenizer: &Tokenizer) -> Option<u32> {
    ["<|im_end|>", "<|endoftext|>", "<|EOT|>", "</s>"]
        .iter()
        .find_map(|token| tokenizer.token_to_id(token))
}
