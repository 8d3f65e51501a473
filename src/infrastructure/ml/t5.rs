use std::sync::Mutex;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config as T5Config, T5ForConditionalGeneration};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::ModelError;

use super::generation::{beam_search, GenerationConfig};
use super::{select_device, select_dtype};

/// A T5-class conditional generation model with its tokenizer, loaded
/// once from the hub and shared read-only across requests. The decoder
/// runs cache-less so each beam can replay its full prefix.
pub struct T5Generator {
    model: Mutex<T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    device: Device,
    decoder_start: u32,
    eos_token: u32,
}

impl T5Generator {
    pub fn load(model_id: &str, max_input_tokens: usize) -> Result<Self, ModelError> {
        let device = select_device();

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing T5 generation model"
        );

        let api = Api::new().map_err(|e| ModelError::LoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| ModelError::LoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| ModelError::LoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| ModelError::LoadFailed(format!("model.safetensors: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| ModelError::LoadFailed(format!("read config: {}", e)))?;
        let mut config: T5Config = serde_json::from_str(&config_contents)
            .map_err(|e| ModelError::LoadFailed(format!("parse config: {}", e)))?;
        config.use_cache = false;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelError::LoadFailed(format!("tokenizer: {}", e)))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: max_input_tokens,
                ..Default::default()
            }))
            .map_err(|e| ModelError::LoadFailed(format!("truncation config: {}", e)))?;

        let dtype = select_dtype(&device);

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| ModelError::LoadFailed(format!("weights: {}", e)))?
        };

        let decoder_start = config.decoder_start_token_id.unwrap_or(config.pad_token_id) as u32;
        let eos_token = config.eos_token_id as u32;

        let model = T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| ModelError::LoadFailed(format!("model: {}", e)))?;

        tracing::info!(model = model_id, "T5 generation model loaded");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            device,
            decoder_start,
            eos_token,
        })
    }

    /// Encodes `input` (silently truncated to the configured window),
    /// runs beam search, and decodes the best hypothesis back to text.
    pub fn generate(&self, input: &str, config: &GenerationConfig) -> Result<String, ModelError> {
        let encoding = self
            .tokenizer
            .encode(input, true)
            .map_err(|e| ModelError::TokenizationFailed(e.to_string()))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        let mut model = self
            .model
            .lock()
            .map_err(|_| ModelError::InferenceFailed("model lock poisoned".to_string()))?;

        let encoder_output = model
            .encode(&input_ids)
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        let device = &self.device;
        let tokens = beam_search(
            |prefix: &[u32]| {
                let decoder_ids = Tensor::new(prefix, device)
                    .and_then(|t| t.unsqueeze(0))
                    .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

                model
                    .decode(&decoder_ids, &encoder_output)
                    .and_then(|logits| logits.to_dtype(DType::F32))
                    .and_then(|logits| logits.squeeze(0))
                    .and_then(|logits| logits.to_vec1::<f32>())
                    .map_err(|e| ModelError::InferenceFailed(e.to_string()))
            },
            self.decoder_start,
            self.eos_token,
            config,
        )?;

        self.tokenizer
            .decode(&tokens, true)
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))
    }
}
