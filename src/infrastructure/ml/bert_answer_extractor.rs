use async_trait::async_trait;
use candle_core::{DType, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;

use crate::application::ports::{AnswerExtractor, ModelError};

use super::{select_device, select_dtype};

const MAX_SEQUENCE_TOKENS: usize = 512;
const MAX_ANSWER_TOKENS: usize = 30;

/// Extractive question answering: encodes (question, paragraph) jointly,
/// scores every token position as candidate span start and end with a
/// linear head over the encoder output, and picks the best valid span.
pub struct BertAnswerExtractor {
    model: BertModel,
    qa_outputs: Linear,
    tokenizer: Tokenizer,
    device: candle_core::Device,
}

impl BertAnswerExtractor {
    pub fn load(model_id: &str) -> Result<Self, ModelError> {
        let device = select_device();

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing extractive QA model"
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
        let config: BertConfig = serde_json::from_str(&config_contents)
            .map_err(|e| ModelError::LoadFailed(format!("parse config: {}", e)))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelError::LoadFailed(format!("tokenizer: {}", e)))?;

        // Truncate the paragraph side only, so the question is never cut.
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_SEQUENCE_TOKENS,
                strategy: tokenizers::TruncationStrategy::OnlySecond,
                ..Default::default()
            }))
            .map_err(|e| ModelError::LoadFailed(format!("truncation config: {}", e)))?;

        let dtype = select_dtype(&device);

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| ModelError::LoadFailed(format!("weights: {}", e)))?
        };

        let model = BertModel::load(vb.pp("bert"), &config)
            .map_err(|e| ModelError::LoadFailed(format!("model: {}", e)))?;

        let qa_outputs = candle_nn::linear(config.hidden_size, 2, vb.pp("qa_outputs"))
            .map_err(|e| ModelError::LoadFailed(format!("qa head: {}", e)))?;

        tracing::info!(model = model_id, "Extractive QA model loaded");

        Ok(Self {
            model,
            qa_outputs,
            tokenizer,
            device,
        })
    }

    fn span_logits(&self, encoding: &tokenizers::Encoding) -> Result<(Vec<f32>, Vec<f32>), ModelError> {
        let seq_len = encoding.get_ids().len();

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        let logits = self
            .qa_outputs
            .forward(&hidden)
            .and_then(|t| t.to_dtype(DType::F32))
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        let start_logits = logits
            .narrow(2, 0, 1)
            .and_then(|t| t.reshape((seq_len,)))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;
        let end_logits = logits
            .narrow(2, 1, 1)
            .and_then(|t| t.reshape((seq_len,)))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        Ok((start_logits, end_logits))
    }
}

#[async_trait]
impl AnswerExtractor for BertAnswerExtractor {
    #[tracing::instrument(skip(self, question, context), fields(question_chars = question.len()))]
    async fn extract_answer(
        &self,
        question: &str,
        context: &str,
    ) -> Result<Option<String>, ModelError> {
        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(|e| ModelError::TokenizationFailed(e.to_string()))?;

        let (start_logits, end_logits) = self.span_logits(&encoding)?;

        // The answer must come from the paragraph, never from the
        // question or the special tokens.
        let allowed: Vec<bool> = encoding
            .get_sequence_ids()
            .iter()
            .map(|id| *id == Some(1))
            .collect();

        let Some((start, end)) =
            select_answer_span(&start_logits, &end_logits, &allowed, MAX_ANSWER_TOKENS)
        else {
            return Ok(None);
        };

        let ids = &encoding.get_ids()[start..=end];
        let answer = self
            .tokenizer
            .decode(ids, true)
            .map_err(|e| ModelError::InferenceFailed(e.to_string()))?;

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}

/// Picks the (start, end) pair maximizing `start_logit + end_logit` over
/// valid spans: both positions allowed, `start <= end`, span no longer
/// than `max_answer_tokens`. Joint maximization cannot produce an empty
/// or inverted span, unlike selecting the two argmaxes independently.
pub fn select_answer_span(
    start_logits: &[f32],
    end_logits: &[f32],
    allowed: &[bool],
    max_answer_tokens: usize,
) -> Option<(usize, usize)> {
    let len = start_logits.len().min(end_logits.len()).min(allowed.len());
    let mut best: Option<(usize, usize, f32)> = None;

    for start in 0..len {
        if !allowed[start] {
            continue;
        }
        let last = (start + max_answer_tokens).min(len);
        for end in start..last {
            if !allowed[end] {
                continue;
            }
            let score = start_logits[start] + end_logits[end];
            if best.map_or(true, |(_, _, s)| score > s) {
                best = Some((start, end, score));
            }
        }
    }

    best.map(|(start, end, _)| (start, end))
}

#[cfg(test)]
mod tests {
    use super::select_answer_span;

    #[test]
    fn picks_jointly_best_valid_span() {
        let start = vec![0.0, 5.0, 1.0, 0.0];
        let end = vec![0.0, 0.0, 1.0, 4.0];
        let allowed = vec![true; 4];

        assert_eq!(select_answer_span(&start, &end, &allowed, 30), Some((1, 3)));
    }

    #[test]
    fn inverted_argmaxes_still_yield_valid_span() {
        // Independent argmaxes would pick start=3, end=0: inverted.
        let start = vec![0.0, 0.0, 0.0, 10.0];
        let end = vec![10.0, 0.0, 0.0, -5.0];
        let allowed = vec![true; 4];

        let (s, e) = select_answer_span(&start, &end, &allowed, 30).unwrap();
        assert!(s <= e);
    }

    #[test]
    fn respects_allowed_mask() {
        // Best raw span sits in the question side; mask forces the
        // paragraph side.
        let start = vec![10.0, 0.0, 1.0, 0.0];
        let end = vec![10.0, 0.0, 0.0, 1.0];
        let allowed = vec![false, false, true, true];

        assert_eq!(select_answer_span(&start, &end, &allowed, 30), Some((2, 3)));
    }

    #[test]
    fn respects_max_answer_length() {
        let start = vec![10.0, 0.0, 0.0, 0.0];
        let end = vec![0.0, 0.0, 0.0, 10.0];
        let allowed = vec![true; 4];

        let (s, e) = select_answer_span(&start, &end, &allowed, 2).unwrap();
        assert!(e - s < 2);
    }

    #[test]
    fn fully_masked_input_yields_no_span() {
        let start = vec![1.0, 2.0];
        let end = vec![1.0, 2.0];
        let allowed = vec![false, false];

        assert_eq!(select_answer_span(&start, &end, &allowed, 30), None);
    }
}
