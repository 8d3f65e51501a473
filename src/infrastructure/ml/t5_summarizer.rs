use async_trait::async_trait;

use crate::application::ports::{ModelError, Summarizer};

use super::generation::GenerationConfig;
use super::t5::T5Generator;

const MAX_INPUT_TOKENS: usize = 1024;
const TASK_PREFIX: &str = "summarize: ";
const MIN_LENGTH_CEILING: usize = 40;

/// Abstractive summarization over the full document text via a T5-class
/// model. Input beyond the model window is truncated silently.
pub struct T5Summarizer {
    generator: T5Generator,
    generation: GenerationConfig,
}

impl T5Summarizer {
    pub fn load(model_id: &str) -> Result<Self, ModelError> {
        let generator = T5Generator::load(model_id, MAX_INPUT_TOKENS)?;
        Ok(Self {
            generator,
            generation: GenerationConfig {
                max_length: 150,
                min_length: 0,
                num_beams: 4,
                length_penalty: 2.0,
                early_stopping: true,
                no_repeat_ngram_size: 0,
            },
        })
    }
}

/// Minimum summary length, scaled to the input. A fixed floor would ban
/// EOS past a short document's whole content and force the model to pad;
/// half the input word count, capped at `MIN_LENGTH_CEILING`, keeps long
/// documents from degenerating into one-liners without that failure mode.
fn scaled_min_length(text: &str) -> usize {
    (text.split_whitespace().count() / 2).min(MIN_LENGTH_CEILING)
}

#[async_trait]
impl Summarizer for T5Summarizer {
    #[tracing::instrument(skip(self, text), fields(chars = text.len()))]
    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        let input = format!("{TASK_PREFIX}{text}");

        let mut generation = self.generation.clone();
        generation.min_length = scaled_min_length(text);

        let summary = self.generator.generate(&input, &generation)?;
        Ok(summary.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_gets_no_length_floor() {
        assert_eq!(scaled_min_length("Hello World"), 1);
        assert_eq!(scaled_min_length(""), 0);
    }

    #[test]
    fn long_input_is_capped_at_the_ceiling() {
        let text = "word ".repeat(500);
        assert_eq!(scaled_min_length(&text), MIN_LENGTH_CEILING);
    }

    #[test]
    fn min_length_never_exceeds_input_word_count() {
        for words in [1, 2, 5, 30, 79, 200] {
            let text = "word ".repeat(words);
            assert!(scaled_min_length(&text) <= words);
        }
    }
}
