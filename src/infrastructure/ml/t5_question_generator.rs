use async_trait::async_trait;

use crate::application::ports::{ModelError, QuestionGenerator};

use super::generation::GenerationConfig;
use super::t5::T5Generator;

const MAX_INPUT_TOKENS: usize = 512;
const TASK_PREFIX: &str = "generate questions: ";

/// Generates one question per paragraph via a T5-class
/// question-generation model. Models trained for multi-question output
/// separate questions with "<sep>"; only the first is kept.
pub struct T5QuestionGenerator {
    generator: T5Generator,
    generation: GenerationConfig,
}

impl T5QuestionGenerator {
    pub fn load(model_id: &str) -> Result<Self, ModelError> {
        let generator = T5Generator::load(model_id, MAX_INPUT_TOKENS)?;
        Ok(Self {
            generator,
            generation: GenerationConfig {
                max_length: 64,
                min_length: 10,
                num_beams: 4,
                length_penalty: 1.0,
                early_stopping: true,
                no_repeat_ngram_size: 2,
            },
        })
    }
}

#[async_trait]
impl QuestionGenerator for T5QuestionGenerator {
    #[tracing::instrument(skip(self, paragraph), fields(chars = paragraph.len()))]
    async fn generate_question(&self, paragraph: &str) -> Result<Option<String>, ModelError> {
        let input = format!("{TASK_PREFIX}{paragraph}");
        let output = self.generator.generate(&input, &self.generation)?;

        let question = output
            .split("<sep>")
            .next()
            .unwrap_or("")
            .trim()
            .to_string();

        if question.is_empty() {
            tracing::debug!("Question generation produced empty output");
            Ok(None)
        } else {
            Ok(Some(question))
        }
    }
}
