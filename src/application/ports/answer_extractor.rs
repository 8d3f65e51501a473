use async_trait::async_trait;

use super::ModelError;

/// Extracts the best answer span for a question from a paragraph.
/// `Ok(None)` means no usable span was found.
#[async_trait]
pub trait AnswerExtractor: Send + Sync {
    async fn extract_answer(
        &self,
        question: &str,
        context: &str,
    ) -> Result<Option<String>, ModelError>;
}
