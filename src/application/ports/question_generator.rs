use async_trait::async_trait;

use super::ModelError;

/// Generates one question from one paragraph. `Ok(None)` means the model
/// produced nothing usable; the pipeline decides how to degrade.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_question(&self, paragraph: &str) -> Result<Option<String>, ModelError>;
}
