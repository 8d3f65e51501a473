use async_trait::async_trait;

use super::ModelError;

/// Produces a bounded-length summary of the full document text. Input
/// beyond the model's window is truncated silently.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, ModelError>;
}
