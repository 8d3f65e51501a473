use async_trait::async_trait;

use crate::application::ports::{ModelError, Summarizer};

const SUMMARY_CHARS: usize = 200;

/// Degraded summarizer for deployments without model weights: the first
/// 200 characters of the text, with an ellipsis marker when truncated.
#[derive(Default)]
pub struct TruncationSummarizer;

impl TruncationSummarizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Summarizer for TruncationSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        let mut chars = text.chars();
        let head: String = chars.by_ref().take(SUMMARY_CHARS).collect();

        if chars.next().is_some() {
            Ok(format!("{head}..."))
        } else {
            Ok(head)
        }
    }
}
