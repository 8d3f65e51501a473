use async_trait::async_trait;

use crate::domain::Document;

/// Turns an uploaded byte stream into plain text. Implementations delegate
/// to an external parser (PDF) or OCR engine (images).
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError>;
}

/// Raised only for input that cannot be processed at all; a parseable
/// document that happens to contain no text is a successful, empty
/// extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
