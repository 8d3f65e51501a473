use std::time::Duration;

use async_trait::async_trait;
use lopdf::Document as PdfDocument;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{ContentType, Document};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts plain text from PDF bytes, page by page in document order.
/// Pages with no extractable text are skipped; the remaining page texts
/// are joined by newlines and the whole result is trimmed. A parseable
/// PDF with no text layer (a scan, say) yields an empty string, not an
/// error.
#[derive(Default)]
pub struct PdfTextAdapter;

impl PdfTextAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let doc = PdfDocument::load_mem(data)
            .map_err(|e| ExtractionError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        let mut pages = Vec::new();

        for (page_number, _object_id) in doc.get_pages() {
            // A page that fails text extraction is treated the same as a
            // page with no text: skipped, order of the rest preserved.
            let text = doc.extract_text(&[page_number]).unwrap_or_default();

            if !text.trim().is_empty() {
                pages.push(text);
            }
        }

        Ok(pages)
    }
}

#[async_trait]
impl TextExtractor for PdfTextAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError> {
        if document.content_type != ContentType::Pdf {
            return Err(ExtractionError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let bytes = data.to_vec();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&bytes)),
        )
        .await
        .map_err(|_| ExtractionError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| ExtractionError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(page_count = pages.len(), "PDF text extraction complete");

        Ok(pages.join("\n").trim().to_string())
    }
}
