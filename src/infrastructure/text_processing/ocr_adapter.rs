use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use tesseract::Tesseract;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{ContentType, Document};

const OCR_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs OCR over an uploaded image and returns the engine's raw output
/// unmodified. Tesseract reads from a file, so the bytes go through a
/// temp file first.
pub struct OcrAdapter {
    language: String,
}

impl OcrAdapter {
    pub fn new(language: String) -> Self {
        Self { language }
    }

    fn recognize(image_path: &std::path::Path, language: &str) -> Result<String, ExtractionError> {
        let tesseract = Tesseract::new(None, Some(language))
            .map_err(|e| ExtractionError::ExtractionFailed(format!("tesseract init: {e}")))?;

        let path = image_path.to_str().ok_or_else(|| {
            ExtractionError::ExtractionFailed("non-utf8 temp path".to_string())
        })?;

        let mut tesseract = tesseract
            .set_image(path)
            .map_err(|e| ExtractionError::ExtractionFailed(format!("failed to read image: {e}")))?;

        tesseract
            .get_text()
            .map_err(|e| ExtractionError::ExtractionFailed(format!("ocr failed: {e}")))
    }
}

impl Default for OcrAdapter {
    fn default() -> Self {
        Self::new("eng".to_string())
    }
}

#[async_trait]
impl TextExtractor for OcrAdapter {
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
        if document.content_type != ContentType::Image {
            return Err(ExtractionError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();
        let language = self.language.clone();

        let text = tokio::time::timeout(
            OCR_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::recognize(&temp_path, &language)),
        )
        .await
        .map_err(|_| ExtractionError::ExtractionFailed("OCR timed out".to_string()))?
        .map_err(|e| ExtractionError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(chars = text.len(), "OCR extraction complete");

        Ok(text)
    }
}
