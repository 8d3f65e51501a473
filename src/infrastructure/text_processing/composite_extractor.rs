use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{ExtractionError, TextExtractor};
use crate::domain::{ContentType, Document};

/// Dispatches extraction to the adapter registered for the document's
/// content type.
pub struct CompositeExtractor {
    adapters: HashMap<ContentType, Arc<dyn TextExtractor>>,
}

impl CompositeExtractor {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn TextExtractor>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            ExtractionError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        adapter.extract_text(data, document).await
    }
}
