use super::document::DocumentId;

/// One generated question together with the answer extracted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: String, answer: String) -> Self {
        Self { question, answer }
    }
}

/// Everything the pipeline produces for one uploaded document. Built once
/// per request and consumed by the response; nothing here is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    pub document_id: DocumentId,
    pub text: String,
    pub summary: String,
    pub paragraphs: Vec<String>,
    pub qa_pairs: Vec<QaPair>,
}
