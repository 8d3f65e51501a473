use std::sync::Arc;

use crate::application::ports::{
    AnswerExtractor, ExtractionError, ModelError, QuestionGenerator, Summarizer, TextExtractor,
};
use crate::domain::{ContentType, Document, DocumentAnalysis, QaPair};

use super::paragraph_segmenter::segment_paragraphs;

pub const QUESTION_FALLBACK: &str = "Could not generate a question for this paragraph.";
pub const ANSWER_FALLBACK: &str = "Could not extract an answer from this paragraph.";

/// Runs the full pipeline for one uploaded document:
/// extract -> segment -> summarize -> per-paragraph question/answer.
///
/// Extraction and summarization failures abort the request; a model
/// failure on a single paragraph only degrades that paragraph's
/// question/answer pair to a fixed fallback string.
pub struct AnalysisService {
    extractor: Arc<dyn TextExtractor>,
    summarizer: Arc<dyn Summarizer>,
    question_generator: Arc<dyn QuestionGenerator>,
    answer_extractor: Arc<dyn AnswerExtractor>,
    max_questions: usize,
}

impl AnalysisService {
    pub fn new(
        extractor: Arc<dyn TextExtractor>,
        summarizer: Arc<dyn Summarizer>,
        question_generator: Arc<dyn QuestionGenerator>,
        answer_extractor: Arc<dyn AnswerExtractor>,
        max_questions: usize,
    ) -> Self {
        Self {
            extractor,
            summarizer,
            question_generator,
            answer_extractor,
            max_questions,
        }
    }

    #[tracing::instrument(skip(self, data), fields(filename = %filename, bytes = data.len()))]
    pub async fn analyze(
        &self,
        data: &[u8],
        filename: String,
        content_type: ContentType,
    ) -> Result<DocumentAnalysis, AnalysisError> {
        let document = Document::new(filename, content_type, data.len() as u64);
        let doc_id = document.id;

        let text = self.extractor.extract_text(data, &document).await?;

        let paragraphs = segment_paragraphs(&text);
        tracing::debug!(paragraph_count = paragraphs.len(), "Text segmented");

        let summary = self.summarizer.summarize(&text).await?;

        let mut qa_pairs = Vec::with_capacity(paragraphs.len().min(self.max_questions));
        for paragraph in paragraphs.iter().take(self.max_questions) {
            qa_pairs.push(self.question_and_answer(paragraph).await);
        }

        tracing::info!(
            document_id = %doc_id.as_uuid(),
            paragraph_count = paragraphs.len(),
            qa_count = qa_pairs.len(),
            "Document analysis complete"
        );

        Ok(DocumentAnalysis {
            document_id: doc_id,
            text,
            summary,
            paragraphs,
            qa_pairs,
        })
    }

    async fn question_and_answer(&self, paragraph: &str) -> QaPair {
        let question = match self.question_generator.generate_question(paragraph).await {
            Ok(Some(q)) => q,
            Ok(None) => return QaPair::new(QUESTION_FALLBACK.to_string(), String::new()),
            Err(e) => {
                tracing::warn!(error = %e, "Question generation failed for paragraph");
                return QaPair::new(QUESTION_FALLBACK.to_string(), String::new());
            }
        };

        let answer = match self.answer_extractor.extract_answer(&question, paragraph).await {
            Ok(Some(a)) => a,
            Ok(None) => ANSWER_FALLBACK.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Answer extraction failed for paragraph");
                ANSWER_FALLBACK.to_string()
            }
        };

        QaPair::new(question, answer)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("model: {0}")]
    Model(#[from] ModelError),
}
