use std::sync::Arc;

use async_trait::async_trait;

use skagen::application::ports::{
    AnswerExtractor, ExtractionError, ModelError, QuestionGenerator, Summarizer, TextExtractor,
};
use skagen::application::services::AnalysisService;
use skagen::domain::{ContentType, Document};

struct FixedTextExtractor {
    text: String,
}

#[async_trait]
impl TextExtractor for FixedTextExtractor {
    async fn extract_text(
        &self,
        _data: &[u8],
        _document: &Document,
    ) -> Result<String, ExtractionError> {
        Ok(self.text.clone())
    }
}

struct EchoSummarizer;

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        Ok(text.to_string())
    }
}

struct CountingQuestionGenerator;

#[async_trait]
impl QuestionGenerator for CountingQuestionGenerator {
    async fn generate_question(&self, paragraph: &str) -> Result<Option<String>, ModelError> {
        Ok(Some(format!("What about: {}?", paragraph)))
    }
}

struct FixedAnswerExtractor;

#[async_trait]
impl AnswerExtractor for FixedAnswerExtractor {
    async fn extract_answer(
        &self,
        _question: &str,
        context: &str,
    ) -> Result<Option<String>, ModelError> {
        Ok(Some(context.to_string()))
    }
}

fn service_with_max_questions(text: &str, max_questions: usize) -> AnalysisService {
    AnalysisService::new(
        Arc::new(FixedTextExtractor {
            text: text.to_string(),
        }),
        Arc::new(EchoSummarizer),
        Arc::new(CountingQuestionGenerator),
        Arc::new(FixedAnswerExtractor),
        max_questions,
    )
}

#[tokio::test]
async fn given_more_paragraphs_than_the_question_cap_when_analyzing_then_pairs_are_capped() {
    let text = "Para one.\n\nPara two.\n\nPara three.\n\nPara four.";
    let service = service_with_max_questions(text, 2);

    let analysis = service
        .analyze(b"bytes", "doc.pdf".to_string(), ContentType::Pdf)
        .await
        .unwrap();

    // All paragraphs survive in the response; only question/answer
    // generation is bounded, and it covers the leading paragraphs.
    assert_eq!(analysis.paragraphs.len(), 4);
    assert_eq!(analysis.qa_pairs.len(), 2);
    assert_eq!(analysis.qa_pairs[0].question, "What about: Para one.?");
    assert_eq!(analysis.qa_pairs[1].question, "What about: Para two.?");
}

#[tokio::test]
async fn given_fewer_paragraphs_than_the_cap_when_analyzing_then_every_paragraph_gets_a_pair() {
    let text = "Para one.\n\nPara two.";
    let service = service_with_max_questions(text, 10);

    let analysis = service
        .analyze(b"bytes", "doc.pdf".to_string(), ContentType::Pdf)
        .await
        .unwrap();

    assert_eq!(analysis.qa_pairs.len(), 2);
}
