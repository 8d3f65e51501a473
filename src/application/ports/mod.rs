mod answer_extractor;
mod model_error;
mod question_generator;
mod summarizer;
mod text_extractor;
mod upload_store;

pub use answer_extractor::AnswerExtractor;
pub use model_error::ModelError;
pub use question_generator::QuestionGenerator;
pub use summarizer::Summarizer;
pub use text_extractor::{ExtractionError, TextExtractor};
pub use upload_store::{UploadStore, UploadStoreError};
