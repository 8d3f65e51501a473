mod analysis_service;
mod paragraph_segmenter;

pub use analysis_service::{AnalysisError, AnalysisService, ANSWER_FALLBACK, QUESTION_FALLBACK};
pub use paragraph_segmenter::segment_paragraphs;
