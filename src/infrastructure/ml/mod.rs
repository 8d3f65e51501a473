mod bert_answer_extractor;
pub mod generation;
mod t5;
mod t5_question_generator;
mod t5_summarizer;
mod truncation_summarizer;

pub use bert_answer_extractor::{select_answer_span, BertAnswerExtractor};
pub use t5_question_generator::T5QuestionGenerator;
pub use t5_summarizer::T5Summarizer;
pub use truncation_summarizer::TruncationSummarizer;

use candle_core::{DType, Device};

fn select_device() -> Device {
    Device::new_metal(0).unwrap_or(Device::Cpu)
}

fn select_dtype(device: &Device) -> DType {
    if device.is_cpu() {
        DType::F32
    } else {
        DType::F16
    }
}
