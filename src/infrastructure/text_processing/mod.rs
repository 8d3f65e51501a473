mod composite_extractor;
mod ocr_adapter;
mod pdf_adapter;

pub use composite_extractor::CompositeExtractor;
pub use ocr_adapter::OcrAdapter;
pub use pdf_adapter::PdfTextAdapter;
