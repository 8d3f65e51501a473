mod analysis;
mod document;

pub use analysis::{DocumentAnalysis, QaPair};
pub use document::{ContentType, Document, DocumentId};
