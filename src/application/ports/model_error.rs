/// Failures from the model adapters. Load failures happen once, at
/// startup, and are fatal; inference failures are per-call.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model load failed: {0}")]
    LoadFailed(String),
    #[error("tokenization failed: {0}")]
    TokenizationFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
