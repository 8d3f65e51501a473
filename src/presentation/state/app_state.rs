use std::sync::Arc;

use crate::application::ports::UploadStore;
use crate::application::services::AnalysisService;
use crate::presentation::config::Settings;

/// Process-wide, read-only services shared across requests. Models are
/// loaded once at startup and injected here; handlers never construct
/// model state themselves.
pub struct AppState {
    pub analysis_service: Arc<AnalysisService>,
    pub upload_store: Arc<dyn UploadStore>,
    pub settings: Settings,
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            analysis_service: Arc::clone(&self.analysis_service),
            upload_store: Arc::clone(&self.upload_store),
            settings: self.settings.clone(),
        }
    }
}
