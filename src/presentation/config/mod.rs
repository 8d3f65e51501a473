mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalysisSettings, LoggingSettings, ModelSettings, ServerSettings, Settings, SettingsError,
    StaticFileSettings, SummarizerProvider, UploadSettings,
};
