use std::path::PathBuf;

use super::Environment;

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub models: ModelSettings,
    pub uploads: UploadSettings,
    pub analysis: AnalysisSettings,
    pub static_files: StaticFileSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Deploy-time model backend selection. No runtime reconfiguration: the
/// selected models are loaded once at startup.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub summarizer_provider: SummarizerProvider,
    pub summarizer_model: String,
    pub question_model: String,
    pub answer_model: String,
    pub ocr_language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarizerProvider {
    T5,
    Truncation,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub dir: PathBuf,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Upper bound on question/answer pairs generated per document.
    pub max_questions: usize,
}

#[derive(Debug, Clone)]
pub struct StaticFileSettings {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub json_format: bool,
}

impl Settings {
    /// Builds settings from environment variables, falling back to
    /// defaults suitable for local development.
    pub fn from_env() -> Result<Self, SettingsError> {
        let environment = match std::env::var("APP_ENV") {
            Ok(v) => Environment::try_from(v).map_err(SettingsError::Invalid)?,
            Err(_) => Environment::Development,
        };

        // LOG_FORMAT overrides; production defaults to json output.
        let json_format = match std::env::var("LOG_FORMAT") {
            Ok(v) => v.to_lowercase() == "json",
            Err(_) => environment.is_production(),
        };

        let port = match std::env::var("SKAGEN_PORT") {
            Ok(v) => v
                .parse()
                .map_err(|_| SettingsError::Invalid(format!("invalid SKAGEN_PORT: {}", v)))?,
            Err(_) => 5000,
        };

        let summarizer_provider = match std::env::var("SKAGEN_SUMMARIZER") {
            Ok(v) => match v.to_lowercase().as_str() {
                "t5" => SummarizerProvider::T5,
                "truncation" => SummarizerProvider::Truncation,
                other => {
                    return Err(SettingsError::Invalid(format!(
                        "invalid SKAGEN_SUMMARIZER: {}. Expected: t5 or truncation",
                        other
                    )))
                }
            },
            Err(_) => SummarizerProvider::T5,
        };

        let max_file_size_mb = env_or_parse("SKAGEN_MAX_UPLOAD_MB", 25)?;
        let max_questions = env_or_parse("SKAGEN_MAX_QUESTIONS", 10)?;

        Ok(Self {
            environment,
            server: ServerSettings {
                host: env_or("SKAGEN_HOST", "0.0.0.0"),
                port,
            },
            models: ModelSettings {
                summarizer_provider,
                summarizer_model: env_or("SKAGEN_SUMMARIZER_MODEL", "t5-small"),
                question_model: env_or("SKAGEN_QUESTION_MODEL", "valhalla/t5-small-e2e-qg"),
                answer_model: env_or("SKAGEN_ANSWER_MODEL", "deepset/bert-base-cased-squad2"),
                ocr_language: env_or("SKAGEN_OCR_LANGUAGE", "eng"),
            },
            uploads: UploadSettings {
                dir: PathBuf::from(env_or("SKAGEN_UPLOAD_DIR", "uploads")),
                max_file_size_mb,
            },
            analysis: AnalysisSettings { max_questions },
            static_files: StaticFileSettings {
                dir: PathBuf::from(env_or("SKAGEN_STATIC_DIR", "static")),
            },
            logging: LoggingSettings { json_format },
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.uploads.max_file_size_mb * 1024 * 1024
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_or_parse(key: &str, default: usize) -> Result<usize, SettingsError> {
    match std::env::var(key) {
        Ok(v) => v
            .parse()
            .map_err(|_| SettingsError::Invalid(format!("invalid {}: {}", key, v))),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid setting: {0}")]
    Invalid(String),
}
