/// How the tracing subscriber is set up. Built once in `main` from the
/// parsed application settings; this module never reads the environment
/// itself, so settings stay the single source of truth.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool) -> Self {
        Self {
            environment: environment.into(),
            json_format,
        }
    }
}
