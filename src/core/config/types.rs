use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
pub struct Settings {
    pub(super) runtime: RuntimeSettings,
    pub(super) api: ApiSettings,
    pub(super) cache: CacheSettings,
    pub(super) clock: ClockSettings,
    pub(super) telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub environment: Environment,
    pub strict_config: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) base_url: ApiBaseUrl,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub enabled: bool,
}

/// Optional pinned "now" used when evaluating course dates.
#[derive(Debug, Clone)]
pub struct ClockSettings {
    pub fixed_now: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct TelemetrySettings {
    pub log_level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Staging,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Test => "test",
        }
    }

    pub(super) fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ApiBaseUrl(pub(super) String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api url: {0}")]
    InvalidApiUrl(String),
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("{0} is not allowed in strict mode")]
    NotAllowedInStrictMode(&'static str),
}
