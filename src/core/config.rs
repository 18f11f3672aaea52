mod parsing;
mod settings;
mod types;

pub use types::{
    CacheSettings, ClockSettings, ConfigError, Environment, RuntimeSettings, Settings,
    TelemetrySettings,
};
