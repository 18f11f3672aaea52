use std::sync::Arc;

use time::OffsetDateTime;

use super::parsing::{
    env_optional, env_or_default, normalize_api_url, parse_bool, parse_environment,
    parse_fixed_now,
};
use super::types::{
    ApiBaseUrl, ApiSettings, CacheSettings, ClockSettings, ConfigError, RuntimeSettings, Settings,
    TelemetrySettings,
};
use crate::core::cache::{CacheStore, MemoryCache, NoopCache};

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = parse_environment(
            env_optional("ENROLLHUB_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );
        let strict_config =
            env_optional("ENROLLHUB_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let base_url =
            normalize_api_url(env_or_default("ENROLLHUB_API_URL", "http://localhost:5000/api"))?;

        let cache_enabled =
            env_optional("ENROLLHUB_CACHE_ENABLED").map(|value| parse_bool(&value)).unwrap_or(true);

        let fixed_now = parse_fixed_now("ENROLLHUB_NOW", env_optional("ENROLLHUB_NOW"))?;

        let log_level = env_or_default("ENROLLHUB_LOG_LEVEL", "info");
        let json =
            env_optional("ENROLLHUB_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { base_url: ApiBaseUrl(base_url) },
            cache: CacheSettings { enabled: cache_enabled },
            clock: ClockSettings { fixed_now },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Base URL of the REST API. The crate never calls it itself: the host reads it
    /// when it builds its `EnrollmentBackend` client.
    pub fn api_base_url(&self) -> &str {
        &self.api.base_url.0
    }

    pub fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    pub fn cache(&self) -> &CacheSettings {
        &self.cache
    }

    pub fn clock(&self) -> &ClockSettings {
        &self.clock
    }

    pub fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    /// The moment course dates are compared against.
    pub fn now(&self) -> OffsetDateTime {
        self.clock.fixed_now.unwrap_or_else(OffsetDateTime::now_utc)
    }

    pub fn cache_store(&self) -> Arc<dyn CacheStore> {
        if self.cache.enabled {
            Arc::new(MemoryCache::new())
        } else {
            Arc::new(NoopCache)
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        let url = self.api_base_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(url.to_string()));
        }

        if self.clock.fixed_now.is_some() {
            return Err(ConfigError::NotAllowedInStrictMode("ENROLLHUB_NOW"));
        }

        Ok(())
    }
}
