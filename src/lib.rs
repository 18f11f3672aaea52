pub mod api;
pub mod cli;
pub mod core;
pub mod domain;
pub mod schemas;
pub mod services;

#[cfg(test)]
mod test_support;

pub use crate::api::backend::EnrollmentBackend;
pub use crate::api::errors::BackendError;
pub use crate::core::cache::{CacheStore, MemoryCache, NoopCache};
pub use crate::domain::actor::ActorContext;
pub use crate::domain::types::{CourseStatus, EnrollmentStatus, Role};
pub use crate::services::transitions::{
    legal_next_course_statuses, legal_next_course_statuses_str, legal_next_enrollment_statuses,
    legal_next_enrollment_statuses_str,
};

use crate::core::{config::Settings, telemetry};

/// Entry point of the `enrollhub` binary: evaluates one rule-table query and returns
/// the JSON to print.
pub fn run_cli<I>(args: I) -> anyhow::Result<String>
where
    I: IntoIterator<Item = String>,
{
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;

    let command = cli::parse_args(args)?;
    tracing::debug!(
        ?command,
        environment = %settings.runtime().environment.as_str(),
        api_base_url = %settings.api_base_url(),
        "Evaluating status transitions"
    );

    cli::execute(&command, settings.now())
}
