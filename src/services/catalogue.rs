//! Filtered, paged course listings.
//!
//! Listings are always fetched fresh; only single courses go through the cache.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::api::backend::EnrollmentBackend;
use crate::api::errors::BackendError;
use crate::domain::actor::ActorContext;
use crate::domain::types::CourseStatus;
use crate::schemas::course::{CourseDto, CourseFilters};
use crate::schemas::paging::PagedResult;

const FAILURE_HEADLINE: &str = "Failed to load courses";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueScope {
    /// Discovery pages, which list published courses only.
    PublishedOnly,
    /// The status filter is honoured as given.
    AnyStatus,
}

impl CatalogueScope {
    /// Admins, and tutors looking at their own courses, may see every status.
    pub fn for_actor(actor: &ActorContext, own_courses: bool) -> Self {
        if actor.is_admin() || (own_courses && actor.is_tutor()) {
            CatalogueScope::AnyStatus
        } else {
            CatalogueScope::PublishedOnly
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("{message}")]
    Rejected { message: String, source: BackendError },
}

pub async fn browse(
    backend: &dyn EnrollmentBackend,
    mut filters: CourseFilters,
    scope: CatalogueScope,
) -> Result<PagedResult<CourseDto>, CatalogueError> {
    if scope == CatalogueScope::PublishedOnly {
        filters.status = Some(CourseStatus::Published);
    }
    filters.validate()?;

    match backend.list_courses(&filters).await {
        Ok(page) => {
            tracing::debug!(
                total = page.total,
                shown = page.items.len(),
                offset = ?filters.offset,
                "Course catalogue page loaded"
            );
            Ok(page)
        }
        Err(source) => {
            tracing::warn!(error = %source, "Course catalogue request failed");
            let message = source.user_message(FAILURE_HEADLINE);
            Err(CatalogueError::Rejected { message, source })
        }
    }
}
