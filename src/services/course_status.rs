use std::collections::BTreeSet;

use crate::api::backend::EnrollmentBackend;
use crate::core::cache::{keys, CacheStore};
use crate::domain::actor::ActorContext;
use crate::domain::types::CourseStatus;
use crate::schemas::course::CourseDto;
use crate::services::access::{self, AccessError};
use crate::services::status_control::{ControlError, StatusControl, TransitionError};
use crate::services::transitions::CourseRules;

const FAILURE_HEADLINE: &str = "Failed to update course status.";

/// Status dropdown on a course page.
#[derive(Debug, Clone)]
pub struct CourseStatusControl {
    course_id: String,
    control: StatusControl<CourseRules>,
}

impl CourseStatusControl {
    /// Builds the control for an admin or one of the course's tutors.
    pub fn for_actor(actor: &ActorContext, course: &CourseDto) -> Result<Self, AccessError> {
        access::require_course_status_control(actor, course)?;
        let rules = CourseRules { is_admin: actor.is_admin() };
        let control = StatusControl::new(rules, course.status);
        Ok(Self { course_id: course.id.clone(), control })
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn current(&self) -> Option<CourseStatus> {
        self.control.current()
    }

    pub fn options(&self) -> &BTreeSet<CourseStatus> {
        self.control.options()
    }

    pub fn is_disabled(&self) -> bool {
        self.control.is_disabled()
    }

    /// Drops a change whose future was cancelled before it settled.
    pub fn abandon(&mut self) {
        self.control.revert();
    }

    pub async fn change(
        &mut self,
        backend: &dyn EnrollmentBackend,
        cache: &dyn CacheStore,
        target: CourseStatus,
    ) -> Result<CourseStatus, TransitionError> {
        let previous = self.control.current();
        self.control.begin(target)?;

        let result = match target {
            CourseStatus::Published => backend.publish_course(&self.course_id).await,
            CourseStatus::Archived => backend.archive_course(&self.course_id).await,
            // never offered by the rule table
            CourseStatus::Draft => {
                self.control.revert();
                return Err(ControlError::Illegal {
                    from: previous.map_or_else(|| "none".to_string(), |s| s.to_string()),
                    to: target.to_string(),
                }
                .into());
            }
        };

        match result {
            Ok(()) => {
                self.control.confirm();
                cache.invalidate(&keys::course(&self.course_id)).await;
                tracing::info!(
                    course_id = %self.course_id,
                    from = ?previous,
                    to = %target,
                    "Course status updated"
                );
                Ok(target)
            }
            Err(source) => {
                self.control.revert();
                tracing::warn!(
                    course_id = %self.course_id,
                    to = %target,
                    error = %source,
                    "Course status update rejected"
                );
                let message = source.user_message(FAILURE_HEADLINE);
                Err(TransitionError::Rejected { message, source })
            }
        }
    }
}
