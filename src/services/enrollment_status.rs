use std::collections::BTreeSet;

use crate::api::backend::EnrollmentBackend;
use crate::core::cache::{keys, CacheStore};
use crate::core::time::CourseTimeline;
use crate::domain::actor::ActorContext;
use crate::domain::types::EnrollmentStatus;
use crate::schemas::course::CourseDto;
use crate::schemas::enrollment::{EnrollmentStatusUpdate, ExtendedEnrollmentDto};
use crate::services::access::{self, AccessError};
use crate::services::status_control::{StatusControl, TransitionError};
use crate::services::transitions::EnrollmentRules;

const FAILURE_HEADLINE: &str = "Failed to update enrollment status.";

/// Status dropdown on one roster row.
#[derive(Debug, Clone)]
pub struct EnrollmentStatusControl {
    course_id: String,
    student_profile_id: String,
    control: StatusControl<EnrollmentRules>,
}

impl EnrollmentStatusControl {
    pub fn for_actor(
        actor: &ActorContext,
        course: &CourseDto,
        row: &ExtendedEnrollmentDto,
        timeline: CourseTimeline,
    ) -> Result<Self, AccessError> {
        access::require_enrollment_status_control(actor, course)?;
        let rules = EnrollmentRules { course_ended: timeline.ended };
        Ok(Self {
            course_id: course.id.clone(),
            student_profile_id: row.student_profile.id.clone(),
            control: StatusControl::new(rules, row.status),
        })
    }

    pub fn student_profile_id(&self) -> &str {
        &self.student_profile_id
    }

    pub fn current(&self) -> Option<EnrollmentStatus> {
        self.control.current()
    }

    pub fn options(&self) -> &BTreeSet<EnrollmentStatus> {
        self.control.options()
    }

    pub fn is_disabled(&self) -> bool {
        self.control.is_disabled()
    }

    /// Re-evaluates the options when the course crosses its end date.
    pub fn set_course_ended(&mut self, ended: bool) {
        self.control.set_rules(EnrollmentRules { course_ended: ended });
    }

    pub fn abandon(&mut self) {
        self.control.revert();
    }

    pub async fn change(
        &mut self,
        backend: &dyn EnrollmentBackend,
        cache: &dyn CacheStore,
        target: EnrollmentStatus,
    ) -> Result<EnrollmentStatus, TransitionError> {
        let previous = self.control.current();
        self.control.begin(target)?;

        let update = EnrollmentStatusUpdate {
            course_id: self.course_id.clone(),
            student_profile_id: self.student_profile_id.clone(),
            new_status: target,
        };

        match backend.update_enrollment_status(&update).await {
            Ok(()) => {
                self.control.confirm();
                cache.invalidate(&keys::course_enrollments(&self.course_id)).await;
                tracing::info!(
                    course_id = %self.course_id,
                    student_profile_id = %self.student_profile_id,
                    from = ?previous,
                    to = %target,
                    "Enrollment status updated"
                );
                Ok(target)
            }
            Err(source) => {
                self.control.revert();
                tracing::warn!(
                    course_id = %self.course_id,
                    student_profile_id = %self.student_profile_id,
                    to = %target,
                    error = %source,
                    "Enrollment status update rejected"
                );
                let message = source.user_message(FAILURE_HEADLINE);
                Err(TransitionError::Rejected { message, source })
            }
        }
    }
}

/// One control per roster row, or nothing for actors who may not change statuses.
pub fn roster_controls(
    actor: &ActorContext,
    course: &CourseDto,
    rows: &[ExtendedEnrollmentDto],
    timeline: CourseTimeline,
) -> Result<Vec<EnrollmentStatusControl>, AccessError> {
    rows.iter()
        .map(|row| EnrollmentStatusControl::for_actor(actor, course, row, timeline))
        .collect()
}
