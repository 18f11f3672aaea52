//! Enroll, re-enroll and drop buttons on a course page, as seen by a student.
//!
//! Buttons are only offered when the eligibility checks pass, and the server has the
//! final word: its rejection text is passed through untouched.

use thiserror::Error;
use time::OffsetDateTime;

use crate::api::backend::EnrollmentBackend;
use crate::api::errors::BackendError;
use crate::core::cache::{keys, CacheStore};
use crate::core::time::{CourseTimeline, TimeError};
use crate::domain::actor::ActorContext;
use crate::schemas::course::CourseDto;
use crate::schemas::enrollment::{EnrollRequest, EnrollmentDto, EnrollmentRef};
use crate::services::access::{self, AccessError};
use crate::services::enrollment_policy::{
    self, EnrollBlocker, EnrollmentAction, EnrollmentOptions,
};
use crate::services::queries;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Blocked(#[from] EnrollBlocker),
    #[error("{0} is not available for this course right now.")]
    NotAvailable(EnrollmentAction),
    #[error("another enrollment request is still running")]
    Busy,
    #[error("student profile is missing")]
    MissingStudentProfile,
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("{message}")]
    Rejected { message: String, source: BackendError },
}

#[derive(Debug, Clone)]
pub struct EnrollmentActions {
    course: CourseDto,
    timeline: CourseTimeline,
    student_profile_id: Option<String>,
    my_enrollments: Vec<EnrollmentDto>,
    enrollment: Option<EnrollmentDto>,
    submitting: bool,
}

impl EnrollmentActions {
    pub fn new(
        course: CourseDto,
        timeline: CourseTimeline,
        student_profile_id: Option<String>,
        my_enrollments: Vec<EnrollmentDto>,
    ) -> Self {
        let enrollment = my_enrollments.iter().find(|mine| mine.course.id == course.id).cloned();
        Self { course, timeline, student_profile_id, my_enrollments, enrollment, submitting: false }
    }

    /// Gates on the student role, then loads the student's enrollments through `cache`.
    pub async fn load(
        actor: &ActorContext,
        backend: &dyn EnrollmentBackend,
        cache: &dyn CacheStore,
        course: CourseDto,
        student_profile_id: Option<String>,
        now: OffsetDateTime,
    ) -> Result<Self, ActionError> {
        access::require_enrollment_actions(actor)?;
        let timeline = CourseTimeline::evaluate(&course.schedule, now)?;
        let my_enrollments = queries::my_enrollments(backend, cache).await?;
        Ok(Self::new(course, timeline, student_profile_id, my_enrollments))
    }

    pub fn options(&self) -> EnrollmentOptions {
        enrollment_policy::available_actions(
            &self.course,
            self.enrollment.as_ref(),
            &self.my_enrollments,
            self.timeline,
        )
    }

    pub fn enrollment(&self) -> Option<&EnrollmentDto> {
        self.enrollment.as_ref()
    }

    pub fn timeline(&self) -> CourseTimeline {
        self.timeline
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Clears the in-flight flag after a cancelled request.
    pub fn abandon(&mut self) {
        self.submitting = false;
    }

    pub async fn enroll(
        &mut self,
        backend: &dyn EnrollmentBackend,
        cache: &dyn CacheStore,
    ) -> Result<EnrollmentDto, ActionError> {
        self.start(EnrollmentAction::Enroll)?;
        let request = EnrollRequest { course_id: self.course.id.clone() };
        let result = backend.enroll(&request).await;
        self.finish(
            EnrollmentAction::Enroll,
            result,
            cache,
            "Failed to enroll you into this course.",
        )
        .await
    }

    pub async fn re_enroll(
        &mut self,
        backend: &dyn EnrollmentBackend,
        cache: &dyn CacheStore,
    ) -> Result<EnrollmentDto, ActionError> {
        let request = self.enrollment_ref()?;
        self.start(EnrollmentAction::ReEnroll)?;
        let result = backend.re_enroll(&request).await;
        self.finish(
            EnrollmentAction::ReEnroll,
            result,
            cache,
            "Failed to reenroll you into this course.",
        )
        .await
    }

    pub async fn drop_out(
        &mut self,
        backend: &dyn EnrollmentBackend,
        cache: &dyn CacheStore,
    ) -> Result<EnrollmentDto, ActionError> {
        let request = self.enrollment_ref()?;
        self.start(EnrollmentAction::Drop)?;
        let result = backend.drop_course(&request).await;
        self.finish(EnrollmentAction::Drop, result, cache, "Failed to drop this course.").await
    }

    fn enrollment_ref(&self) -> Result<EnrollmentRef, ActionError> {
        let student_profile_id =
            self.student_profile_id.clone().ok_or(ActionError::MissingStudentProfile)?;
        Ok(EnrollmentRef { course_id: self.course.id.clone(), student_profile_id })
    }

    fn start(&mut self, action: EnrollmentAction) -> Result<(), ActionError> {
        if self.submitting {
            return Err(ActionError::Busy);
        }
        let options = self.options();
        if !options.allows(action) {
            let gated = enrollment_policy::eligibility_gated(self.enrollment.as_ref());
            return Err(match options.blocker {
                Some(blocker) if gated == Some(action) => ActionError::Blocked(blocker),
                _ => ActionError::NotAvailable(action),
            });
        }
        self.submitting = true;
        Ok(())
    }

    async fn finish(
        &mut self,
        action: EnrollmentAction,
        result: Result<EnrollmentDto, BackendError>,
        cache: &dyn CacheStore,
        headline: &str,
    ) -> Result<EnrollmentDto, ActionError> {
        self.submitting = false;
        match result {
            Ok(enrollment) => {
                let course_id = &self.course.id;
                match self.my_enrollments.iter_mut().find(|mine| &mine.course.id == course_id) {
                    Some(existing) => *existing = enrollment.clone(),
                    None => self.my_enrollments.push(enrollment.clone()),
                }
                self.enrollment = Some(enrollment.clone());
                cache.invalidate(keys::MY_ENROLLMENTS).await;
                tracing::info!(
                    course_id = %self.course.id,
                    ?action,
                    status = ?enrollment.status,
                    "Enrollment action applied"
                );
                Ok(enrollment)
            }
            Err(source) => {
                tracing::warn!(
                    course_id = %self.course.id,
                    ?action,
                    error = %source,
                    "Enrollment action rejected"
                );
                let message = source.user_message(headline);
                Err(ActionError::Rejected { message, source })
            }
        }
    }
}
