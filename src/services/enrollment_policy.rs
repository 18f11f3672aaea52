use std::fmt;

use thiserror::Error;

use crate::core::time::CourseTimeline;
use crate::domain::types::EnrollmentStatus;
use crate::schemas::course::CourseDto;
use crate::schemas::enrollment::EnrollmentDto;

/// Why a student cannot enroll. The message is shown to the student as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EnrollBlocker {
    #[error("Course already started.")]
    AlreadyStarted,
    #[error("Course has reached max capacity")]
    CapacityFull,
    #[error("Prerequisites not completed")]
    PrerequisitesIncomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentAction {
    Enroll,
    ReEnroll,
    Drop,
}

impl fmt::Display for EnrollmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EnrollmentAction::Enroll => "Enrolling",
            EnrollmentAction::ReEnroll => "Re-enrolling",
            EnrollmentAction::Drop => "Dropping",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnrollmentOptions {
    pub actions: Vec<EnrollmentAction>,
    /// Reason shown when the student could enroll or re-enroll but the checks fail.
    pub blocker: Option<EnrollBlocker>,
}

impl EnrollmentOptions {
    pub fn allows(&self, action: EnrollmentAction) -> bool {
        self.actions.contains(&action)
    }
}

/// Every prerequisite must have a `Passed` enrollment among the student's own.
pub fn prerequisites_complete(course: &CourseDto, my_enrollments: &[EnrollmentDto]) -> bool {
    course.prerequisites.iter().all(|prerequisite| {
        my_enrollments.iter().any(|enrollment| {
            enrollment.course.id == prerequisite.id
                && enrollment.status == Some(EnrollmentStatus::Passed)
        })
    })
}

/// Checks shared by enroll and re-enroll, most decisive reason first.
pub fn check_enroll_eligibility(
    course: &CourseDto,
    my_enrollments: &[EnrollmentDto],
    timeline: CourseTimeline,
) -> Result<(), EnrollBlocker> {
    if timeline.started {
        return Err(EnrollBlocker::AlreadyStarted);
    }
    if course.is_full() {
        return Err(EnrollBlocker::CapacityFull);
    }
    if !prerequisites_complete(course, my_enrollments) {
        return Err(EnrollBlocker::PrerequisitesIncomplete);
    }
    Ok(())
}

pub fn can_drop(status: Option<EnrollmentStatus>, timeline: CourseTimeline) -> bool {
    status.is_some_and(EnrollmentStatus::is_droppable) && !timeline.ended
}

/// The action the eligibility checks decide for this enrollment, if any: enroll when
/// there is none, re-enroll once it was dropped.
pub fn eligibility_gated(enrollment: Option<&EnrollmentDto>) -> Option<EnrollmentAction> {
    match enrollment {
        None => Some(EnrollmentAction::Enroll),
        Some(current) if current.status == Some(EnrollmentStatus::Dropped) => {
            Some(EnrollmentAction::ReEnroll)
        }
        Some(_) => None,
    }
}

pub fn available_actions(
    course: &CourseDto,
    enrollment: Option<&EnrollmentDto>,
    my_enrollments: &[EnrollmentDto],
    timeline: CourseTimeline,
) -> EnrollmentOptions {
    let eligibility = check_enroll_eligibility(course, my_enrollments, timeline);
    let status = enrollment.and_then(|current| current.status);
    let mut actions = Vec::new();

    match enrollment {
        None if eligibility.is_ok() => actions.push(EnrollmentAction::Enroll),
        Some(_) if eligibility.is_ok() && status == Some(EnrollmentStatus::Dropped) => {
            actions.push(EnrollmentAction::ReEnroll)
        }
        _ => {}
    }

    if can_drop(status, timeline) {
        actions.push(EnrollmentAction::Drop);
    }

    let blocker = match eligibility {
        Err(blocker) if eligibility_gated(enrollment).is_some() => Some(blocker),
        _ => None,
    };

    EnrollmentOptions { actions, blocker }
}
