use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::actor::ActorContext;
use crate::domain::types::CourseStatus;
use crate::schemas::course::CourseDto;
use crate::services::transitions;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("{0}")]
    Forbidden(&'static str),
}

pub fn can_manage_course_status(actor: &ActorContext, course: &CourseDto) -> bool {
    actor.is_admin() || actor.is_assigned_tutor(course)
}

pub fn can_manage_enrollment_status(actor: &ActorContext, course: &CourseDto) -> bool {
    actor.is_admin() || actor.is_assigned_tutor(course)
}

/// Enroll, re-enroll and drop are offered to students only.
pub fn can_use_enrollment_actions(actor: &ActorContext) -> bool {
    actor.is_student()
}

pub fn require_course_status_control(
    actor: &ActorContext,
    course: &CourseDto,
) -> Result<(), AccessError> {
    if can_manage_course_status(actor, course) {
        Ok(())
    } else {
        Err(AccessError::Forbidden("Only an admin or an assigned tutor can change course status"))
    }
}

pub fn require_enrollment_status_control(
    actor: &ActorContext,
    course: &CourseDto,
) -> Result<(), AccessError> {
    if can_manage_enrollment_status(actor, course) {
        Ok(())
    } else {
        Err(AccessError::Forbidden(
            "Only an admin or an assigned tutor can change enrollment status",
        ))
    }
}

pub fn require_enrollment_actions(actor: &ActorContext) -> Result<(), AccessError> {
    if can_use_enrollment_actions(actor) {
        Ok(())
    } else {
        Err(AccessError::Forbidden("Only students can enroll in courses"))
    }
}

/// Admins may suspend any account except their own.
pub fn can_toggle_suspension(actor: &ActorContext, target_user_id: &str) -> bool {
    actor.is_admin() && actor.user_id != target_user_id
}

pub fn require_suspension_control(
    actor: &ActorContext,
    target_user_id: &str,
) -> Result<(), AccessError> {
    if can_toggle_suspension(actor, target_user_id) {
        Ok(())
    } else {
        Err(AccessError::Forbidden("Only an admin can suspend another user"))
    }
}

/// Course status options for this actor, after gating.
pub fn course_status_choices(
    actor: &ActorContext,
    course: &CourseDto,
) -> Result<BTreeSet<CourseStatus>, AccessError> {
    require_course_status_control(actor, course)?;
    Ok(transitions::legal_next_course_statuses(course.status, actor.is_admin()))
}
