//! Legal next statuses for courses and enrollments.
//!
//! Pure lookups: no authority checks beyond the admin flag, no persistence. An empty
//! set means "no action available" and callers disable their controls.

use std::collections::BTreeSet;

use crate::domain::types::{CourseStatus, EnrollmentStatus};

pub fn legal_next_course_statuses(
    current: Option<CourseStatus>,
    is_admin: bool,
) -> BTreeSet<CourseStatus> {
    use crate::domain::types::CourseStatus::{Archived, Draft, Published};

    let next: &[CourseStatus] = match (current, is_admin) {
        (Some(Draft), true) => &[Published, Archived],
        (Some(Draft), false) => &[Archived],
        (Some(Published), _) => &[Archived],
        (Some(Archived), true) => &[Published],
        (Some(Archived), false) => &[],
        (None, _) => &[],
    };

    next.iter().copied().collect()
}

/// Same as [`legal_next_course_statuses`] for a raw status string; unknown strings
/// have no legal transitions.
pub fn legal_next_course_statuses_str(current: &str, is_admin: bool) -> BTreeSet<CourseStatus> {
    legal_next_course_statuses(current.parse().ok(), is_admin)
}

pub fn legal_next_enrollment_statuses(
    current: Option<EnrollmentStatus>,
    course_ended: bool,
) -> BTreeSet<EnrollmentStatus> {
    use crate::domain::types::EnrollmentStatus::{
        Active, Dropped, Failed, Passed, Pending, Suspended,
    };

    let next: &[EnrollmentStatus] = match (current, course_ended) {
        (Some(Pending), false) => &[Active, Suspended],
        // TODO: confirm with product whether a still-pending enrollment needs a way out
        // once the course has ended; today it has none.
        (Some(Pending), true) => &[],
        (Some(Active), false) => &[Suspended],
        (Some(Active), true) => &[Passed, Failed, Suspended],
        (Some(Suspended), false) => &[Active],
        (Some(Suspended), true) => &[Passed, Failed],
        (Some(Passed), false) => &[],
        (Some(Passed), true) => &[Failed],
        (Some(Failed), false) => &[],
        (Some(Failed), true) => &[Passed],
        // dropping happens through the student action; re-enrolling starts a new Pending
        (Some(Dropped), _) => &[],
        (None, _) => &[],
    };

    next.iter().copied().collect()
}

pub fn legal_next_enrollment_statuses_str(
    current: &str,
    course_ended: bool,
) -> BTreeSet<EnrollmentStatus> {
    legal_next_enrollment_statuses(current.parse().ok(), course_ended)
}

pub fn is_legal_course_transition(
    from: Option<CourseStatus>,
    to: CourseStatus,
    is_admin: bool,
) -> bool {
    legal_next_course_statuses(from, is_admin).contains(&to)
}

pub fn is_legal_enrollment_transition(
    from: Option<EnrollmentStatus>,
    to: EnrollmentStatus,
    course_ended: bool,
) -> bool {
    legal_next_enrollment_statuses(from, course_ended).contains(&to)
}

/// A rule table bound to the context it is evaluated in.
pub trait TransitionRules {
    type Status: Copy + Ord + std::fmt::Debug + std::fmt::Display;

    fn legal_next(&self, current: Option<Self::Status>) -> BTreeSet<Self::Status>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseRules {
    pub is_admin: bool,
}

impl TransitionRules for CourseRules {
    type Status = CourseStatus;

    fn legal_next(&self, current: Option<CourseStatus>) -> BTreeSet<CourseStatus> {
        legal_next_course_statuses(current, self.is_admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentRules {
    pub course_ended: bool,
}

impl TransitionRules for EnrollmentRules {
    type Status = EnrollmentStatus;

    fn legal_next(&self, current: Option<EnrollmentStatus>) -> BTreeSet<EnrollmentStatus> {
        legal_next_enrollment_statuses(current, self.course_ended)
    }
}
