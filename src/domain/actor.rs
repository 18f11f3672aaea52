use crate::core::security::SessionClaims;
use crate::domain::types::Role;
use crate::schemas::course::CourseDto;

/// Who is looking at a page, as derived from the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    pub user_id: String,
    pub role: Role,
}

impl ActorContext {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self { user_id: user_id.into(), role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_tutor(&self) -> bool {
        self.role == Role::Tutor
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }

    /// True for a tutor listed among the course's instructors.
    pub fn is_assigned_tutor(&self, course: &CourseDto) -> bool {
        self.is_tutor()
            && course.tutor_profiles.iter().any(|profile| profile.user_id == self.user_id)
    }
}

impl From<SessionClaims> for ActorContext {
    fn from(claims: SessionClaims) -> Self {
        Self { user_id: claims.sub, role: claims.role }
    }
}
