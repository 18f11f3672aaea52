use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::types::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_name: Role,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub suspended: Option<bool>,
    #[serde(default)]
    pub student_profile: Option<StudentProfileDto>,
    #[serde(default)]
    pub tutor_profile: Option<TutorBioDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialUserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfileDto {
    pub id: String,
    pub major: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorBioDto {
    pub id: String,
    pub bio: String,
    pub expertise: String,
}

/// Tutor profile as embedded in a course, carrying the owning user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfileDto {
    pub id: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub expertise: String,
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "first name must not be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name must not be empty"))]
    pub last_name: String,
    pub birthdate: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters long"))]
    pub password: String,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

/// Role-specific part of a registration, flattened next to the common fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Admin,
    Tutor { bio: String, expertise: String },
    Student { major: String },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Admin => Role::Admin,
            RoleProfile::Tutor { .. } => Role::Tutor,
            RoleProfile::Student { .. } => Role::Student,
        }
    }
}

impl RegisterRequest {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn endpoint(&self) -> String {
        format!("/auth/register-{}", self.role())
    }
}

/// Body of `PATCH /users/me`. Unset fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_has_changes"))]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
}

impl UpdateUserRequest {
    /// Treats blank form fields as "leave unchanged".
    pub fn without_blanks(self) -> Self {
        fn keep(value: Option<String>) -> Option<String> {
            value.filter(|text| !text.trim().is_empty())
        }
        Self {
            first_name: keep(self.first_name),
            last_name: keep(self.last_name),
            birth_date: keep(self.birth_date),
            bio: keep(self.bio),
            expertise: keep(self.expertise),
            major: keep(self.major),
        }
    }

    pub fn has_changes(&self) -> bool {
        [
            &self.first_name,
            &self.last_name,
            &self.birth_date,
            &self.bio,
            &self.expertise,
            &self.major,
        ]
        .iter()
        .any(|field| field.is_some())
    }
}

fn validate_has_changes(request: &UpdateUserRequest) -> Result<(), ValidationError> {
    if request.has_changes() {
        return Ok(());
    }
    let mut err = ValidationError::new("no_changes");
    err.message = Some("at least one profile field must be set".into());
    Err(err)
}

/// Body of `PATCH /users/{id}` used by admins to suspend or restore an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSuspensionUpdate {
    pub is_suspended: bool,
}
