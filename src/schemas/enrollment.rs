use serde::{Deserialize, Serialize};

use crate::domain::types::{lenient_status, EnrollmentStatus};
use crate::schemas::course::PartialCourseDto;
use crate::schemas::user::{PartialUserDto, StudentProfileDto};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentDto {
    pub course: PartialCourseDto,
    pub user_id: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<EnrollmentStatus>,
}

/// Enrollment row as listed on a course roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedEnrollmentDto {
    pub course: PartialCourseDto,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<EnrollmentStatus>,
    pub user: PartialUserDto,
    pub student_profile: StudentProfileDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub course_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRef {
    pub course_id: String,
    pub student_profile_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentStatusUpdate {
    pub course_id: String,
    pub student_profile_id: String,
    pub new_status: EnrollmentStatus,
}
