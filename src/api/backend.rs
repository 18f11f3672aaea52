use async_trait::async_trait;

use crate::api::errors::BackendError;
use crate::schemas::course::{CourseDto, CourseFilters};
use crate::schemas::enrollment::{
    EnrollRequest, EnrollmentDto, EnrollmentRef, EnrollmentStatusUpdate, ExtendedEnrollmentDto,
};
use crate::schemas::paging::PagedResult;
use crate::schemas::user::{UpdateUserRequest, UserDto, UserSuspensionUpdate};

/// The REST endpoints this crate drives. Implemented by the host application's HTTP
/// client; every status change is re-validated by the server.
#[async_trait]
pub trait EnrollmentBackend: Send + Sync {
    /// `GET /courses`: one page of the catalogue.
    async fn list_courses(
        &self,
        filters: &CourseFilters,
    ) -> Result<PagedResult<CourseDto>, BackendError>;

    async fn get_course(&self, course_id: &str) -> Result<CourseDto, BackendError>;

    async fn get_course_enrollments(
        &self,
        course_id: &str,
    ) -> Result<Vec<ExtendedEnrollmentDto>, BackendError>;

    /// Enrollments of the signed-in student.
    async fn get_my_enrollments(&self) -> Result<Vec<EnrollmentDto>, BackendError>;

    async fn get_user(&self, user_id: &str) -> Result<UserDto, BackendError>;

    /// `PATCH /users/me` for the signed-in user.
    async fn update_me(&self, update: &UpdateUserRequest) -> Result<UserDto, BackendError>;

    async fn set_user_suspended(
        &self,
        user_id: &str,
        update: &UserSuspensionUpdate,
    ) -> Result<UserDto, BackendError>;

    async fn publish_course(&self, course_id: &str) -> Result<(), BackendError>;

    async fn archive_course(&self, course_id: &str) -> Result<(), BackendError>;

    async fn update_enrollment_status(
        &self,
        update: &EnrollmentStatusUpdate,
    ) -> Result<(), BackendError>;

    async fn enroll(&self, request: &EnrollRequest) -> Result<EnrollmentDto, BackendError>;

    async fn re_enroll(&self, request: &EnrollmentRef) -> Result<EnrollmentDto, BackendError>;

    async fn drop_course(&self, request: &EnrollmentRef) -> Result<EnrollmentDto, BackendError>;
}
