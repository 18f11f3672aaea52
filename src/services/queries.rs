use crate::api::backend::EnrollmentBackend;
use crate::api::errors::BackendError;
use crate::core::cache::{cached_fetch, keys, CacheStore};
use crate::schemas::course::CourseDto;
use crate::schemas::enrollment::{EnrollmentDto, ExtendedEnrollmentDto};
use crate::schemas::user::UserDto;

pub async fn course(
    backend: &dyn EnrollmentBackend,
    cache: &dyn CacheStore,
    course_id: &str,
) -> Result<CourseDto, BackendError> {
    cached_fetch(cache, &keys::course(course_id), || backend.get_course(course_id)).await
}

pub async fn course_roster(
    backend: &dyn EnrollmentBackend,
    cache: &dyn CacheStore,
    course_id: &str,
) -> Result<Vec<ExtendedEnrollmentDto>, BackendError> {
    cached_fetch(cache, &keys::course_enrollments(course_id), || {
        backend.get_course_enrollments(course_id)
    })
    .await
}

pub async fn my_enrollments(
    backend: &dyn EnrollmentBackend,
    cache: &dyn CacheStore,
) -> Result<Vec<EnrollmentDto>, BackendError> {
    cached_fetch(cache, keys::MY_ENROLLMENTS, || backend.get_my_enrollments()).await
}

/// Full profile of a user, including the student profile id the enrollment calls need.
pub async fn user(
    backend: &dyn EnrollmentBackend,
    cache: &dyn CacheStore,
    user_id: &str,
) -> Result<UserDto, BackendError> {
    cached_fetch(cache, &keys::user(user_id), || backend.get_user(user_id)).await
}
