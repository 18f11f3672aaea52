use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::api::backend::EnrollmentBackend;
use crate::api::errors::BackendError;
use crate::domain::types::{CourseStatus, EnrollmentStatus, Role};
use crate::schemas::course::{CategoryDto, CourseDto, CourseFilters, PartialCourseDto, ScheduleDto};
use crate::schemas::enrollment::{
    EnrollRequest, EnrollmentDto, EnrollmentRef, EnrollmentStatusUpdate, ExtendedEnrollmentDto,
};
use crate::schemas::paging::PagedResult;
use crate::schemas::user::{
    PartialUserDto, StudentProfileDto, TutorProfileDto, UpdateUserRequest, UserDto,
    UserSuspensionUpdate,
};

const CONFIG_VARS: &[&str] = &[
    "ENROLLHUB_ENV",
    "ENVIRONMENT",
    "ENROLLHUB_STRICT_CONFIG",
    "ENROLLHUB_API_URL",
    "ENROLLHUB_CACHE_ENABLED",
    "ENROLLHUB_NOW",
    "ENROLLHUB_LOG_LEVEL",
    "ENROLLHUB_LOG_JSON",
];

pub(crate) const STUDENT_USER_ID: &str = "student-1";

/// Serializes tests that touch process environment variables.
pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn clear_env() {
    for key in CONFIG_VARS {
        std::env::remove_var(key);
    }
}

/// Draft course "course-1" running 2025-02-01..2025-05-30, taught by `tutor_user_ids`.
pub(crate) fn course_with_tutors(tutor_user_ids: &[&str]) -> CourseDto {
    let tutor_profiles = tutor_user_ids
        .iter()
        .enumerate()
        .map(|(index, user_id)| TutorProfileDto {
            id: format!("tp-{index}"),
            bio: String::new(),
            expertise: "Databases".to_string(),
            user_id: (*user_id).to_string(),
            first_name: "Tutor".to_string(),
            last_name: format!("{index}"),
            email: format!("{user_id}@example.com"),
        })
        .collect();

    CourseDto {
        id: "course-1".to_string(),
        title: "Relational Databases".to_string(),
        description: String::new(),
        max_capacity: Some(30),
        spots_left: Some(12),
        is_user_enrolled: None,
        status: Some(CourseStatus::Draft),
        tutor_profiles,
        category: CategoryDto { id: "cat-1".to_string(), name: "Computer Science".to_string() },
        schedule: ScheduleDto {
            start_date: "2025-02-01".to_string(),
            end_date: "2025-05-30".to_string(),
            sessions: Vec::new(),
        },
        tags: Vec::new(),
        prerequisites: Vec::new(),
        created_at: None,
    }
}

pub(crate) fn partial_course(id: &str) -> PartialCourseDto {
    PartialCourseDto { id: id.to_string(), title: format!("Course {id}") }
}

pub(crate) fn enrollment_in(course_id: &str, status: EnrollmentStatus) -> EnrollmentDto {
    EnrollmentDto {
        course: partial_course(course_id),
        user_id: STUDENT_USER_ID.to_string(),
        status: Some(status),
    }
}

/// Roster row of "course-1" for the student profile `student_profile_id`.
pub(crate) fn roster_row(
    student_profile_id: &str,
    status: EnrollmentStatus,
) -> ExtendedEnrollmentDto {
    ExtendedEnrollmentDto {
        course: partial_course("course-1"),
        status: Some(status),
        user: PartialUserDto {
            id: format!("user-{student_profile_id}"),
            first_name: "Sam".to_string(),
            last_name: "Student".to_string(),
            email: format!("{student_profile_id}@example.com"),
        },
        student_profile: StudentProfileDto {
            id: student_profile_id.to_string(),
            major: "Computer Science".to_string(),
        },
    }
}

/// Student "Sam Student" with student profile "sp-1".
pub(crate) fn student_user(user_id: &str) -> UserDto {
    UserDto {
        id: user_id.to_string(),
        email: format!("{user_id}@example.com"),
        first_name: "Sam".to_string(),
        last_name: "Student".to_string(),
        role_name: Role::Student,
        birth_date: None,
        suspended: Some(false),
        student_profile: Some(StudentProfileDto {
            id: "sp-1".to_string(),
            major: "Computer Science".to_string(),
        }),
        tutor_profile: None,
    }
}

/// In-memory backend that records every call and fails on demand.
#[derive(Default)]
pub(crate) struct MockBackend {
    course: Option<CourseDto>,
    roster: Vec<ExtendedEnrollmentDto>,
    my_enrollments: Vec<EnrollmentDto>,
    calls: StdMutex<Vec<String>>,
    failures: StdMutex<VecDeque<BackendError>>,
    stalled: AtomicBool,
}

impl MockBackend {
    pub(crate) fn with_course(course: CourseDto) -> Self {
        Self { course: Some(course), ..Self::default() }
    }

    pub(crate) fn with_my_enrollments(mut self, enrollments: Vec<EnrollmentDto>) -> Self {
        self.my_enrollments = enrollments;
        self
    }

    pub(crate) fn with_roster(mut self, roster: Vec<ExtendedEnrollmentDto>) -> Self {
        self.roster = roster;
        self
    }

    /// The next call returns `err` instead of its canned answer.
    pub(crate) fn fail_next(&self, err: BackendError) {
        self.failures.lock().expect("failures lock").push_back(err);
    }

    /// Every later write is recorded and then never answers.
    pub(crate) fn stall_writes(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) -> Result<(), BackendError> {
        self.calls.lock().expect("calls lock").push(call);
        match self.failures.lock().expect("failures lock").pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn write(&self, call: String) -> Result<(), BackendError> {
        self.record(call)?;
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        Ok(())
    }
}

/// Polls `request` until it is parked on the backend, then drops it unfinished.
pub(crate) async fn cancel_in_flight<F: std::future::Future>(request: F) {
    let outcome = tokio::time::timeout(Duration::from_millis(20), request).await;
    assert!(outcome.is_err(), "request settled instead of staying in flight");
}

#[async_trait]
impl EnrollmentBackend for MockBackend {
    async fn list_courses(
        &self,
        filters: &CourseFilters,
    ) -> Result<PagedResult<CourseDto>, BackendError> {
        let status = filters.status.map_or_else(|| "any".to_string(), |s| s.to_string());
        self.record(format!("list_courses:{status}"))?;
        let items: Vec<CourseDto> = self
            .course
            .iter()
            .filter(|course| filters.status.is_none() || course.status == filters.status)
            .cloned()
            .collect();
        Ok(PagedResult {
            total: items.len() as u64,
            items,
            limit: filters.limit.map(u64::from),
            offset: filters.offset.map(u64::from),
        })
    }

    async fn get_course(&self, course_id: &str) -> Result<CourseDto, BackendError> {
        self.record(format!("get_course:{course_id}"))?;
        self.course
            .clone()
            .filter(|course| course.id == course_id)
            .ok_or_else(|| BackendError::rejected(404, "Course not found"))
    }

    async fn get_course_enrollments(
        &self,
        course_id: &str,
    ) -> Result<Vec<ExtendedEnrollmentDto>, BackendError> {
        self.record(format!("get_course_enrollments:{course_id}"))?;
        Ok(self.roster.iter().filter(|row| row.course.id == course_id).cloned().collect())
    }

    async fn get_my_enrollments(&self) -> Result<Vec<EnrollmentDto>, BackendError> {
        self.record("get_my_enrollments".to_string())?;
        Ok(self.my_enrollments.clone())
    }

    async fn get_user(&self, user_id: &str) -> Result<UserDto, BackendError> {
        self.record(format!("get_user:{user_id}"))?;
        Ok(student_user(user_id))
    }

    async fn update_me(&self, update: &UpdateUserRequest) -> Result<UserDto, BackendError> {
        self.write("update_me".to_string()).await?;
        let mut user = student_user(STUDENT_USER_ID);
        if let Some(first_name) = &update.first_name {
            user.first_name = first_name.clone();
        }
        if let (Some(major), Some(profile)) = (&update.major, user.student_profile.as_mut()) {
            profile.major = major.clone();
        }
        Ok(user)
    }

    async fn set_user_suspended(
        &self,
        user_id: &str,
        update: &UserSuspensionUpdate,
    ) -> Result<UserDto, BackendError> {
        self.write(format!("set_user_suspended:{user_id}:{}", update.is_suspended)).await?;
        Ok(UserDto { suspended: Some(update.is_suspended), ..student_user(user_id) })
    }

    async fn publish_course(&self, course_id: &str) -> Result<(), BackendError> {
        self.write(format!("publish_course:{course_id}")).await
    }

    async fn archive_course(&self, course_id: &str) -> Result<(), BackendError> {
        self.write(format!("archive_course:{course_id}")).await
    }

    async fn update_enrollment_status(
        &self,
        update: &EnrollmentStatusUpdate,
    ) -> Result<(), BackendError> {
        self.write(format!(
            "update_enrollment_status:{}:{}:{}",
            update.course_id, update.student_profile_id, update.new_status
        ))
        .await
    }

    async fn enroll(&self, request: &EnrollRequest) -> Result<EnrollmentDto, BackendError> {
        self.write(format!("enroll:{}", request.course_id)).await?;
        Ok(enrollment_in(&request.course_id, EnrollmentStatus::Pending))
    }

    async fn re_enroll(&self, request: &EnrollmentRef) -> Result<EnrollmentDto, BackendError> {
        let call = format!("re_enroll:{}:{}", request.course_id, request.student_profile_id);
        self.write(call).await?;
        Ok(enrollment_in(&request.course_id, EnrollmentStatus::Pending))
    }

    async fn drop_course(&self, request: &EnrollmentRef) -> Result<EnrollmentDto, BackendError> {
        let call = format!("drop_course:{}:{}", request.course_id, request.student_profile_id);
        self.write(call).await?;
        Ok(enrollment_in(&request.course_id, EnrollmentStatus::Dropped))
    }
}
