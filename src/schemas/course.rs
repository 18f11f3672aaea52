use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::core::time::{self, TimeError};
use crate::domain::types::{lenient_status, CourseStatus};
use crate::schemas::user::TutorProfileDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    #[serde(default)]
    pub spots_left: Option<u32>,
    #[serde(default)]
    pub is_user_enrolled: Option<bool>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<CourseStatus>,
    #[serde(default)]
    pub tutor_profiles: Vec<TutorProfileDto>,
    pub category: CategoryDto,
    pub schedule: ScheduleDto,
    #[serde(default)]
    pub tags: Vec<TagDto>,
    #[serde(default)]
    pub prerequisites: Vec<PartialCourseDto>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl CourseDto {
    /// Capacity is only enforced when a positive maximum is set.
    pub fn is_full(&self) -> bool {
        matches!(self.max_capacity, Some(max) if max > 0) && self.spots_left == Some(0)
    }

    pub fn duration_weeks(&self) -> Result<i64, TimeError> {
        time::rounded_weeks_between(&self.schedule.start_date, &self.schedule.end_date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCourseDto {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDto {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub sessions: Vec<ScheduleSessionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSessionDto {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseSortOption {
    Enrollments,
    SpotsLeft,
    Title,
}

/// Query of the course catalogue, sent as URL parameters (`tagIds` repeated).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CourseStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutor_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<CourseSortOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_asc: Option<bool>,
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl CourseFilters {
    /// Filters for page `page` (zero based) of `limit` courses each.
    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(page.saturating_mul(limit));
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub max_capacity: Option<u32>,
    #[validate(length(min = 1, message = "category must be selected"))]
    pub category_id: String,
    #[validate(nested)]
    pub schedule: ScheduleCreate,
    #[serde(default)]
    pub tag_ids: Vec<String>,
    #[serde(default)]
    pub prerequisite_ids: Vec<String>,
}

/// Same body as creation; the backend replaces every field.
pub type CourseUpdate = CourseCreate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_schedule_range"))]
pub struct ScheduleCreate {
    pub start_date: String,
    pub end_date: String,
    #[validate(nested)]
    #[serde(default)]
    pub sessions: Vec<ScheduleSessionCreate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSessionCreate {
    /// 0 = Monday .. 6 = Sunday.
    #[validate(range(max = 6, message = "day_of_week must be between 0 and 6"))]
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
}

fn validate_schedule_range(schedule: &ScheduleCreate) -> Result<(), ValidationError> {
    let start = time::parse_course_instant(&schedule.start_date)
        .map_err(|_| ValidationError::new("invalid_start_date"))?;
    let end = time::parse_course_instant(&schedule.end_date)
        .map_err(|_| ValidationError::new("invalid_end_date"))?;
    if end < start {
        let mut err = ValidationError::new("end_before_start");
        err.message = Some("end date must not be before start date".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_body() -> CourseCreate {
        CourseCreate {
            title: "Linear Algebra".to_string(),
            description: "Vectors and matrices".to_string(),
            max_capacity: Some(30),
            category_id: "cat-1".to_string(),
            schedule: ScheduleCreate {
                start_date: "2025-02-01".to_string(),
                end_date: "2025-05-30".to_string(),
                sessions: vec![ScheduleSessionCreate {
                    day_of_week: 2,
                    start_time: "10:00".to_string(),
                    end_time: "11:30".to_string(),
                    location: "Room 101".to_string(),
                }],
            },
            tag_ids: vec![],
            prerequisite_ids: vec!["course-0".to_string()],
        }
    }

    #[test]
    fn course_dto_reads_backend_payload() {
        let course: CourseDto = serde_json::from_value(json!({
            "id": "c1",
            "title": "Databases",
            "description": "SQL",
            "maxCapacity": 20,
            "spotsLeft": 0,
            "status": "Published",
            "tutorProfiles": [{
                "id": "tp1", "bio": "", "expertise": "", "userId": "u9",
                "firstName": "Ana", "lastName": "Lee", "email": "ana@example.com"
            }],
            "category": { "id": "cat", "name": "CS" },
            "schedule": { "startDate": "2025-01-01", "endDate": "2025-03-01", "sessions": [] }
        }))
        .expect("course payload");

        assert_eq!(course.status, Some(CourseStatus::Published));
        assert_eq!(course.tutor_profiles[0].user_id, "u9");
        assert!(course.prerequisites.is_empty());
        assert!(course.is_full());
    }

    #[test]
    fn unknown_course_status_becomes_none() {
        let course: CourseDto = serde_json::from_value(json!({
            "id": "c1",
            "title": "Databases",
            "status": "Bogus",
            "category": { "id": "cat", "name": "CS" },
            "schedule": { "startDate": "2025-01-01", "endDate": "2025-03-01" }
        }))
        .expect("course payload");
        assert_eq!(course.status, None);
    }

    #[test]
    fn zero_capacity_means_unlimited() {
        let mut course: CourseDto = serde_json::from_value(json!({
            "id": "c1",
            "title": "Open",
            "maxCapacity": 0,
            "spotsLeft": 0,
            "category": { "id": "cat", "name": "CS" },
            "schedule": { "startDate": "2025-01-01", "endDate": "2025-01-29" }
        }))
        .expect("course payload");
        assert!(!course.is_full());
        course.max_capacity = None;
        assert!(!course.is_full());
        assert_eq!(course.duration_weeks().unwrap(), 4);
    }

    #[test]
    fn course_filters_serialize_only_set_fields() {
        let filters = CourseFilters {
            title: Some("data".to_string()),
            status: Some(CourseStatus::Published),
            tag_ids: vec!["t1".to_string(), "t2".to_string()],
            sort_by: Some(CourseSortOption::SpotsLeft),
            ..Default::default()
        }
        .page(3, 2);

        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({
                "title": "data",
                "status": "Published",
                "tagIds": ["t1", "t2"],
                "sortBy": "SpotsLeft",
                "limit": 2,
                "offset": 6
            })
        );
        assert!(filters.validate().is_ok());
    }

    #[test]
    fn course_filters_reject_zero_limit() {
        let filters = CourseFilters::default().page(0, 0);
        let rendered = filters.validate().unwrap_err().to_string();
        assert!(rendered.contains("limit must be between 1 and 100"));
    }

    #[test]
    fn course_create_accepts_valid_body() {
        assert!(create_body().validate().is_ok());
    }

    #[test]
    fn course_create_rejects_reversed_schedule() {
        let mut body = create_body();
        body.schedule.end_date = "2025-01-01".to_string();
        let errors = body.validate().unwrap_err();
        assert!(errors.to_string().contains("end date must not be before start date"));
    }

    #[test]
    fn course_create_rejects_bad_weekday_and_empty_title() {
        let mut body = create_body();
        body.title.clear();
        body.schedule.sessions[0].day_of_week = 7;
        let errors = body.validate().unwrap_err();
        let rendered = errors.to_string();
        assert!(rendered.contains("title must not be empty"));
        assert!(rendered.contains("day_of_week must be between 0 and 6"));
    }
}
