use thiserror::Error;
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime, Time,
};

use crate::schemas::course::ScheduleDto;

const DAYS_PER_WEEK: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid course date: {0}")]
pub struct TimeError(pub String);

/// Parses a course date as sent by the backend.
///
/// Accepts a bare `YYYY-MM-DD` (midnight UTC), RFC 3339, or a date-time without an
/// offset, which is read as UTC.
pub fn parse_course_instant(value: &str) -> Result<OffsetDateTime, TimeError> {
    let trimmed = value.trim();

    if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(parsed);
    }

    if let Ok(date) = Date::parse(trimmed, format_description!("[year]-[month]-[day]")) {
        return Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc());
    }

    let naive = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let naive_fraction =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
    PrimitiveDateTime::parse(trimmed, naive)
        .or_else(|_| PrimitiveDateTime::parse(trimmed, naive_fraction))
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|_| TimeError(value.to_string()))
}

pub fn date_has_passed(value: &str, now: OffsetDateTime) -> Result<bool, TimeError> {
    Ok(now > parse_course_instant(value)?)
}

/// Start/end flags of a course as seen at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseTimeline {
    pub started: bool,
    pub ended: bool,
}

impl CourseTimeline {
    pub fn evaluate(schedule: &ScheduleDto, now: OffsetDateTime) -> Result<Self, TimeError> {
        Ok(Self {
            started: date_has_passed(&schedule.start_date, now)?,
            ended: date_has_passed(&schedule.end_date, now)?,
        })
    }
}

fn days_between(start: &str, end: &str) -> Result<i64, TimeError> {
    let start = parse_course_instant(start)?;
    let end = parse_course_instant(end)?;
    Ok((end - start).whole_days())
}

pub fn full_weeks_between(start: &str, end: &str) -> Result<i64, TimeError> {
    Ok(days_between(start, end)?.div_euclid(DAYS_PER_WEEK))
}

pub fn rounded_weeks_between(start: &str, end: &str) -> Result<i64, TimeError> {
    let days = days_between(start, end)?;
    Ok((2 * days + DAYS_PER_WEEK).div_euclid(2 * DAYS_PER_WEEK))
}

pub fn format_offset(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| value.to_string())
}
