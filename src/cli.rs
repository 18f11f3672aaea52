use anyhow::{anyhow, Result};
use serde_json::json;
use time::OffsetDateTime;

use crate::core::time::{date_has_passed, format_offset};
use crate::services::transitions;

const USAGE: &str = "usage: enrollhub course <Status|-> [--admin] | \
                     enrollhub enrollment <Status> [--ended | --end-date <date>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseEnd {
    Flag(bool),
    /// Course end date, compared against the configured clock.
    Date(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Course { current: String, is_admin: bool },
    Enrollment { current: String, end: CourseEnd },
}

pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let kind = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let current = args.next().ok_or_else(|| anyhow!("{kind} requires a current status"))?;
    // "-" stands for a record whose status is not set
    let current = if current == "-" { String::new() } else { current };

    match kind.as_str() {
        "course" => {
            let mut is_admin = false;
            for arg in args {
                match arg.as_str() {
                    "--admin" => is_admin = true,
                    _ => return Err(anyhow!("Unknown argument: {arg}")),
                }
            }
            Ok(Command::Course { current, is_admin })
        }
        "enrollment" => {
            let mut end = CourseEnd::Flag(false);
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--ended" => end = CourseEnd::Flag(true),
                    "--end-date" => {
                        let date =
                            args.next().ok_or_else(|| anyhow!("--end-date missing value"))?;
                        end = CourseEnd::Date(date);
                    }
                    _ => return Err(anyhow!("Unknown argument: {arg}")),
                }
            }
            Ok(Command::Enrollment { current, end })
        }
        _ => Err(anyhow!("Unknown command: {kind}\n{USAGE}")),
    }
}

pub fn execute(command: &Command, now: OffsetDateTime) -> Result<String> {
    let report = match command {
        Command::Course { current, is_admin } => {
            let next = transitions::legal_next_course_statuses_str(current, *is_admin);
            json!({
                "current": current,
                "isAdmin": is_admin,
                "next": next,
                "evaluatedAt": format_offset(now)
            })
        }
        Command::Enrollment { current, end } => {
            let course_ended = match end {
                CourseEnd::Flag(ended) => *ended,
                CourseEnd::Date(date) => date_has_passed(date, now)?,
            };
            let next = transitions::legal_next_enrollment_statuses_str(current, course_ended);
            json!({
                "current": current,
                "courseEnded": course_ended,
                "next": next,
                "evaluatedAt": format_offset(now)
            })
        }
    };

    Ok(serde_json::to_string_pretty(&report)?)
}
