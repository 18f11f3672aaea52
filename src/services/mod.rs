pub mod access;
pub mod catalogue;
pub mod course_status;
pub mod enrollment_actions;
pub mod enrollment_policy;
pub mod enrollment_status;
pub mod profile;
pub mod queries;
pub mod status_control;
pub mod transitions;
