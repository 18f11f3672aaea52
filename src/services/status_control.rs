//! Selectable-status state behind a status dropdown.
//!
//! The control is disabled (no options) while a change is in flight, and on failure
//! falls back to the last status the server confirmed.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::api::errors::BackendError;
use crate::services::access::AccessError;
use crate::services::transitions::TransitionRules;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("a status change is already in progress")]
    InFlight,
    #[error("cannot move from {from} to {to}")]
    Illegal { from: String, to: String },
}

/// Outcome of a status change that went through the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Control(#[from] ControlError),
    /// The server refused; `message` is ready to show and the control has reverted.
    #[error("{message}")]
    Rejected { message: String, source: BackendError },
}

#[derive(Debug, Clone)]
pub struct StatusControl<R: TransitionRules> {
    rules: R,
    confirmed: Option<R::Status>,
    options: BTreeSet<R::Status>,
    in_flight: Option<R::Status>,
}

impl<R: TransitionRules> StatusControl<R> {
    pub fn new(rules: R, confirmed: Option<R::Status>) -> Self {
        let options = rules.legal_next(confirmed);
        Self { rules, confirmed, options, in_flight: None }
    }

    /// Last status acknowledged by the server.
    pub fn current(&self) -> Option<R::Status> {
        self.confirmed
    }

    pub fn options(&self) -> &BTreeSet<R::Status> {
        &self.options
    }

    pub fn in_flight(&self) -> Option<R::Status> {
        self.in_flight
    }

    pub fn is_disabled(&self) -> bool {
        self.in_flight.is_some() || self.options.is_empty()
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Swaps the evaluation context and recomputes the options.
    pub fn set_rules(&mut self, rules: R) {
        self.rules = rules;
        if self.in_flight.is_none() {
            self.options = self.rules.legal_next(self.confirmed);
        }
    }

    pub fn begin(&mut self, target: R::Status) -> Result<R::Status, ControlError> {
        if self.in_flight.is_some() {
            return Err(ControlError::InFlight);
        }
        if !self.options.contains(&target) {
            let from =
                self.confirmed.map_or_else(|| "none".to_string(), |status| status.to_string());
            return Err(ControlError::Illegal { from, to: target.to_string() });
        }

        self.in_flight = Some(target);
        self.options.clear();
        Ok(target)
    }

    pub fn confirm(&mut self) -> Option<R::Status> {
        if let Some(target) = self.in_flight.take() {
            self.confirmed = Some(target);
        }
        self.options = self.rules.legal_next(self.confirmed);
        self.confirmed
    }

    pub fn revert(&mut self) -> Option<R::Status> {
        self.in_flight = None;
        self.options = self.rules.legal_next(self.confirmed);
        self.confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CourseStatus, EnrollmentStatus};
    use crate::services::transitions::{CourseRules, EnrollmentRules};

    #[test]
    fn begin_disables_until_settled() {
        let mut control =
            StatusControl::new(CourseRules { is_admin: true }, Some(CourseStatus::Draft));
        assert!(!control.is_disabled());

        control.begin(CourseStatus::Published).expect("legal");
        assert!(control.is_disabled());
        assert!(control.options().is_empty());
        assert_eq!(control.in_flight(), Some(CourseStatus::Published));
        assert_eq!(control.begin(CourseStatus::Archived), Err(ControlError::InFlight));

        control.confirm();
        assert_eq!(control.current(), Some(CourseStatus::Published));
        assert_eq!(control.options(), &BTreeSet::from([CourseStatus::Archived]));
        assert!(!control.is_disabled());
    }

    #[test]
    fn revert_restores_previous_options() {
        let rules = EnrollmentRules { course_ended: false };
        let mut control = StatusControl::new(rules, Some(EnrollmentStatus::Pending));
        let before = control.options().clone();

        control.begin(EnrollmentStatus::Active).expect("legal");
        control.revert();

        assert_eq!(control.current(), Some(EnrollmentStatus::Pending));
        assert_eq!(control.options(), &before);
        assert_eq!(control.in_flight(), None);
    }

    #[test]
    fn illegal_targets_are_refused() {
        let mut control =
            StatusControl::new(CourseRules { is_admin: false }, Some(CourseStatus::Draft));
        let err = control.begin(CourseStatus::Published).unwrap_err();
        assert_eq!(err.to_string(), "cannot move from Draft to Published");
        assert_eq!(control.in_flight(), None);
        assert!(!control.options().is_empty());
    }

    #[test]
    fn unknown_current_status_is_disabled() {
        let control = StatusControl::new(EnrollmentRules { course_ended: true }, None);
        assert!(control.is_disabled());
    }

    #[test]
    fn context_change_recomputes_options() {
        let rules = EnrollmentRules { course_ended: false };
        let mut control = StatusControl::new(rules, Some(EnrollmentStatus::Active));
        assert_eq!(control.options(), &BTreeSet::from([EnrollmentStatus::Suspended]));

        control.set_rules(EnrollmentRules { course_ended: true });
        assert_eq!(
            control.options(),
            &BTreeSet::from([
                EnrollmentStatus::Passed,
                EnrollmentStatus::Failed,
                EnrollmentStatus::Suspended
            ])
        );
    }
}
