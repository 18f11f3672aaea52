use thiserror::Error;

/// Failure reported by the REST collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The server answered and refused the request; `detail` is its message body.
    #[error("request rejected ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl BackendError {
    pub fn rejected(status: u16, detail: impl Into<String>) -> Self {
        Self::Rejected { status, detail: detail.into() }
    }

    /// The server's own explanation, when it gave one.
    pub fn server_detail(&self) -> Option<&str> {
        match self {
            BackendError::Rejected { detail, .. } if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }

    /// Text for a user notification: `headline`, plus the server's detail if any.
    pub fn user_message(&self, headline: &str) -> String {
        match self.server_detail() {
            Some(detail) => format!("{headline} {detail}"),
            None => headline.to_string(),
        }
    }
}
