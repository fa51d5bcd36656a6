use derive_more::Display;
use reqwest::StatusCode;

/// Coarse failure classes surfaced to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FailureKind {
    #[display(fmt = "network error")]
    Transport,
    #[display(fmt = "rejected by server")]
    Validation,
    #[display(fmt = "not found")]
    NotFound,
    #[display(fmt = "server error")]
    Server,
    #[display(fmt = "unreadable response")]
    Decode,
}

impl FailureKind {
    /// Transport and 5xx failures may succeed if repeated; 4xx will not.
    pub fn is_retriable(self) -> bool {
        matches!(self, FailureKind::Transport | FailureKind::Server)
    }
}

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "transport error: {}", _0)]
    Transport(reqwest::Error),
    #[display(fmt = "request rejected ({}): {}", status, body)]
    Rejected { status: u16, body: String },
    #[display(fmt = "not found: {}", _0)]
    NotFound(String),
    #[display(fmt = "server error ({}): {}", status, body)]
    Server { status: u16, body: String },
    /// A 2xx reply whose body could not be read as the expected JSON.
    #[display(fmt = "invalid response body: {}", _0)]
    Decode(String),
    #[display(fmt = "invalid request url: {}", _0)]
    InvalidUrl(String),
}

impl ApiError {
    /// Classify a non-success HTTP status and its body text.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(body)
        } else if status.is_client_error() {
            ApiError::Rejected {
                status: status.as_u16(),
                body,
            }
        } else {
            ApiError::Server {
                status: status.as_u16(),
                body,
            }
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::Transport(_) => FailureKind::Transport,
            ApiError::Rejected { .. } => FailureKind::Validation,
            ApiError::NotFound(_) => FailureKind::NotFound,
            ApiError::Server { .. } => FailureKind::Server,
            ApiError::Decode(_) => FailureKind::Decode,
            ApiError::InvalidUrl(_) => FailureKind::Transport,
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
