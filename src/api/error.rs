// Errors returned by the agent registry client

use thiserror::Error;

/// Failure of a registry call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The server rejected the request; `message` is the server's `error` field
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        ApiError::Server {
            status,
            message: message.into(),
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message_only() {
        let err = ApiError::server(403, "Forbidden: TEAM_SUPERVISOR agents cannot be deleted");
        assert_eq!(
            err.to_string(),
            "Forbidden: TEAM_SUPERVISOR agents cannot be deleted"
        );
        assert_eq!(err.status(), Some(403));
        assert_eq!(ApiError::Transport("refused".to_string()).status(), None);
    }
}
