use thiserror::Error;

/// Why a submission did not reach the queue.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please save server address first!")]
    Unconfigured,
    #[error("Invalid URL format!")]
    InvalidAddress(String),
    #[error("Connection error: {message}")]
    Transport { message: String },
    #[error("Authentication required! Please enter username and password.")]
    AuthRequired,
    #[error("Login failed! Check your credentials.")]
    LoginFailed { status: u16 },
    #[error("Error: {}", message.as_deref().unwrap_or("Unknown error"))]
    SubmissionRejected { message: Option<String> },
    #[error("Not a YouTube video page")]
    UnsupportedPage,
}

impl SubmitError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_text_prefers_server_message() {
        let err = SubmitError::SubmissionRejected {
            message: Some("Queue is full".to_string()),
        };
        assert_eq!(err.to_string(), "Error: Queue is full");
        let err = SubmitError::SubmissionRejected { message: None };
        assert_eq!(err.to_string(), "Error: Unknown error");
    }

    #[test]
    fn transport_text_carries_cause() {
        assert_eq!(
            SubmitError::transport("connection refused").to_string(),
            "Connection error: connection refused"
        );
    }
}
