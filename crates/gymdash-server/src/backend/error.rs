use crate::error::GENERIC_FAILURE;

/// Every way a backend call can fail, shared by all screens.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Connection failure or timeout
    #[error("Backend request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Body was not the JSON we expected
    #[error("Invalid backend response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The credential was refused
    #[error("Backend rejected the credential")]
    Unauthorized,

    #[error("Backend returned {status}")]
    Rejected { status: u16, message: Option<String> },

    /// Sign-in answered without an `x-auth-token` header or body
    #[error("Backend did not issue a credential")]
    MissingCredential,
}

impl BackendError {
    /// Text for the inline banner: the server's own message when it sent one,
    /// `rejected_fallback` for other refusals, a generic line for transport failures.
    pub fn user_message(&self, rejected_fallback: &str) -> String {
        match self {
            BackendError::Rejected { message: Some(m), .. } => m.clone(),
            BackendError::Rejected { message: None, .. }
            | BackendError::Unauthorized
            | BackendError::MissingCredential => rejected_fallback.to_string(),
            BackendError::Network(_) | BackendError::Parse(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// Pulls `message` out of an error body, if the body is JSON and has one.
    pub(crate) fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.trim().is_empty());
        BackendError::Rejected { status, message }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
