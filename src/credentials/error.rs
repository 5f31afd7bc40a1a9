use thiserror::Error;

use super::transport::TransportError;

/// Errors that can occur while refreshing cluster credentials.
///
/// Every variant is terminal for the invocation that produced it; nothing is
/// retried internally.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("failed to build credentials request: {0}")]
    RequestConstruction(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to call credentials api: {0}")]
    Transport(#[source] TransportError),

    #[error("failed to parse credentials api response json: {0}")]
    Parse(#[from] serde_json::Error),

    /// The authority answered with an error body (`id` / `message`).
    #[error("credentials api response was not 'OK': ({id}) {message}")]
    Application { id: String, message: String },

    #[error("failed to decode certificate authority data: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("credentials api response did not contain certificate authority data")]
    MissingCertificate,
}

impl CredentialsError {
    /// Short stage name used as a structured logging field.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::RequestConstruction(_) => "request",
            Self::Transport(_) => "transport",
            Self::Parse(_) => "parse",
            Self::Application { .. } => "classify",
            Self::Decode(_) => "decode",
            Self::MissingCertificate => "policy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_application_error_display() {
        let err = CredentialsError::Application {
            id: "unauthorized".into(),
            message: "Unable to authenticate you".into(),
        };
        assert_eq!(
            err.to_string(),
            "credentials api response was not 'OK': (unauthorized) Unable to authenticate you"
        );
        assert_eq!(err.stage(), "classify");
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let cause: TransportError = "connection refused".into();
        let err = CredentialsError::Transport(cause);
        assert_eq!(
            err.to_string(),
            "failed to call credentials api: connection refused"
        );
        assert_eq!(err.source().unwrap().to_string(), "connection refused");
    }

    #[test]
    fn test_parse_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err = CredentialsError::from(serde_err);
        assert!(matches!(err, CredentialsError::Parse(_)));
        assert_eq!(
            err.to_string(),
            "failed to parse credentials api response json: expected value at line 1 column 1"
        );
    }
}
