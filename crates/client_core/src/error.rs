use shared::error::ApiError;
use thiserror::Error;

/// Failures crossing the remote gateway boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected http status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("service rejected request: {}", join_messages(.0))]
    Server(Vec<ApiError>),
    #[error("malformed service response: {0}")]
    Decode(String),
    #[error("record has no id; only saved records can be {0}")]
    MissingId(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Server,
    Decode,
}

impl GatewayError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Transport(_) => FailureKind::Transport,
            GatewayError::Status { status, .. } if *status >= 500 => FailureKind::Transport,
            GatewayError::Status { .. } | GatewayError::Server(_) | GatewayError::MissingId(_) => {
                FailureKind::Server
            }
            GatewayError::Decode(_) => FailureKind::Decode,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            GatewayError::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            GatewayError::Status {
                status: status.as_u16(),
                body: value.to_string(),
            }
        } else {
            GatewayError::Transport(value.to_string())
        }
    }
}

fn join_messages(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
