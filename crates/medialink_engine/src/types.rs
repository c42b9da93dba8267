use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Result of a `load`. Read failures are logged and reported as `None`.
    ValueLoaded { key: String, value: Option<String> },
    /// Result of a `store`, in submission order.
    ValueStored {
        key: String,
        result: Result<(), String>,
    },
    /// Result of an `ask`.
    Answer(Result<String, InferenceError>),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("engine worker has stopped")]
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceError {
    pub kind: InferenceFailureKind,
    message: Option<String>,
}

impl InferenceError {
    pub fn new(kind: InferenceFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    pub fn without_message(kind: InferenceFailureKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Human-readable message, when the failure carried one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for InferenceError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceFailureKind {
    MissingApiKey,
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    MalformedResponse,
    EmptyAnswer,
}

impl fmt::Display for InferenceFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceFailureKind::MissingApiKey => write!(f, "missing api key"),
            InferenceFailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            InferenceFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            InferenceFailureKind::Timeout => write!(f, "timeout"),
            InferenceFailureKind::Network => write!(f, "network error"),
            InferenceFailureKind::MalformedResponse => write!(f, "malformed response"),
            InferenceFailureKind::EmptyAnswer => write!(f, "empty answer"),
        }
    }
}
