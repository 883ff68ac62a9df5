use std::fmt;

use searcher_core::{ConfigError, PatternError};

/// What a single fetch produced.
///
/// `NoContent` is an ordinary outcome, not a failure: the worker simply moves
/// on to the next URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Body(String),
    NoContent(NoContentReason),
}

impl FetchOutcome {
    pub fn body(&self) -> Option<&str> {
        match self {
            FetchOutcome::Body(body) => Some(body),
            FetchOutcome::NoContent(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoContentReason {
    Timeout,
    /// Unknown host, refused connection or failed TLS negotiation.
    Unreachable,
    HttpStatus(u16),
    MissingLocation,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64 },
}

impl fmt::Display for NoContentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoContentReason::Timeout => write!(f, "timeout"),
            NoContentReason::Unreachable => write!(f, "unreachable"),
            NoContentReason::HttpStatus(code) => write!(f, "http status {code}"),
            NoContentReason::MissingLocation => write!(f, "redirect without location"),
            NoContentReason::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            NoContentReason::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Client,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Client => write!(f, "http client error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failures that abort a whole search run. No partial results accompany them.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error("no urls to search")]
    NoUrls,
    #[error("interrupted while waiting for workers to complete")]
    Interrupted,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Client(#[from] FetchError),
}
