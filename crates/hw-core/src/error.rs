use std::fmt;

use thiserror::Error;

use crate::api::FetchError;
use crate::homework::{ResponseError, StatusError};

/// Discriminant the poll loop dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Transport,
    HttpStatus,
    MalformedPayload,
    Shape,
    UnknownStatus,
    Delivery,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Transport => write!(f, "transport"),
            Self::HttpStatus => write!(f, "http_status"),
            Self::MalformedPayload => write!(f, "malformed_payload"),
            Self::Shape => write!(f, "shape"),
            Self::UnknownStatus => write!(f, "unknown_status"),
            Self::Delivery => write!(f, "delivery"),
        }
    }
}

/// Failure of a single poll iteration.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Status(#[from] StatusError),
}

impl PollError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Fetch(e) => e.kind(),
            Self::Response(_) => ErrorKind::Shape,
            Self::Status(_) => ErrorKind::UnknownStatus,
        }
    }

    /// HTTP status of a rejected API request, if that is what failed.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.status_code(),
            _ => None,
        }
    }
}
