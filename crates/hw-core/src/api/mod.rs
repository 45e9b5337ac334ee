mod http;

pub use http::PracticumClient;

use std::borrow::Cow;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::clock::Clock;
use crate::error::ErrorKind;

/// Longest part of a non-JSON body shown in the error message, in characters.
pub const BODY_EXCERPT_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Эндпоинт {url} недоступен: {reason}")]
    Unreachable { url: String, reason: String },
    #[error("Эндпоинт {url} вернул код ответа {status}")]
    UnexpectedStatus { url: String, status: u16 },
    /// `body` keeps the full response; the message shows an excerpt.
    #[error("Ответ {url} не является JSON ({message}): {}", body_excerpt(.body))]
    Parse {
        url: String,
        body: String,
        message: String,
    },
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unreachable { .. } => ErrorKind::Transport,
            Self::UnexpectedStatus { .. } => ErrorKind::HttpStatus,
            Self::Parse { .. } => ErrorKind::MalformedPayload,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn body_excerpt(body: &str) -> Cow<'_, str> {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => Cow::Owned(format!("{}…", &body[..end])),
        None => Cow::Borrowed(body),
    }
}

/// Source of homework statuses.
///
/// A single call performs exactly one request; retrying is the poll loop's job.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetches statuses changed since `from_date` (unix seconds) as raw JSON.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, FetchError>;
}

/// Picks the `from_date` for a request. Absent or zero means "now".
pub fn resolve_from_date(from_date: Option<i64>, clock: &dyn Clock) -> i64 {
    match from_date {
        Some(ts) if ts != 0 => ts,
        _ => clock.now(),
    }
}
