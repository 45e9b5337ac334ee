//! Process-level setup read before the poller starts: the `.env` file and
//! the log output format.

use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const LOG_FORMAT: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "Invalid {LOG_FORMAT} '{other}': must be 'pretty' or 'json'"
            )),
        }
    }
}

impl LogFormat {
    pub fn from_env() -> Result<Self, String> {
        std::env::var(LOG_FORMAT)
            .ok()
            .map_or(Ok(Self::default()), |raw| raw.parse())
    }
}

/// Loads variables from `path`, or from `./.env` when no path is given.
///
/// Variables already present in the environment are not overridden. A missing
/// default `.env` is fine; a missing explicit file is an error. Returns the
/// file that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, String> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|()| Some(path.to_path_buf()))
            .map_err(|e| format!("Failed to load env file {}: {}", path.display(), e)),
        None => match dotenvy::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(format!("Failed to load .env file: {e}")),
        },
    }
}
