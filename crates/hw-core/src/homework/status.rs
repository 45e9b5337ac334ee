use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};
use thiserror::Error;

use super::json_type_name;

const NAME_KEY: &str = "homework_name";
const STATUS_KEY: &str = "status";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("Домашняя работа должна быть словарём, получен тип {0}")]
    NotAnObject(&'static str),
    #[error("В домашней работе нет ключа `{0}`")]
    MissingKey(&'static str),
    #[error("Ключ `{key}` домашней работы должен быть строкой, получен тип {found}")]
    NotAString {
        key: &'static str,
        found: &'static str,
    },
    #[error("Недокументированный статус домашней работы: {0}")]
    Unknown(String),
}

/// Review status reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Text shown to the student.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| StatusError::Unknown(s.to_string()))
    }
}

/// Builds the notification text for a single homework item.
pub fn parse_status(homework: &Value) -> Result<String, StatusError> {
    let item = homework
        .as_object()
        .ok_or_else(|| StatusError::NotAnObject(json_type_name(homework)))?;

    let name = string_field(item, NAME_KEY)?;
    let status: HomeworkStatus = string_field(item, STATUS_KEY)?.parse()?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}

fn string_field<'a>(
    item: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a str, StatusError> {
    let value = item.get(key).ok_or(StatusError::MissingKey(key))?;
    value.as_str().ok_or(StatusError::NotAString {
        key,
        found: json_type_name(value),
    })
}
