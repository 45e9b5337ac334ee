use serde_json::Value;
use thiserror::Error;
use tracing::error;

use super::json_type_name;

pub const HOMEWORKS_KEY: &str = "homeworks";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Ответ API пуст")]
    Empty,
    #[error("Ответ API должен быть словарём, получен тип {0}")]
    NotAnObject(&'static str),
    #[error("В ответе API нет ключа `homeworks`")]
    MissingHomeworks,
    #[error("Значение `homeworks` должно быть списком, получен тип {0}")]
    HomeworksNotAList(&'static str),
}

/// Checks the overall shape of an API response and returns the homework list.
///
/// Items are not inspected here.
pub fn check_response(response: &Value) -> Result<&[Value], ResponseError> {
    let result = match response {
        Value::Null => Err(ResponseError::Empty),
        Value::Object(map) => match map.get(HOMEWORKS_KEY) {
            None => Err(ResponseError::MissingHomeworks),
            Some(Value::Array(homeworks)) => Ok(homeworks.as_slice()),
            Some(other) => Err(ResponseError::HomeworksNotAList(json_type_name(other))),
        },
        other => Err(ResponseError::NotAnObject(json_type_name(other))),
    };

    if let Err(ref e) = result {
        error!(error = %e, "Invalid API response");
    }
    result
}
