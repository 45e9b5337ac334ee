//! Validation of the homework statuses payload.

mod response;
mod status;

pub use response::{check_response, ResponseError, HOMEWORKS_KEY};
pub use status::{parse_status, HomeworkStatus, StatusError};

use serde_json::Value;

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
