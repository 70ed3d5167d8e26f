use serde_json::Value;

use crate::domain::SmscResponse;

const ERROR_CODE_FIELD: &str = "error_code";
const ERROR_MESSAGE_FIELD: &str = "error";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, got: {kind}")]
    NotAnObject { kind: &'static str },

    #[error("error_code is not an integer: {value}")]
    ErrorCodeNotInteger { value: String },

    #[error("error is not a string: {value}")]
    ErrorMessageNotString { value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodedResponse {
    Success(SmscResponse),
    Failure { code: i64, message: String },
}

/// Decode a response body, which must be UTF-8 JSON. Malformed UTF-8 is an error, never replaced.
pub fn decode_json_response(body: &[u8]) -> Result<DecodedResponse, TransportError> {
    let value: Value = serde_json::from_slice(body)?;
    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(TransportError::NotAnObject {
                kind: json_kind(&other),
            });
        }
    };

    let code = match object.get(ERROR_CODE_FIELD) {
        Some(code) if is_truthy(code) => integer_code(code)?,
        _ => return Ok(DecodedResponse::Success(object)),
    };

    let message = match object.get(ERROR_MESSAGE_FIELD) {
        Some(Value::String(message)) => message.clone(),
        other => {
            return Err(TransportError::ErrorMessageNotString {
                value: other.map_or_else(|| "missing".to_owned(), Value::to_string),
            });
        }
    };

    Ok(DecodedResponse::Failure { code, message })
}

/// SMS Center treats a missing, zero, `"0"` or empty `error_code` as success.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty() && text != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// A truthy `error_code` must be a JSON integer; numeric strings and floats are rejected.
fn integer_code(value: &Value) -> Result<i64, TransportError> {
    value
        .as_i64()
        .ok_or_else(|| TransportError::ErrorCodeNotInteger {
            value: value.to_string(),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
