use serde_json::Value;

use crate::error::{ApiErrorKind, Error};

/// Fallback used when an error value cannot be re-encoded as JSON.
const UNRESOLVED_ERRORS: &str = "[Provider] Cannot resolve errors...";

/// Validate a BookingSync API response.
///
/// The API signals failure two ways, checked in this order:
///
/// 1. A body whose `errors` key holds a non-empty array is a failure no
///    matter the status code; the API emits such bodies even on 2xx.
/// 2. Otherwise a status of 400 or above is a failure; the message is the
///    standard reason phrase for that status.
///
/// Anything else passes, returning the decoded body (`Value::Null` when the
/// body is not JSON). Failures carry the raw response text in
/// [`Error::Api`], alongside the status and the formatted message.
pub fn check_response(status: u16, body: &[u8]) -> Result<Value, Error> {
    let data = serde_json::from_slice::<Value>(body).ok();

    if let Some(errors) = data
        .as_ref()
        .and_then(|data| data.get("errors"))
        .and_then(Value::as_array)
        .filter(|errors| !errors.is_empty())
    {
        return Err(Error::Api {
            kind: ApiErrorKind::Validation,
            message: format_errors(errors),
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    if status >= 400 {
        return Err(Error::Api {
            kind: ApiErrorKind::Http,
            message: reason_phrase(status),
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    Ok(data.unwrap_or(Value::Null))
}

/// Render a structured `errors` array into one diagnostic string.
///
/// Each error element is a mapping; its `field: value` pairs join with
/// `", "`, and elements join with a newline. Non-string values are encoded
/// as compact JSON, keeping the remote's own field order.
fn format_errors(errors: &[Value]) -> String {
    let lines: Vec<String> = errors
        .iter()
        .map(|error| match error.as_object() {
            Some(fields) => fields
                .iter()
                .map(|(key, value)| match value.as_str() {
                    Some(text) => format!("{key}: {text}"),
                    None => format!("{key}: {}", encode_value(value)),
                })
                .collect::<Vec<_>>()
                .join(", "),
            None => encode_value(error),
        })
        .collect();

    lines.join("\n")
}

fn encode_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| UNRESOLVED_ERRORS.to_string())
}

/// Standard reason phrase for an HTTP status code, e.g. "Unauthorized"
/// for 401. Unregistered codes render as `HTTP <status>`.
fn reason_phrase(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map(str::to_owned)
        .unwrap_or_else(|| format!("HTTP {status}"))
}
