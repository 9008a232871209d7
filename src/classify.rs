use serde_json::Value;

use crate::extract::extract_json_payload;
use crate::format::format_user_data;
use crate::types::{LoginOutcome, ParsedJsonObject};

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid response format from server";
pub const MISSING_RESULT_CODE_MESSAGE: &str = "Invalid response: No ResultCode found";
pub const DEFAULT_FAILURE_MESSAGE: &str = "Login failed";

const RESULT_CODE_FIELD: &str = "ResultCode";
const RESULT_MESSAGE_FIELD: &str = "ResultMessage";
const ENTITY_ID_FIELD: &str = "EntityId";

/// Classify the raw body returned by the login endpoint.
///
/// - No embedded JSON object: format failure.
/// - Embedded text that is not a JSON object: the whole body is passed through
///   as success data.
/// - `ResultCode < 0`: failure carrying `ResultMessage` (or a default).
/// - `ResultCode >= 0`, or no `ResultCode` but an `EntityId`: success with the
///   formatted object.
/// - `ResultCode` that is not an `i32`: format failure.
pub fn classify_response(raw_body: &str) -> LoginOutcome {
    let Some(payload) = extract_json_payload(raw_body) else {
        tracing::debug!("No JSON payload in {} byte response", raw_body.len());
        return LoginOutcome::failure(INVALID_FORMAT_MESSAGE);
    };

    let object = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(object)) => object,
        Ok(_) | Err(_) => {
            tracing::debug!("Embedded payload is not a JSON object, passing body through");
            return LoginOutcome::success(raw_body);
        }
    };

    classify_object(&object)
}

fn classify_object(object: &ParsedJsonObject) -> LoginOutcome {
    if let Some(code) = object.get(RESULT_CODE_FIELD) {
        let Some(code) = code.as_i64().and_then(|c| i32::try_from(c).ok()) else {
            tracing::warn!("ResultCode is not an integer: {}", code);
            return LoginOutcome::failure(INVALID_FORMAT_MESSAGE);
        };

        if code < 0 {
            let message = object
                .get(RESULT_MESSAGE_FIELD)
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_FAILURE_MESSAGE);
            return LoginOutcome::failure(message);
        }

        return LoginOutcome::success(format_user_data(object));
    }

    if object.contains_key(ENTITY_ID_FIELD) {
        return LoginOutcome::success(format_user_data(object));
    }

    LoginOutcome::failure(MISSING_RESULT_CODE_MESSAGE)
}
