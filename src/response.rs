//! Response normalization.
//!
//! Heterogeneous endpoint responses are folded into the uniform
//! [`ServiceResponse`] outcome. Two generic policies exist: the v1 family
//! signals success purely through the HTTP status code, the v2 family
//! additionally embeds a `status` field in the payload. Timestamp creation
//! predates both and keeps its own narrower contract.

use serde_json::{Map, Value};

use crate::transport::RawResponse;
use crate::types::ServiceResponse;

/// Message returned and logged when a failure body carries no `message`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown error";

const HTTP_OK: u16 = 200;

/// v1 policy: success iff the transport status is 200.
pub fn handle_response(raw: RawResponse) -> ServiceResponse {
    if raw.status == HTTP_OK {
        ServiceResponse::Ok(raw.body)
    } else {
        failure_from_body(raw.body)
    }
}

/// v2 policy: success iff the transport status is 200 and the payload's
/// `status` field is 0.
pub fn handle_response_v2(raw: RawResponse) -> ServiceResponse {
    let payload_ok = raw.body.get("status").and_then(Value::as_i64) == Some(0);
    if raw.status == HTTP_OK && payload_ok {
        ServiceResponse::Ok(raw.body)
    } else {
        failure_from_body(raw.body)
    }
}

/// Timestamp-creation policy: success iff the transport status is 200 and
/// the body's `message` is the literal `"OK"`; the success payload is the
/// token string alone (empty when the service sent none).
pub fn handle_tsp_create_response(raw: RawResponse) -> ServiceResponse {
    let message_ok = raw.body.get("message").and_then(Value::as_str) == Some("OK");
    if raw.status == HTTP_OK && message_ok {
        let token = raw
            .body
            .get("token")
            .and_then(Value::as_str)
            .unwrap_or_default();
        ServiceResponse::Ok(Value::String(token.to_string()))
    } else {
        failure_from_body(raw.body)
    }
}

/// Shared failure path: destructure the body into its `message` and the
/// remaining fields, log once at error level with the remainder as context,
/// and surface the message (or the fallback) to the caller.
pub(crate) fn failure_from_body(body: Value) -> ServiceResponse {
    let (message, rest) = split_message(body);
    let message = message.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
    log_failure(&message, &rest);
    ServiceResponse::Failed(message)
}

/// Failure path for errors that never produced a body (request send
/// failures). Same single log emission, empty context.
pub(crate) fn failure_without_body(message: String) -> ServiceResponse {
    log_failure(&message, &Map::new());
    ServiceResponse::Failed(message)
}

/// Split a decoded body into its `message` field and the remaining fields.
/// An empty-string message counts as absent. Non-object bodies carry no
/// message and no context.
fn split_message(body: Value) -> (Option<String>, Map<String, Value>) {
    match body {
        Value::Object(mut fields) => {
            let message = match fields.remove("message") {
                Some(Value::String(text)) if !text.is_empty() => Some(text),
                _ => None,
            };
            (message, fields)
        }
        _ => (None, Map::new()),
    }
}

fn log_failure(message: &str, context: &Map<String, Value>) {
    if context.is_empty() {
        log::error!("NCANode call failed: {message}");
    } else {
        log::error!(
            "NCANode call failed: {message} (context: {})",
            Value::Object(context.clone())
        );
    }
}
