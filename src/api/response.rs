// API response utility functions module

use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Build a JSON response from a serializable payload
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let payload = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return build(
                StatusCode::INTERNAL_SERVER_ERROR,
                r#"{"error":"Internal server error"}"#.to_string(),
                None,
            );
        }
    };

    build(status, payload, None)
}

/// Build an `{"error": ...}` JSON response
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": message });
    build(status, body.to_string(), None)
}

/// 405 Method Not Allowed with an Allow header listing accepted methods
pub fn method_not_allowed(allow: &str) -> Response<Full<Bytes>> {
    let body = serde_json::json!({ "error": "Method not allowed" });
    build(StatusCode::METHOD_NOT_ALLOWED, body.to_string(), Some(allow))
}

/// 404 Not Found for unknown API paths
pub fn not_found() -> Response<Full<Bytes>> {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// 400 Bad Request for unreadable payloads
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    error_response(StatusCode::BAD_REQUEST, message)
}

fn build(status: StatusCode, payload: String, allow: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json");

    if let Some(allow) = allow {
        builder = builder.header("Allow", allow);
    }

    builder
        .body(Full::new(Bytes::from(payload)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}
