// API module entry
// JSON endpoints mounted under /api

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};

use crate::logger;

/// Allow header value for a known API path
pub fn allowed_methods(path: &str) -> Option<&'static str> {
    match path {
        "/api/data" => Some("POST, OPTIONS"),
        "/api/error" => Some("GET, HEAD, OPTIONS"),
        _ => None,
    }
}

/// API route handler
///
/// Dispatches to handler functions based on request path and method.
/// Known paths hit with the wrong method get a JSON 405 carrying the
/// Allow header; unknown paths get a JSON 404.
pub fn dispatch(method: &Method, path: &str, body: &Bytes) -> Response<Full<Bytes>> {
    match (method.clone(), path) {
        (Method::POST, "/api/data") => handlers::data(body),
        (Method::GET | Method::HEAD, "/api/error") => handlers::simulated_error(),
        _ => allowed_methods(path).map_or_else(response::not_found, |allow| {
            logger::log_warning(&format!("{method} {path} is not allowed"));
            response::method_not_allowed(allow)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn json_body(response: Response<Full<Bytes>>) -> Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("valid JSON body")
    }

    #[tokio::test]
    async fn test_post_data_round_trip() {
        let body = Bytes::from(r#"{"input1": "a", "input2": "b"}"#);
        let response = dispatch(&Method::POST, "/api/data", &body);
        assert_eq!(response.status(), 200);

        let payload = json_body(response).await;
        assert_eq!(payload["row1"]["name"], "Main row with input1: a");
    }

    #[tokio::test]
    async fn test_get_data_is_method_not_allowed() {
        let response = dispatch(&Method::GET, "/api/data", &Bytes::new());
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["Allow"], "POST, OPTIONS");

        let payload = json_body(response).await;
        assert_eq!(payload["error"], "Method not allowed");
    }

    #[tokio::test]
    async fn test_delete_data_is_method_not_allowed() {
        let response = dispatch(&Method::DELETE, "/api/data", &Bytes::new());
        assert_eq!(response.status(), 405);
    }

    #[tokio::test]
    async fn test_error_endpoint_allows_get_and_head() {
        let get = dispatch(&Method::GET, "/api/error", &Bytes::new());
        assert_eq!(get.status(), 500);

        let head = dispatch(&Method::HEAD, "/api/error", &Bytes::new());
        assert_eq!(head.status(), 500);

        let post = dispatch(&Method::POST, "/api/error", &Bytes::new());
        assert_eq!(post.status(), 405);
        assert_eq!(post.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_not_found() {
        let response = dispatch(&Method::GET, "/api/nope", &Bytes::new());
        assert_eq!(response.status(), 404);

        let payload = json_body(response).await;
        assert_eq!(payload["error"], "Not found");
    }
}
