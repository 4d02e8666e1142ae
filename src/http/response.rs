//! Plain HTTP response builders.
//!
//! Status responses shared by static serving and the request router. The
//! builders never panic: a failed build is logged and degrades to an empty
//! response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::range::ByteRange;
use crate::logger;

const CACHE_CONTROL: &str = "public, max-age=3600";

/// 404 Not Found with a plain text body.
pub fn not_found() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| recover("404", &e))
}

/// 400 Bad Request, used when the request body cannot be read.
pub fn bad_request() -> Response<Full<Bytes>> {
    Response::builder()
        .status(400)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("400 Bad Request")))
        .unwrap_or_else(|e| recover("400", &e))
}

/// 405 Method Not Allowed for non-API paths.
pub fn method_not_allowed(allow: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", allow)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| recover("405", &e))
}

/// 413 Content Too Large for bodies over the configured limit.
pub fn payload_too_large() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| recover("413", &e))
}

/// 304 Not Modified echoing the validated `ETag`.
pub fn not_modified(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| recover("304", &e))
}

/// 416 Range Not Satisfiable reporting the actual body size.
pub fn range_not_satisfiable(total_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{total_size}"))
        .body(Full::new(Bytes::from("416 Range Not Satisfiable")))
        .unwrap_or_else(|e| recover("416", &e))
}

/// 204 No Content response to an OPTIONS request.
pub fn preflight(allow: &str, enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(204).header("Allow", allow);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", allow)
            .header("Access-Control-Allow-Headers", "Content-Type, Range")
            .header("Access-Control-Max-Age", "86400");
    }

    builder
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| recover("OPTIONS", &e))
}

/// 200 OK for a complete file, with caching validators attached.
pub fn file_ok(
    data: Bytes,
    content_type: &str,
    etag: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL)
        .body(Full::new(body))
        .unwrap_or_else(|e| recover("200", &e))
}

/// 206 Partial Content for a satisfied byte range.
pub fn partial_content(
    data: Bytes,
    content_type: &str,
    etag: &str,
    range: ByteRange,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", range.byte_len())
        .header(
            "Content-Range",
            format!("bytes {}-{}/{}", range.start, range.end, total_size),
        )
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL)
        .body(Full::new(body))
        .unwrap_or_else(|e| recover("206", &e))
}

/// Last resort when a response fails to build.
fn recover(status: &str, error: &hyper::http::Error) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
    Response::new(Full::new(Bytes::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_shape() {
        let response = not_found();
        assert_eq!(response.status(), 404);
        assert_eq!(response.headers()["Content-Type"], "text/plain");
    }

    #[test]
    fn test_method_not_allowed_carries_allow() {
        let response = method_not_allowed("GET, HEAD, OPTIONS");
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_preflight_cors_toggle() {
        let plain = preflight("GET, HEAD, OPTIONS", false);
        assert_eq!(plain.status(), 204);
        assert!(!plain.headers().contains_key("Access-Control-Allow-Origin"));

        let cors = preflight("GET, HEAD, OPTIONS", true);
        assert_eq!(cors.headers()["Access-Control-Allow-Origin"], "*");
        assert_eq!(
            cors.headers()["Access-Control-Allow-Methods"],
            "GET, HEAD, OPTIONS"
        );
    }

    #[test]
    fn test_file_ok_headers() {
        let response = file_ok(Bytes::from("<html>"), "text/html; charset=utf-8", "\"6-1\"", false);
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "6");
        assert_eq!(response.headers()["ETag"], "\"6-1\"");
        assert_eq!(response.headers()["Accept-Ranges"], "bytes");
    }

    #[test]
    fn test_head_strips_body_but_keeps_length() {
        let response = file_ok(Bytes::from("abcdef"), "text/plain", "\"t\"", true);
        assert_eq!(response.headers()["Content-Length"], "6");
    }

    #[test]
    fn test_partial_content_range_header() {
        let range = ByteRange { start: 2, end: 5 };
        let response = partial_content(Bytes::from("cdef"), "text/plain", "\"t\"", range, 10, false);
        assert_eq!(response.status(), 206);
        assert_eq!(response.headers()["Content-Range"], "bytes 2-5/10");
        assert_eq!(response.headers()["Content-Length"], "4");
    }
}
