//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: drains the body within the
//! configured limit, dispatches to the API or static serving, and writes
//! the access log.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Local};
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::HeaderValue;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};

use crate::api;
use crate::config::AppState;
use crate::handler::static_files::{self, StaticContext};
use crate::http::response;
use crate::logger::{self, AccessLogEntry};

/// Why a request body could not be drained
enum BodyError {
    TooLarge,
    Unreadable,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let time = Local::now();
    let (parts, body) = req.into_parts();

    let mut response = match read_body(body, state.config.http.max_body_size).await {
        Ok(body) => dispatch(&parts, &body, &state).await,
        Err(BodyError::TooLarge) => {
            logger::log_warning(&format!(
                "Request body over limit: {} {}",
                parts.method,
                parts.uri.path()
            ));
            response::payload_too_large()
        }
        Err(BodyError::Unreadable) => {
            logger::log_warning(&format!(
                "Failed to read request body: {} {}",
                parts.method,
                parts.uri.path()
            ));
            response::bad_request()
        }
    };

    if let Ok(name) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert("Server", name);
    }

    if state.config.logging.access_log {
        let entry = access_entry(&parts, &response, peer, time, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Drain the request body, enforcing the configured size limit
async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, BodyError>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    // A declared length over the cap fails fast, before any transfer
    if let Some(declared) = body.size_hint().exact() {
        if declared > max_body_size {
            return Err(BodyError::TooLarge);
        }
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(BodyError::TooLarge),
        Err(_) => Err(BodyError::Unreadable),
    }
}

/// Route a request to the API or the static file tree
async fn dispatch(parts: &Parts, body: &Bytes, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let path = parts.uri.path();
    let enable_cors = state.config.http.enable_cors;

    if parts.method == Method::OPTIONS {
        if !is_api_path(path) {
            return response::preflight("GET, HEAD, OPTIONS", enable_cors);
        }
        if let Some(allow) = api::allowed_methods(path) {
            return response::preflight(allow, enable_cors);
        }
        // Unknown API path, let the API 404 answer
    }

    if is_api_path(path) {
        return api::dispatch(&parts.method, path, body);
    }

    match &parts.method {
        &Method::GET | &Method::HEAD => {
            let ctx = StaticContext {
                is_head: parts.method == Method::HEAD,
                if_none_match: header_string(parts, "if-none-match"),
                range: header_string(parts, "range"),
            };
            static_files::serve(&ctx, path, &state.config.assets).await
        }
        method => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            response::method_not_allowed("GET, HEAD, OPTIONS")
        }
    }
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn header_string(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn access_entry(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer: SocketAddr,
    time: DateTime<Local>,
    started: Instant,
) -> AccessLogEntry {
    AccessLogEntry {
        remote_addr: peer.ip().to_string(),
        time,
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(ToString::to_string),
        http_version: version_label(parts.version).to_string(),
        status: response.status().as_u16(),
        body_bytes: response.body().size_hint().exact().unwrap_or(0),
        referer: header_string(parts, "referer"),
        user_agent: header_string(parts, "user-agent"),
        request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
    }
}

fn version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
