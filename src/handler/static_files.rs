//! Static file serving module
//!
//! Maps request paths onto the assets directory and builds file responses
//! with `ETag` and Range support.

use std::path::{Component, Path};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AssetsConfig;
use crate::http::range::RangeOutcome;
use crate::http::{cache, mime, range, response};
use crate::logger;

/// Per-request details the static path needs
pub struct StaticContext {
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub range: Option<String>,
}

/// Serve a request path from the configured assets directory.
///
/// `/` resolves to the directory index, favicon paths resolve to the same
/// file name in the assets root, and anything under the mount prefix maps
/// directly. All other paths are 404.
pub async fn serve(
    ctx: &StaticContext,
    path: &str,
    assets: &AssetsConfig,
) -> Response<Full<Bytes>> {
    if path == "/" {
        return serve_relative(ctx, "", assets).await;
    }

    if assets.favicon_paths.iter().any(|p| path == p) {
        return serve_relative(ctx, path.trim_start_matches('/'), assets).await;
    }

    match strip_mount(path, &assets.mount) {
        Some(relative) => serve_relative(ctx, relative, assets).await,
        None => response::not_found(),
    }
}

/// Remove the mount prefix from a request path.
///
/// `/static` and `/static/` map to the directory root; `/staticx` does not
/// match. An empty mount exposes the whole assets directory at `/`.
fn strip_mount<'a>(path: &'a str, mount: &str) -> Option<&'a str> {
    let mount = mount.trim_end_matches('/');
    if mount.is_empty() {
        return Some(path.trim_start_matches('/'));
    }
    if path == mount {
        return Some("");
    }

    path.strip_prefix(mount)
        .and_then(|rest| rest.strip_prefix('/'))
}

async fn serve_relative(
    ctx: &StaticContext,
    relative: &str,
    assets: &AssetsConfig,
) -> Response<Full<Bytes>> {
    match load(relative, assets).await {
        Some((content, content_type)) => respond_with_file(ctx, content, content_type),
        None => response::not_found(),
    }
}

/// Resolve and read a file under the assets directory.
///
/// Directory requests fall back to the configured index files. Paths that
/// resolve outside the assets directory are refused.
async fn load(relative: &str, assets: &AssetsConfig) -> Option<(Vec<u8>, &'static str)> {
    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        logger::log_warning(&format!("Rejected path with parent components: {relative}"));
        return None;
    }

    let base = match Path::new(&assets.dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Assets directory not found or inaccessible '{}': {e}",
                assets.dir
            ));
            return None;
        }
    };

    let mut file_path = base.join(relative);

    if relative.is_empty() || relative.ends_with('/') || file_path.is_dir() {
        for index in &assets.index_files {
            let candidate = file_path.join(index);
            if candidate.is_file() {
                file_path = candidate;
                break;
            }
        }
    }

    // A missing file is a routine 404, not worth a log line
    let resolved = file_path.canonicalize().ok()?;
    if !resolved.starts_with(&base) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {relative} -> {}",
            resolved.display()
        ));
        return None;
    }

    let content = match fs::read(&resolved).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                resolved.display()
            ));
            return None;
        }
    };

    Some((content, mime::from_path(&resolved)))
}

/// Apply conditional and range semantics to loaded file content
fn respond_with_file(
    ctx: &StaticContext,
    content: Vec<u8>,
    content_type: &str,
) -> Response<Full<Bytes>> {
    let etag = cache::etag_for(&content);
    let total_size = content.len();

    if cache::revalidates(ctx.if_none_match.as_deref(), &etag) {
        return response::not_modified(&etag);
    }

    match range::resolve(ctx.range.as_deref(), total_size) {
        RangeOutcome::Unsatisfiable => response::range_not_satisfiable(total_size),
        RangeOutcome::Partial(slice) => {
            let body = Bytes::from(content[slice.start..=slice.end].to_vec());
            response::partial_content(body, content_type, &etag, slice, total_size, ctx.is_head)
        }
        RangeOutcome::Full => {
            response::file_ok(Bytes::from(content), content_type, &etag, ctx.is_head)
        }
    }
}
