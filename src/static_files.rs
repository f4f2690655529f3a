//! Static asset server.
//!
//! Files are served by `tower_http::services::ServeDir`; directories without
//! an `index.html` get a generated listing. Every response, including 404s
//! and redirects, carries `Access-Control-Allow-Origin: *`.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Router,
};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

const INDEX_FILE: &str = "index.html";

/// Builds the static server rooted at `root`.
pub fn router(root: impl Into<PathBuf>) -> Router {
    let root = Arc::new(root.into());

    Router::new()
        .fallback(serve_path)
        .with_state(root)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}

async fn serve_path(State(root): State<Arc<PathBuf>>, req: Request) -> Response {
    let uri_path = req.uri().path().to_string();

    if req.method() == Method::GET || req.method() == Method::HEAD {
        if let Some(dir) = resolve(&root, &uri_path).filter(|p| p.is_dir()) {
            if !dir.join(INDEX_FILE).is_file() {
                if !uri_path.ends_with('/') {
                    return Redirect::temporary(&format!("{}/", uri_path)).into_response();
                }
                return match render_listing(&dir, &uri_path).await {
                    Ok(html) => Html(html).into_response(),
                    Err(e) => {
                        tracing::error!("Failed to list {}: {}", dir.display(), e);
                        StatusCode::INTERNAL_SERVER_ERROR.into_response()
                    }
                };
            }
        }
    }

    match ServeDir::new(root.as_path()).oneshot(req).await {
        Ok(res) => {
            if res.status() == StatusCode::NOT_FOUND {
                tracing::debug!("Static file not found: {}", uri_path);
            }
            res.map(Body::new)
        }
        Err(never) => match never {},
    }
}

/// Maps a request path onto `root`, `None` if it would leave the root.
pub fn resolve(root: &Path, uri_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(uri_path).ok()?;
    let mut resolved = root.to_path_buf();

    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains('\\') {
            return None;
        }
        match Path::new(segment).components().next() {
            Some(Component::Normal(part)) => resolved.push(part),
            _ => return None,
        }
    }

    Some(resolved)
}

/// Renders an HTML index of `dir`, sorted by name, directories suffixed with `/`.
pub async fn render_listing(dir: &Path, uri_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let is_dir = entry.file_type().await?.is_dir();
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, is_dir));
    }
    entries.sort();

    let title = escape_html(uri_path);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\">\
         <title>Directory listing for {0}</title></head>\n\
         <body>\n<h1>Directory listing for {0}</h1>\n<hr>\n<ul>\n",
        title
    );
    if uri_path != "/" {
        html.push_str("<li><a href=\"../\">../</a></li>\n");
    }
    for (name, is_dir) in &entries {
        let suffix = if *is_dir { "/" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}{}\">{}{}</a></li>\n",
            urlencoding::encode(name),
            suffix,
            escape_html(name),
            suffix
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");

    Ok(html)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
