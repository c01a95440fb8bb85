//! Static file exposure in front of an application.
//!
//! # Responsibilities
//! - Serve files from a directory under a URL prefix
//! - List directories as plain text
//! - Pass every other request to the wrapped application untouched
//!
//! # Design Decisions
//! - Paths are mapped component by component; `..` and absolute components
//!   are refused with 404
//! - A prefix hit that names nothing on disk falls through to the application

use std::path::{Component, Path, PathBuf};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};

use crate::http::handler::{Handler, HandlerFuture};
use crate::http::response::{text, with_content_type};

/// Exposes `directory` under `url_prefix`, delegating everything else to `inner`.
pub struct SharedData<H> {
    inner: H,
    url_prefix: String,
    directory: PathBuf,
}

impl<H> SharedData<H> {
    pub fn new(inner: H, url_prefix: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        let url_prefix = url_prefix.into().trim_end_matches('/').to_string();
        Self {
            inner,
            url_prefix,
            directory: directory.into(),
        }
    }

    /// Part of `path` below the prefix, if `path` is under it.
    fn strip_prefix<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(&self.url_prefix)?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    fn map_path(&self, rel: &str) -> Option<PathBuf> {
        let mut path = self.directory.clone();
        for comp in Path::new(rel.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => path.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(path)
    }
}

fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "wsdl" | "xsd" | "xml" => "text/xml",
        "html" => "text/html",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

async fn list_directory(path: &Path) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(path).await?;
    while let Some(entry) = dir.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();

    let mut body = entries.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    Ok(body)
}

impl<H: Handler> Handler for SharedData<H> {
    fn handle(&self, request: Request<Body>) -> HandlerFuture<'_> {
        Box::pin(async move {
            let is_read = matches!(*request.method(), Method::GET | Method::HEAD);
            let rel = self.strip_prefix(request.uri().path()).map(str::to_string);
            let rel = match rel {
                Some(rel) if is_read => rel,
                _ => return self.inner.handle(request).await,
            };

            let Some(path) = self.map_path(&rel) else {
                tracing::warn!(path = %request.uri().path(), "Refused path outside shared directory");
                return text(StatusCode::NOT_FOUND, "Not Found");
            };

            let metadata = match tokio::fs::metadata(&path).await {
                Ok(m) => m,
                Err(_) => return self.inner.handle(request).await,
            };

            let result: std::io::Result<Response> = if metadata.is_dir() {
                list_directory(&path)
                    .await
                    .map(|listing| text(StatusCode::OK, listing))
            } else {
                tokio::fs::read(&path)
                    .await
                    .map(|bytes| with_content_type(StatusCode::OK, content_type(&path), bytes))
            };

            result.unwrap_or_else(|e| {
                tracing::error!(path = %path.display(), error = %e, "Failed to read shared file");
                text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fallback;

    impl Handler for Fallback {
        fn handle(&self, request: Request<Body>) -> HandlerFuture<'_> {
            let body = format!("app {}", request.uri().path());
            Box::pin(async move { Response::new(Body::from(body)) })
        }
    }

    fn shared(dir: &Path) -> SharedData<Fallback> {
        SharedData::new(Fallback, "/wsdls", dir)
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("calculator.wsdl"), "<definitions/>").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("note.txt"), "hi").unwrap();
        dir
    }

    async fn call(handler: &impl Handler, method: Method, uri: &str) -> (StatusCode, String, Option<String>) {
        let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
        let res = handler.handle(req).await;
        let status = res.status();
        let ct = res
            .headers()
            .get("content-type")
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap(), ct)
    }

    #[tokio::test]
    async fn test_serves_file_with_type() {
        let dir = fixture();
        let (status, body, ct) = call(&shared(dir.path()), Method::GET, "/wsdls/calculator.wsdl").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<definitions/>");
        assert_eq!(ct.as_deref(), Some("text/xml"));
    }

    #[tokio::test]
    async fn test_lists_directory() {
        let dir = fixture();
        let handler = shared(dir.path());
        let (status, body, _) = call(&handler, Method::GET, "/wsdls/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "calculator.wsdl\nnested/\n");

        let (_, body, _) = call(&handler, Method::GET, "/wsdls").await;
        assert_eq!(body, "calculator.wsdl\nnested/\n");
    }

    #[tokio::test]
    async fn test_other_paths_reach_app() {
        let dir = fixture();
        let handler = shared(dir.path());
        assert_eq!(call(&handler, Method::GET, "/ping").await.1, "app /ping");
        assert_eq!(call(&handler, Method::GET, "/wsdlsx").await.1, "app /wsdlsx");
        assert_eq!(call(&handler, Method::GET, "/wsdls/missing.wsdl").await.1, "app /wsdls/missing.wsdl");
        assert_eq!(call(&handler, Method::POST, "/wsdls/calculator.wsdl").await.1, "app /wsdls/calculator.wsdl");
    }

    #[tokio::test]
    async fn test_traversal_refused() {
        let dir = fixture();
        let (status, _, _) = call(&shared(dir.path()), Method::GET, "/wsdls/../secret").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
