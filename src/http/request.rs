//! Request path bookkeeping.
//!
//! # Responsibilities
//! - Track the prefix consumed by mounts above the current handler
//! - Split the first segment off a path
//! - Rewrite a request's path while keeping its query string
//!
//! # Design Decisions
//! - The consumed prefix travels as a request extension ([`MountPath`]),
//!   so downstream handlers can build absolute links
//! - An empty remainder is presented as `/`; HTTP has no empty origin path

use axum::{
    body::Body,
    http::{uri::PathAndQuery, Request, Uri},
};

/// Prefix already consumed by mounts above the current handler.
///
/// Absent on requests that have not crossed a mount; equivalent to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountPath(String);

impl MountPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix of `request`, or `""` if it has not crossed a mount.
    pub fn of(request: &Request<Body>) -> &str {
        request
            .extensions()
            .get::<MountPath>()
            .map(MountPath::as_str)
            .unwrap_or("")
    }

    /// New prefix with `segment` appended.
    pub fn join(&self, segment: &str) -> Self {
        Self(format!("{}/{}", self.0, segment))
    }
}

/// Split `path` into its first segment and the remainder.
///
/// The remainder keeps its leading `/`, or is empty when the segment ran to
/// the end of the path. `"/"` and `""` yield an empty segment.
pub fn split_first_segment(path: &str) -> (&str, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.find('/') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    }
}

/// Replace the path of `request`, keeping its query string.
pub fn rewrite_path(request: &mut Request<Body>, path: &str) {
    let path = if path.is_empty() { "/" } else { path };
    let path_and_query = match request.uri().query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = request.uri().clone().into_parts();
    match PathAndQuery::try_from(path_and_query) {
        Ok(pq) => parts.path_and_query = Some(pq),
        Err(e) => {
            // The new path is a suffix of a valid path, so this cannot fail in practice.
            tracing::warn!(error = %e, path = %path, "Rejected rewritten path");
            return;
        }
    }
    if let Ok(uri) = Uri::from_parts(parts) {
        *request.uri_mut() = uri;
    }
}
