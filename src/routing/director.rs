//! First-segment dispatch.
//!
//! # Responsibilities
//! - Hold the route table (lower-cased mount name → handler) and a default handler
//! - Match the first path segment case-insensitively
//! - Strip the matched segment before delegating; never strip on fallthrough
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) mount lookup via HashMap
//! - A miss is a silent fallthrough to the default handler, not an error
//! - Root requests (`/`) have an empty segment and always fall through

use std::collections::HashMap;

use axum::{body::Body, http::Request};
use thiserror::Error;

use crate::http::handler::{Handler, HandlerFuture, SharedHandler};
use crate::http::request::{rewrite_path, split_first_segment, MountPath};

/// Errors raised while building a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("mount {0:?} is registered more than once")]
    DuplicateMount(String),

    #[error("mount name {0:?} is not a single path segment")]
    InvalidMount(String),
}

/// Mount name → handler, keyed by lower-cased name.
pub struct RouteTable {
    mounts: HashMap<String, SharedHandler>,
}

impl RouteTable {
    /// Build a table from a fixed list of `(name, handler)` pairs.
    pub fn new<I, S>(mounts: I) -> Result<Self, RouteTableError>
    where
        I: IntoIterator<Item = (S, SharedHandler)>,
        S: AsRef<str>,
    {
        let mut table = HashMap::new();
        for (name, handler) in mounts {
            let name = name.as_ref();
            if name.is_empty() || name == "." || name == ".." || name.contains('/') {
                return Err(RouteTableError::InvalidMount(name.to_string()));
            }
            let key = name.to_lowercase();
            if table.insert(key.clone(), handler).is_some() {
                return Err(RouteTableError::DuplicateMount(key));
            }
        }
        Ok(Self { mounts: table })
    }

    /// Look up the handler mounted at `segment` (case-insensitive).
    pub fn resolve(&self, segment: &str) -> Option<&SharedHandler> {
        if segment.is_empty() {
            return None;
        }
        self.mounts.get(&segment.to_lowercase())
    }

    /// Registered mount names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.mounts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("mounts", &self.names())
            .finish()
    }
}

/// Routes a request to a named mount by its first path segment, or to the
/// default handler.
pub struct Director {
    default: SharedHandler,
    routes: RouteTable,
}

impl Director {
    pub fn new(default: SharedHandler, routes: RouteTable) -> Self {
        tracing::debug!(mounts = ?routes.names(), "Director built");
        Self { default, routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

impl Handler for Director {
    fn handle(&self, mut request: Request<Body>) -> HandlerFuture<'_> {
        let path = request.uri().path().to_string();
        let (segment, remainder) = split_first_segment(&path);

        match self.routes.resolve(segment) {
            Some(handler) => {
                tracing::debug!(mount = %segment.to_lowercase(), path = %path, "Dispatching to mount");

                let mount = request
                    .extensions()
                    .get::<MountPath>()
                    .cloned()
                    .unwrap_or_default()
                    .join(segment);
                request.extensions_mut().insert(mount);
                rewrite_path(&mut request, remainder);

                handler.handle(request)
            }
            None => {
                tracing::debug!(path = %path, "Dispatching to default");
                self.default.handle(request)
            }
        }
    }
}
