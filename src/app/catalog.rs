//! Service catalog application.
//!
//! Stands in for the RPC framework's catalog: an opaque [`axum::Router`]
//! listing the configured services. The dispatch graph only sees it through
//! [`AxumApp`](crate::http::AxumApp).

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::CatalogConfig;
use crate::http::request::MountPath;
use crate::http::response::text;

/// Catalog contents shared by its route handlers.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub name: String,
    pub description: String,
    pub services: Vec<String>,
}

impl Catalog {
    pub fn new(name: impl Into<String>, config: &CatalogConfig) -> Self {
        Self {
            name: name.into(),
            description: config.description.clone(),
            services: config.services.clone(),
        }
    }

    fn has_service(&self, service: &str) -> bool {
        self.services.iter().any(|s| s == service)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListingParams {
    format: Option<String>,
}

/// Build the catalog application.
pub fn router(catalog: Catalog) -> Router {
    Router::new()
        .route("/", get(listing))
        .route("/ping", get(ping))
        .route("/{service}", get(service))
        .with_state(Arc::new(catalog))
}

async fn listing(
    State(catalog): State<Arc<Catalog>>,
    Query(params): Query<ListingParams>,
    request: Request,
) -> Response {
    let mount = MountPath::of(&request);

    if params.format.as_deref() == Some("json") {
        let services: Vec<_> = catalog
            .services
            .iter()
            .map(|s| json!({ "name": s, "url": format!("{}/{}", mount, s) }))
            .collect();
        return Json(json!({
            "name": catalog.name,
            "description": catalog.description,
            "services": services,
        }))
        .into_response();
    }

    let mut body = format!("{}\n{}\n\n", catalog.name, catalog.description);
    for service in &catalog.services {
        body.push_str(&format!("{}: {}/{}\n", service, mount, service));
    }
    text(StatusCode::OK, body)
}

async fn ping() -> &'static str {
    "pong"
}

async fn service(
    State(catalog): State<Arc<Catalog>>,
    Path(service): Path<String>,
    request: Request,
) -> Response {
    if !catalog.has_service(&service) {
        return text(StatusCode::NOT_FOUND, format!("No service named {}", service));
    }
    let mount = MountPath::of(&request);
    text(
        StatusCode::OK,
        format!(
            "{} ({})\nwsdl: {}/wsdls/{}.wsdl\n",
            service, catalog.name, mount, service
        ),
    )
}
