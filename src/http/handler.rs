//! The request handler contract.
//!
//! Every piece of the dispatch graph (router, auth gate, shutdown trigger,
//! application catalog, static files) implements [`Handler`], so they compose
//! statically: a handler owns the handlers it delegates to.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use futures_util::future::BoxFuture;
use tower::ServiceExt;

/// Future returned by [`Handler::handle`].
pub type HandlerFuture<'a> = BoxFuture<'a, Response>;

/// Given a request, produce a response.
///
/// Handlers never fail at the transport level: every per-request condition,
/// including rejections, resolves to a [`Response`].
pub trait Handler: Send + Sync {
    fn handle(&self, request: Request<Body>) -> HandlerFuture<'_>;
}

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn handle(&self, request: Request<Body>) -> HandlerFuture<'_> {
        (**self).handle(request)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&self, request: Request<Body>) -> HandlerFuture<'_> {
        (**self).handle(request)
    }
}

/// Shared, type-erased handler as stored in route tables and engines.
pub type SharedHandler = Arc<dyn Handler>;

/// Adapter running an opaque [`axum::Router`] application as a [`Handler`].
#[derive(Clone)]
pub struct AxumApp {
    router: Router,
}

impl AxumApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

impl Handler for AxumApp {
    fn handle(&self, request: Request<Body>) -> HandlerFuture<'_> {
        let router = self.router.clone();
        Box::pin(async move {
            match router.oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            }
        })
    }
}

/// Run a shared handler against a request, in the shape hyper and axum expect
/// from a service function.
pub async fn serve_request(
    handler: SharedHandler,
    request: Request<Body>,
) -> Result<Response, Infallible> {
    Ok(handler.handle(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get};

    struct Fixed(StatusCode);

    impl Handler for Fixed {
        fn handle(&self, _request: Request<Body>) -> HandlerFuture<'_> {
            let status = self.0;
            Box::pin(async move {
                let mut response = Response::new(Body::empty());
                *response.status_mut() = status;
                response
            })
        }
    }

    #[tokio::test]
    async fn test_arc_and_box_delegate() {
        let shared: SharedHandler = Arc::new(Fixed(StatusCode::ACCEPTED));
        let boxed: Box<dyn Handler> = Box::new(Fixed(StatusCode::CREATED));

        let res = shared.handle(Request::new(Body::empty())).await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);

        let res = boxed.handle(Request::new(Body::empty())).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_axum_app_adapter() {
        let app = AxumApp::new(Router::new().route("/ping", get(|| async { "pong" })));

        let req = Request::builder().uri("/ping").body(Body::empty()).unwrap();
        assert_eq!(app.handle(req).await.status(), StatusCode::OK);

        let req = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        assert_eq!(app.handle(req).await.status(), StatusCode::NOT_FOUND);
    }
}
