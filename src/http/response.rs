//! Response construction helpers.
//!
//! Headers are appended in the order given and sent as-is.

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};

/// Build a response with the given status, content type and body.
pub fn with_content_type(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Body>,
) -> Response {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
        .headers_mut()
        .append(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

/// `text/plain` response.
pub fn text(status: StatusCode, body: impl Into<Body>) -> Response {
    with_content_type(status, "text/plain", body)
}

/// `401` carrying a Basic challenge for `realm`.
pub fn unauthorized_challenge(realm: &str) -> Response {
    let mut response = with_content_type(StatusCode::UNAUTHORIZED, "text/html", "Login");
    let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
        .unwrap_or_else(|_| HeaderValue::from_static("Basic realm=\"Login\""));
    response
        .headers_mut()
        .append(header::WWW_AUTHENTICATE, challenge);
    response
}
