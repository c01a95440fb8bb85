//! Basic authentication gate.
//!
//! # Responsibilities
//! - Extract and decode the `Authorization` header
//! - Accept credentials whose username equals the password
//! - Answer everything else with a `401` Basic challenge
//!
//! # Design Decisions
//! - The username == password check is a fixture for client tests, not a
//!   real credential store; keep it exactly as is
//! - Malformed headers degrade to the challenge, never to a transport error
//! - Stateless: every request authenticates on its own

use axum::{
    body::Body,
    http::{header, Request},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::http::handler::{Handler, HandlerFuture};
use crate::http::response::unauthorized_challenge;

/// Why a credential header was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthRejection {
    #[error("missing authorization header")]
    Missing,

    #[error("authorization header is not visible ASCII")]
    OpaqueHeader,

    #[error("authorization header has no credentials")]
    NoPayload,

    #[error("credentials are not valid base64")]
    BadEncoding,

    #[error("credentials are not valid UTF-8")]
    NotUtf8,

    #[error("credentials have no ':' separator")]
    NoSeparator,

    #[error("username and password differ")]
    Mismatch,
}

/// A decoded username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Decode an `Authorization` header value. The scheme token is discarded.
    pub fn parse(header: &str) -> Result<Self, AuthRejection> {
        let encoded = header
            .trim()
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
            .ok_or(AuthRejection::NoPayload)?;

        let decoded = STANDARD
            .decode(encoded)
            .map_err(|_| AuthRejection::BadEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthRejection::NotUtf8)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(AuthRejection::NoSeparator)?;

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Byte-for-byte username == password.
    pub fn is_valid(&self) -> bool {
        self.username.as_bytes() == self.password.as_bytes()
    }
}

/// Check a request's credentials.
pub fn authenticate(request: &Request<Body>) -> Result<Credentials, AuthRejection> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthRejection::Missing)?
        .to_str()
        .map_err(|_| AuthRejection::OpaqueHeader)?;

    let credentials = Credentials::parse(header)?;
    if credentials.is_valid() {
        Ok(credentials)
    } else {
        Err(AuthRejection::Mismatch)
    }
}

/// Wraps one handler behind a Basic authentication challenge.
pub struct BasicAuth<H> {
    inner: H,
    realm: String,
}

impl<H> BasicAuth<H> {
    pub fn new(inner: H, realm: impl Into<String>) -> Self {
        Self {
            inner,
            realm: realm.into(),
        }
    }
}

impl<H: Handler> Handler for BasicAuth<H> {
    fn handle(&self, request: Request<Body>) -> HandlerFuture<'_> {
        match authenticate(&request) {
            Ok(credentials) => {
                tracing::debug!(username = %credentials.username, "Authenticated");
                self.inner.handle(request)
            }
            Err(reason) => {
                tracing::warn!(
                    reason = %reason,
                    path = %request.uri().path(),
                    "Authentication failed"
                );
                let response = unauthorized_challenge(&self.realm);
                Box::pin(async move { response })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::Response};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct Counting(Arc<AtomicU32>);

    impl Handler for Counting {
        fn handle(&self, _request: Request<Body>) -> HandlerFuture<'_> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Box::pin(async { Response::new(Body::from("inner")) })
        }
    }

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(user_pass))
    }

    fn request(auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/ping");
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn gate() -> (BasicAuth<Counting>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (BasicAuth::new(Counting(calls.clone()), "Login"), calls)
    }

    #[test]
    fn test_parse_credentials() {
        let creds = Credentials::parse(&basic("alice:alice")).unwrap();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password, "alice");
        assert!(creds.is_valid());

        // Password may itself contain ':'.
        let creds = Credentials::parse(&basic("a:b:c")).unwrap();
        assert_eq!(creds.username, "a");
        assert_eq!(creds.password, "b:c");
        assert!(!creds.is_valid());
    }

    #[test]
    fn test_scheme_token_is_ignored() {
        assert!(Credentials::parse(&format!("Digest {}", STANDARD.encode("x:x"))).is_ok());
    }

    #[test]
    fn test_malformed_headers() {
        assert_eq!(Credentials::parse("Basic").unwrap_err(), AuthRejection::NoPayload);
        assert_eq!(Credentials::parse("Basic ").unwrap_err(), AuthRejection::NoPayload);
        assert_eq!(Credentials::parse("Basic !!!").unwrap_err(), AuthRejection::BadEncoding);
        assert_eq!(
            Credentials::parse(&format!("Basic {}", STANDARD.encode([0xff, 0xfe]))).unwrap_err(),
            AuthRejection::NotUtf8
        );
        assert_eq!(
            Credentials::parse(&basic("nocolon")).unwrap_err(),
            AuthRejection::NoSeparator
        );
    }

    #[test]
    fn test_empty_pair_is_valid() {
        assert!(Credentials::parse(&basic(":")).unwrap().is_valid());
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::parse(&basic("alice:secret")).unwrap();
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_opaque_header_value() {
        let mut req = request(None);
        req.headers_mut().insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_bytes(b"Basic \xe9t\xe9").unwrap(),
        );
        assert_eq!(authenticate(&req).unwrap_err(), AuthRejection::OpaqueHeader);
        assert_eq!(authenticate(&request(None)).unwrap_err(), AuthRejection::Missing);
    }

    #[tokio::test]
    async fn test_matching_pair_passes_through() {
        let (gate, calls) = gate();
        let res = gate.handle(request(Some(&basic("alice:alice")))).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejections_never_reach_inner() {
        let (gate, calls) = gate();
        let bad_utf8 = format!("Basic {}", STANDARD.encode([0xc3, 0x28, b':']));
        let cases = [
            None,
            Some(basic("alice:bob")),
            Some(basic("Alice:alice")),
            Some("Basic".to_string()),
            Some("Basic not-base64".to_string()),
            Some(bad_utf8),
        ];

        for auth in cases {
            let res = gate.handle(request(auth.as_deref())).await;
            assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(res.headers()["www-authenticate"], "Basic realm=\"Login\"");
            let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&body[..], b"Login");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
