//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

use crate::body::Body;
use crate::error::Error;

/// An incoming HTTP request.
///
/// Built by the hosting runtime once per inbound request and consumed exactly
/// once: either the gate answers it with a 404, or it moves on to the router
/// and then into a handler. There is no way to hold one across requests.
///
/// For handler tests, build one from a plain [`http::Request`]:
///
/// ```rust
/// use seki::{Body, Request};
///
/// let req: Request = http::Request::builder()
///     .uri("/api/widgets?page=2")
///     .body(Body::empty())
///     .unwrap()
///     .into();
///
/// assert_eq!(req.path(), "/api/widgets");
/// assert_eq!(req.query(), Some("page=2"));
/// ```
pub struct Request {
    inner: http::Request<Body>,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn from_hyper(req: hyper::Request<hyper::body::Incoming>) -> Self {
        let (parts, body) = req.into_parts();
        Self::from(http::Request::from_parts(parts, Body::incoming(body)))
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// The path component of the target URI. Query and fragment excluded.
    pub fn path(&self) -> &str {
        self.inner.uri().path()
    }

    /// The raw query string, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.inner.uri().query()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Case-insensitive header lookup. `None` for absent or non-UTF-8 values.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter captured by the router.
    ///
    /// For a route `/api/users/{id}`, `req.param("id")` on `/api/users/42`
    /// returns `Some("42")`. Empty until a route has matched.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Consumes the request, returning its body stream.
    pub fn into_body(self) -> Body {
        self.inner.into_body()
    }

    /// Consumes the request and collects the body stream into one buffer.
    pub async fn into_bytes(self) -> Result<Bytes, Error> {
        self.into_body().into_bytes().await
    }

    /// Unwraps back into the underlying [`http::Request`].
    pub fn into_inner(self) -> http::Request<Body> {
        self.inner
    }
}

impl From<http::Request<Body>> for Request {
    fn from(inner: http::Request<Body>) -> Self {
        Self { inner, params: HashMap::new() }
    }
}
