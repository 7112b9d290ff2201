//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, StatusCode};

use crate::body::Body;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Csv,         // text/csv
    EventStream, // text/event-stream  (SSE)
    FormData,    // application/x-www-form-urlencoded
    Html,        // text/html; charset=utf-8
    Json,        // application/json
    OctetStream, // application/octet-stream  (binary / file download)
    Text,        // text/plain; charset=utf-8
    Xml,         // application/xml
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::EventStream => "text/event-stream",
            Self::FormData => "application/x-www-form-urlencoded",
            Self::Html => "text/html; charset=utf-8",
            Self::Json => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text => "text/plain; charset=utf-8",
            Self::Xml => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use seki::{Response, StatusCode};
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use seki::{ContentType, Response, StatusCode};
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/api/widgets/42")
///     .json(br#"{"id":42}"#.to_vec());
///
/// Response::builder()
///     .status(StatusCode::OK)
///     .bytes(ContentType::Xml, b"<ok/>".to_vec());
/// ```
pub struct Response {
    inner: http::Response<Body>,
}

impl Response {
    /// `200 OK` with an `application/json` body.
    ///
    /// Takes bytes from any serializer, no intermediate copy:
    /// `serde_json::to_vec(&val)`, `format!(r#"{{"id":{id}}}"#).into_bytes()`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::with_content_type("application/json", body.into())
    }

    /// `200 OK` with a `text/plain; charset=utf-8` body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::with_content_type("text/plain; charset=utf-8", Bytes::from(body.into()))
    }

    /// A response with the given status, no body, and no headers.
    ///
    /// This is the shape of the gate's synthesized 404.
    pub fn status(code: StatusCode) -> Self {
        let mut res = http::Response::new(Body::empty());
        *res.status_mut() = code;
        Self { inner: res }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: HeaderMap::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode {
        self.inner.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Consumes the response, returning its body stream.
    pub fn into_body(self) -> Body {
        self.inner.into_body()
    }

    /// Unwraps into the underlying [`http::Response`] for the wire.
    pub fn into_inner(self) -> http::Response<Body> {
        self.inner
    }

    fn with_content_type(content_type: &'static str, body: Bytes) -> Self {
        let mut res = http::Response::new(Body::from(body));
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Self { inner: res }
    }
}

/// Routers that build raw [`http::Response`] values can hand them straight
/// back through the gate.
impl From<http::Response<Body>> for Response {
    fn from(inner: http::Response<Body>) -> Self {
        Self { inner }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by a
/// typed body method, so the content type is always explicit.
pub struct ResponseBuilder {
    headers: HeaderMap,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    /// Appends a header.
    ///
    /// # Panics
    ///
    /// Panics if `name` or `value` is not a valid HTTP header. Response
    /// composition happens in application code; a malformed header there is a
    /// bug to surface, not an error to route.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name: HeaderName = name
            .parse()
            .unwrap_or_else(|_| panic!("invalid header name `{name}`"));
        let value: HeaderValue = value
            .parse()
            .unwrap_or_else(|_| panic!("invalid value for header `{name}`"));
        self.headers.append(name, value);
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: impl Into<Bytes>) -> Response {
        self.finish("application/json", body.into())
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", Bytes::from(body.into()))
    }

    /// Terminate with a typed body. Use this for XML, HTML, binary, SSE, etc.
    pub fn bytes(self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        self.finish(content_type.as_str(), body.into())
    }

    /// Terminate with no body (e.g. `204 No Content`, `301 Moved Permanently`).
    pub fn no_body(self) -> Response {
        let mut res = http::Response::new(Body::empty());
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        Response { inner: res }
    }

    fn finish(self, content_type: &'static str, body: Bytes) -> Response {
        let mut res = http::Response::new(Body::from(body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        Response { inner: res }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers:
///
/// ```rust
/// use seki::{IntoResponse, Response};
///
/// struct Widget {
///     id: u32,
/// }
///
/// impl IntoResponse for Widget {
///     fn into_response(self) -> Response {
///         Response::json(format!(r#"{{"id":{}}}"#, self.id).into_bytes())
///     }
/// }
/// ```
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

impl IntoResponse for String {
    fn into_response(self) -> Response {
        Response::text(self)
    }
}

/// Return a [`StatusCode`] directly from a handler: `return StatusCode::NOT_FOUND`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response {
        Response::status(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_sets_content_type_and_body() {
        let res = Response::json(br#"{"ok":true}"#.to_vec());
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        let body = res.into_body().into_bytes().await.unwrap();
        assert_eq!(&body[..], br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn status_carries_no_body_and_no_headers() {
        let res = Response::status(StatusCode::NOT_FOUND);
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert!(res.headers().is_empty());
        assert!(res.into_body().into_bytes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn builder_composes_status_headers_and_body() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/api/widgets/7")
            .json(br#"{"id":7}"#.to_vec());

        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(res.headers().get("location").unwrap(), "/api/widgets/7");
        assert_eq!(res.headers().get(CONTENT_TYPE).unwrap(), "application/json");
        let body = res.into_body().into_bytes().await.unwrap();
        assert_eq!(&body[..], br#"{"id":7}"#);
    }

    #[test]
    fn builder_no_body_keeps_custom_headers_only() {
        let res = Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header("x-reason", "drained")
            .no_body();

        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert_eq!(res.headers().len(), 1);
    }

    #[test]
    fn str_and_status_convert_into_responses() {
        assert_eq!("hi".into_response().status_code(), StatusCode::OK);
        assert_eq!(
            StatusCode::IM_A_TEAPOT.into_response().status_code(),
            StatusCode::IM_A_TEAPOT
        );
    }
}
