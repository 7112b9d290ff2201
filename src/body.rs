//! HTTP body as a boxed frame stream.
//!
//! The gate forwards requests and responses without touching their bodies, so
//! both directions carry a stream rather than a buffer: on the server path it
//! wraps [`hyper::body::Incoming`], in handlers and tests it wraps in-memory
//! bytes. [`Body::into_bytes`] collects the stream when a handler actually
//! needs the payload.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::{Body as _, Frame, Incoming, SizeHint};

use crate::error::{BoxError, Error};

/// A request or response body.
pub struct Body(UnsyncBoxBody<Bytes, BoxError>);

impl Body {
    /// A body with no frames. The gate's synthesized 404 carries this.
    pub fn empty() -> Self {
        Self(Empty::<Bytes>::new().map_err(|never| match never {}).boxed_unsync())
    }

    pub(crate) fn incoming(body: Incoming) -> Self {
        Self(body.map_err(|e| Box::new(e) as BoxError).boxed_unsync())
    }

    /// Collects every frame of the stream into one buffer.
    pub async fn into_bytes(self) -> Result<Bytes, Error> {
        Ok(self.0.collect().await.map_err(Error::Body)?.to_bytes())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self(Full::new(bytes).map_err(|never| match never {}).boxed_unsync())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes::from(bytes).into()
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Bytes::from(s).into()
    }
}

impl From<&'static str> for Body {
    fn from(s: &'static str) -> Self {
        Bytes::from_static(s.as_bytes()).into()
    }
}

impl hyper::body::Body for Body {
    type Data = Bytes;
    type Error = BoxError;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.get_mut().0).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.0.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.0.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_body_collects_to_nothing() {
        let bytes = Body::empty().into_bytes().await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn buffered_body_round_trips() {
        let bytes = Body::from("hello").into_bytes().await.unwrap();
        assert_eq!(&bytes[..], b"hello");

        let bytes = Body::from(vec![1u8, 2, 3]).into_bytes().await.unwrap();
        assert_eq!(&bytes[..], &[1, 2, 3]);
    }

    #[test]
    fn empty_body_reports_end_of_stream() {
        use hyper::body::Body as _;
        assert!(Body::empty().is_end_stream());
    }
}
