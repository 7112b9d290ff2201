//! Handler trait and type erasure.
//!
//! Every route handler is an `async fn(Request, Context) -> impl IntoResponse`,
//! and each one is a distinct anonymous type. To store them side by side the
//! router erases them behind `dyn ErasedHandler`:
//!
//! ```text
//! async fn list(req: Request, ctx: Context) -> Response { … }
//!        ↓ router.get("/api/widgets", list)        Handler blanket impl
//! Arc::new(FnHandler(list)) as BoxedHandler
//!        ↓ handler.call(req, ctx) at request time  one vtable dispatch
//! Box::pin(async move { list(req, ctx).await.into_response() })
//! ```
//!
//! Per request that costs one `Arc` clone and one virtual call, which is noise
//! next to the socket I/O around it.

use std::future::Future;
use std::sync::Arc;

use crate::context::Context;
use crate::gate::RouteFuture;
use crate::request::Request;
use crate::response::IntoResponse;

// ── Erasure types ─────────────────────────────────────────────────────────────

/// Object-safe dispatch interface the router stores.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it leaks through the
/// return type of [`Handler::into_boxed_handler`]. Not useful downstream.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request, ctx: Context) -> RouteFuture;
}

/// A type-erased handler, cheaply shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself: the blanket impl below covers any
/// `async fn name(req: Request, ctx: Context) -> impl IntoResponse`, whether a
/// named function, an async closure, or a struct implementing `Fn`.
///
/// The trait is sealed through the private `Sealed` supertrait, so the blanket
/// impl is the only way to satisfy it and the signature can evolve without
/// breaking downstream code.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// `Sealed` is private, so external crates cannot name it and therefore
/// cannot implement [`Handler`] on their own types.
mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds the concrete `F` and bridges it into the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request, Context) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, ctx: Context) -> RouteFuture {
        // Obtain the concrete future first so the boxed async block only
        // captures `Fut`, not `&self`.
        let fut = (self.0)(req, ctx);
        Box::pin(async move { fut.await.into_response() })
    }
}
