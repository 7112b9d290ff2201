//! The dispatch gate: the decision point between the socket and your routes.
//!
//! A [`Gate`] looks at one thing, the request path. Paths under `/api/` are
//! handed to the application's [`Routes`] collaborator with the request and
//! context untouched, and whatever that collaborator returns goes back to the
//! client verbatim. Every other path is answered with a bare `404` and the
//! collaborator is never consulted.
//!
//! The gate holds no state and takes no locks; it suspends only while
//! awaiting the collaborator. It is a pure function of (request, context).
//!
//! ```rust
//! use seki::{Context, Gate, Request, Response};
//!
//! let gate = Gate::new(|req: Request, _ctx: Context| async move {
//!     Response::text(format!("hit {}", req.path()))
//! });
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http::StatusCode;

use crate::context::Context;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Routes ────────────────────────────────────────────────────────────────────

/// A boxed future resolving to a [`Response`].
///
/// `Send + 'static` so tokio may move in-flight invocations across threads.
pub type RouteFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// The application router behind the gate.
///
/// The gate places no constraints on what a router does internally. It must
/// only produce a complete response for every request it is handed, matched
/// or not; sub-route misses are its own to answer (the bundled
/// [`Router`](crate::Router) replies `404`).
///
/// Implemented out of the box by [`Router`](crate::Router) and by any
/// `async fn(Request, Context) -> impl IntoResponse`, so a closure is enough
/// when a route table is more than you need.
pub trait Routes: Send + Sync + 'static {
    fn route(&self, req: Request, ctx: Context) -> RouteFuture;
}

impl<F, Fut, R> Routes for F
where
    F: Fn(Request, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn route(&self, req: Request, ctx: Context) -> RouteFuture {
        let fut = (self)(req, ctx);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── Gate ──────────────────────────────────────────────────────────────────────

/// Path-prefix dispatch gate.
///
/// Build one at startup around your router and hand it to
/// [`Server::serve`](crate::Server::serve). The router is constructed once and
/// shared read-only across all invocations; cloning a `Gate` clones an `Arc`,
/// not the router.
#[derive(Clone)]
pub struct Gate {
    routes: Arc<dyn Routes>,
}

impl Gate {
    /// Paths must start with this literal for a request to be forwarded.
    ///
    /// The comparison is case-sensitive and anchored at the start of the
    /// path. `/api/` itself is forwarded; `/api` without the trailing slash
    /// is not.
    pub const PREFIX: &'static str = "/api/";

    pub fn new(routes: impl Routes) -> Self {
        Self { routes: Arc::new(routes) }
    }

    /// Classifies one request and produces exactly one response.
    ///
    /// On a prefix match the original request and context are forwarded to
    /// the routes collaborator exactly once and its response is returned
    /// unmodified, body stream included. The prefix is not stripped;
    /// collaborators see the full path. On a miss the gate synthesizes
    /// `404 Not Found` with no body and no headers.
    ///
    /// The gate itself cannot fail. A string-prefix test has no error case,
    /// and collaborator faults surface as whatever response the collaborator
    /// chose to turn them into.
    pub async fn handle(&self, req: Request, ctx: Context) -> Response {
        if req.path().starts_with(Self::PREFIX) {
            self.routes.route(req, ctx).await
        } else {
            Response::status(StatusCode::NOT_FOUND)
        }
    }
}
