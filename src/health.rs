//! Built-in Kubernetes health-check handlers.
//!
//! Kubernetes asks two questions. seki answers them.
//!
//! | Probe | Question |
//! |---|---|
//! | **Liveness** | Is the process alive? Failure → restart. |
//! | **Readiness** | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! The gate only forwards paths under [`Gate::PREFIX`](crate::Gate::PREFIX),
//! so register the probes inside it and point Kubernetes at those paths:
//!
//! ```rust,no_run
//! use seki::{Router, health};
//!
//! let app = Router::new()
//!     .get("/api/healthz", health::liveness)
//!     .get("/api/readyz", health::readiness);
//! ```
//!
//! Override `readiness` with a custom handler if you need to gate on
//! dependency availability (database connections, downstream services, etc.):
//!
//! ```rust,no_run
//! use seki::{Context, Request, Response, StatusCode};
//!
//! async fn readiness(_req: Request, _ctx: Context) -> Response {
//!     if dependencies_are_healthy().await {
//!         Response::text("ready")
//!     } else {
//!         Response::status(StatusCode::SERVICE_UNAVAILABLE)
//!     }
//! }
//!
//! async fn dependencies_are_healthy() -> bool { true }
//! ```

use crate::{Context, Request, Response};

/// Kubernetes liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can respond to
/// HTTP at all, it is alive; this handler intentionally has no dependencies.
pub async fn liveness(_req: Request, _ctx: Context) -> Response {
    Response::text("ok")
}

/// Kubernetes readiness probe handler (default implementation).
///
/// Returns `200 OK` with body `"ready"`. Replace this with your own handler
/// if your application needs a warm-up period or must verify dependency health
/// before accepting traffic.
pub async fn readiness(_req: Request, _ctx: Context) -> Response {
    Response::text("ready")
}
