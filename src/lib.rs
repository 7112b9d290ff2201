//! # seki
//!
//! A path-prefix dispatch gate for HTTP services at the edge.
//!
//! One decision, made well: requests whose path starts with `/api/` go to
//! your application router, untouched. Everything else gets a bare `404`
//! before any application code runs.
//!
//! ## The contract
//!
//! The ingress in front of you owns TLS termination, rate limiting, body-size
//! limits, and slow-client protection. seki intentionally ignores all of
//! them; the proxy does proxy things. What is left is the part that changes
//! between applications:
//!
//! - **The gate**: a literal, case-sensitive `/api/` prefix check ([`Gate`]).
//!   Forwarded requests reach your routes verbatim; rejected ones cost one
//!   string comparison and one empty response.
//! - **Routing**: a radix tree per method under the forwarded prefix
//!   ([`Router`], via [`matchit`]), or any [`Routes`] implementation you
//!   bring yourself.
//! - **Context plumbing**: per-invocation access to service handles bound
//!   once at startup ([`Context`]).
//! - **Hosting**: hyper + tokio, HTTP/1.1 and HTTP/2, graceful shutdown on
//!   SIGTERM / Ctrl-C ([`Server`]).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use seki::{Context, Gate, Request, Response, Router, Server, StatusCode};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .get("/api/widgets/{id}", get_widget)
//!         .post("/api/widgets", create_widget);
//!
//!     Server::bind("0.0.0.0:3000")
//!         .serve(Gate::new(app))
//!         .await
//!         .unwrap();
//! }
//!
//! async fn get_widget(req: Request, _ctx: Context) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//!
//! async fn create_widget(req: Request, _ctx: Context) -> Response {
//!     let body = match req.into_bytes().await {
//!         Ok(b) if !b.is_empty() => b,
//!         _ => return Response::status(StatusCode::BAD_REQUEST),
//!     };
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/api/widgets/99")
//!         .json(body)
//! }
//! ```
//!
//! Anything not under `/api/` never reaches `app`:
//!
//! ```text
//! $ curl -i localhost:3000/favicon.ico
//! HTTP/1.1 404 Not Found
//! ```

mod body;
mod context;
mod error;
mod gate;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod health;

pub use body::Body;
pub use context::{Context, ContextBuilder};
pub use error::{BoxError, Error};
pub use gate::{Gate, RouteFuture, Routes};
pub use handler::Handler;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response};
pub use router::Router;
pub use server::Server;

pub use http::{Method, StatusCode};
