//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. No magic, no middleware
//! stack, no reflection. You register a path, you get a handler. That is all.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::context::Context;
use crate::gate::{RouteFuture, Routes};
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The bundled application router.
///
/// One radix tree per HTTP method. Build it once at startup, wrap it in a
/// [`Gate`](crate::Gate), and hand that to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so routes chain naturally.
///
/// The gate forwards requests without rewriting the path, so register routes
/// under the forwarded prefix in full: `/api/widgets`, not `/widgets`.
/// Requests the gate forwards but no route claims are answered `404` here.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    /// Prefer the verb shorthands below for the common methods:
    ///
    /// ```rust,no_run
    /// # use seki::{Context, Method, Request, Response, Router};
    /// # async fn list_widgets(_: Request, _: Context) -> Response { Response::text("") }
    /// # async fn get_widget(_: Request, _: Context) -> Response { Response::text("") }
    /// # async fn create_widget(_: Request, _: Context) -> Response { Response::text("") }
    /// Router::new()
    ///     .get("/api/widgets", list_widgets)
    ///     .get("/api/widgets/{id}", get_widget)
    ///     .on(Method::POST, "/api/widgets", create_widget);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern (e.g. conflicting
    /// registrations or malformed parameter syntax). Routes are registered at
    /// startup; a bad pattern should stop the process, not serve traffic.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.add(method, path, handler)
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::PUT, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::PATCH, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.add(Method::DELETE, path, handler)
    }

    fn add(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl Routes for Router {
    /// An unrouted method or path answers `404`, same shape as the gate's own
    /// rejection. A wrong method on a known path is a miss like any other.
    fn route(&self, req: Request, ctx: Context) -> RouteFuture {
        match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => handler.call(req.with_params(params), ctx),
            None => Box::pin(std::future::ready(Response::status(StatusCode::NOT_FOUND))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;

    fn request(method: Method, target: &str) -> Request {
        http::Request::builder()
            .method(method)
            .uri(target)
            .body(Body::empty())
            .unwrap()
            .into()
    }

    async fn body_of(res: Response) -> String {
        let bytes = res.into_body().into_bytes().await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn routes_by_method_and_path() {
        let router = Router::new()
            .get("/api/widgets", |_req: Request, _ctx: Context| async {
                Response::text("list")
            })
            .post("/api/widgets", |_req: Request, _ctx: Context| async {
                Response::text("create")
            });

        let res = router.route(request(Method::GET, "/api/widgets"), Context::new()).await;
        assert_eq!(body_of(res).await, "list");

        let res = router.route(request(Method::POST, "/api/widgets"), Context::new()).await;
        assert_eq!(body_of(res).await, "create");
    }

    #[tokio::test]
    async fn captures_path_parameters() {
        let router = Router::new().get("/api/widgets/{id}", |req: Request, _ctx: Context| async move {
            Response::text(req.param("id").unwrap_or("?").to_owned())
        });

        let res = router.route(request(Method::GET, "/api/widgets/42"), Context::new()).await;
        assert_eq!(body_of(res).await, "42");
    }

    #[tokio::test]
    async fn unknown_path_and_wrong_method_both_miss() {
        let router = Router::new().get("/api/widgets", |_req: Request, _ctx: Context| async {
            Response::text("list")
        });

        let res = router.route(request(Method::GET, "/api/gadgets"), Context::new()).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

        let res = router.route(request(Method::DELETE, "/api/widgets"), Context::new()).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_registration_panics() {
        let handler = |_req: Request, _ctx: Context| async { Response::text("") };
        let _ = Router::new()
            .get("/api/widgets/{id}", handler)
            .get("/api/widgets/{slug}", handler);
    }
}
