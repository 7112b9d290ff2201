//! Minimal seki example: CRUD-style JSON endpoints behind the gate.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/api/widgets/42
//!   curl -X POST http://localhost:3000/api/widgets \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"sprocket"}'
//!   curl -X DELETE http://localhost:3000/api/widgets/42
//!   curl http://localhost:3000/api/healthz
//!
//! Anything outside /api/ is rejected by the gate before routing:
//!   curl -i http://localhost:3000/favicon.ico   → 404, empty body

use seki::{Context, Gate, Request, Response, Router, Server, StatusCode, health};

/// A binding the hosting process owns and handlers only read.
#[derive(Clone)]
struct Deployment {
    region: &'static str,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let ctx = Context::builder()
        .bind(Deployment { region: "eu-central-1" })
        .build();

    let app = Router::new()
        .get("/api/widgets/{id}", get_widget)
        .post("/api/widgets", create_widget)
        .delete("/api/widgets/{id}", delete_widget)
        .get("/api/healthz", health::liveness)
        .get("/api/readyz", health::readiness);

    Server::bind("0.0.0.0:3000")
        .context(ctx)
        .serve(Gate::new(app))
        .await
        .expect("server error");
}

// GET /api/widgets/{id}
//
// Response::json takes bytes from any serialiser:
//   serde_json:  Response::json(serde_json::to_vec(&widget).unwrap())
//   hand-built:  Response::json(format!(...).into_bytes())
async fn get_widget(req: Request, ctx: Context) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    let region = ctx.get::<Deployment>().map(|d| d.region).unwrap_or("local");
    Response::json(format!(r#"{{"id":"{id}","region":"{region}"}}"#).into_bytes())
}

// POST /api/widgets
//
// into_bytes() buffers the body; parse with serde_json::from_slice,
// simd-json, etc. seki does not touch the bytes.
async fn create_widget(req: Request, _ctx: Context) -> Response {
    let body = match req.into_bytes().await {
        Ok(b) => b,
        Err(_) => return Response::status(StatusCode::BAD_REQUEST),
    };
    if body.is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }

    // Real app: let input: CreateWidget = serde_json::from_slice(&body).unwrap();
    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/api/widgets/99")
        .json(r#"{"id":"99","name":"sprocket"}"#.to_owned().into_bytes())
}

// DELETE /api/widgets/{id} → 204 No Content
async fn delete_widget(_req: Request, _ctx: Context) -> Response {
    Response::status(StatusCode::NO_CONTENT)
}
