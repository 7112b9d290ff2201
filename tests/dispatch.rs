//! End-to-end dispatch over real TCP connections.
//!
//! Each test reserves an ephemeral port, serves a gate on it in a background
//! task, and speaks raw HTTP/1.1 at it. Requests use `connection: close` so
//! one `read_to_end` captures the entire response.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use seki::{Context, Gate, Request, Response, Router, Server, health};

/// Reserves an ephemeral port, then serves `gate` on it in a background task.
async fn start(gate: Gate, ctx: Context) -> SocketAddr {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .expect("reserve port")
        .local_addr()
        .expect("local addr");

    tokio::spawn(async move {
        Server::bind(&addr.to_string())
            .context(ctx)
            .serve(gate)
            .await
            .expect("server error");
    });

    addr
}

/// One raw HTTP/1.1 exchange. Returns (status code, lowercased head, body).
async fn exchange(addr: SocketAddr, raw: String) -> (u16, String, String) {
    // The server task may not have bound yet; retry briefly.
    let mut stream = None;
    for _ in 0..50 {
        match TcpStream::connect(addr).await {
            Ok(s) => {
                stream = Some(s);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(20)).await,
        }
    }
    let mut stream = stream.expect("server did not come up");

    stream.write_all(raw.as_bytes()).await.expect("write request");

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.expect("read response");
    let text = String::from_utf8(buf).expect("utf-8 response");

    let (head, body) = text.split_once("\r\n\r\n").expect("malformed response");
    let code: u16 = head
        .split_whitespace()
        .nth(1)
        .expect("status code")
        .parse()
        .expect("numeric status");

    (code, head.to_ascii_lowercase(), body.to_owned())
}

fn get(addr: SocketAddr, path: &str) -> String {
    format!("GET {path} HTTP/1.1\r\nhost: {addr}\r\nconnection: close\r\n\r\n")
}

fn post(addr: SocketAddr, path: &str, body: &str) -> String {
    format!(
        "POST {path} HTTP/1.1\r\nhost: {addr}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Gate around a stub collaborator that counts its invocations.
fn counting_gate() -> (Gate, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let gate = Gate::new(move |_req: Request, _ctx: Context| {
        seen.fetch_add(1, Ordering::SeqCst);
        async { Response::json(br#"{"ok":true}"#.to_vec()) }
    });
    (gate, calls)
}

#[tokio::test]
async fn forwards_matching_requests_end_to_end() {
    let (gate, calls) = counting_gate();
    let addr = start(gate, Context::new()).await;

    let (code, head, body) = exchange(addr, get(addr, "/api/widgets")).await;

    assert_eq!(code, 200);
    assert!(head.contains("content-type: application/json"), "head: {head}");
    assert_eq!(body, r#"{"ok":true}"#);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rejects_paths_outside_the_prefix_without_touching_routes() {
    let (gate, calls) = counting_gate();
    let addr = start(gate, Context::new()).await;

    let (code, head, body) = exchange(addr, get(addr, "/favicon.ico")).await;

    assert_eq!(code, 404);
    assert!(body.is_empty());
    assert!(head.contains("content-length: 0"), "head: {head}");
    // Framing headers come from hyper; the response itself carries none.
    assert!(!head.contains("content-type"), "head: {head}");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn prefix_boundary_holds_over_the_wire() {
    let (gate, _calls) = counting_gate();
    let addr = start(gate, Context::new()).await;

    let (code, _, _) = exchange(addr, get(addr, "/api")).await;
    assert_eq!(code, 404);

    let (code, _, _) = exchange(addr, get(addr, "/api/")).await;
    assert_eq!(code, 200);

    let (code, _, _) = exchange(addr, get(addr, "/API/widgets")).await;
    assert_eq!(code, 404);
}

#[tokio::test]
async fn request_bodies_reach_the_routes() {
    let app = Router::new().post("/api/echo", |req: Request, _ctx: Context| async move {
        let bytes = req.into_bytes().await.unwrap();
        Response::text(String::from_utf8(bytes.to_vec()).unwrap())
    });
    let addr = start(Gate::new(app), Context::new()).await;

    let (code, _, body) = exchange(addr, post(addr, "/api/echo", "payload")).await;

    assert_eq!(code, 200);
    assert_eq!(body, "payload");
}

#[tokio::test]
async fn health_probes_answer_inside_the_prefix_only() {
    let app = Router::new()
        .get("/api/healthz", health::liveness)
        .get("/api/readyz", health::readiness);
    let addr = start(Gate::new(app), Context::new()).await;

    let (code, _, body) = exchange(addr, get(addr, "/api/healthz")).await;
    assert_eq!((code, body.as_str()), (200, "ok"));

    let (code, _, body) = exchange(addr, get(addr, "/api/readyz")).await;
    assert_eq!((code, body.as_str()), (200, "ready"));

    // Outside the prefix the gate answers without consulting the router.
    let (code, _, _) = exchange(addr, get(addr, "/healthz")).await;
    assert_eq!(code, 404);
}

#[tokio::test]
async fn bound_context_reaches_handlers() {
    #[derive(Clone)]
    struct Deployment {
        region: &'static str,
    }

    let app = Router::new().get("/api/region", |_req: Request, ctx: Context| async move {
        let region = ctx.get::<Deployment>().map(|d| d.region).unwrap_or("unset");
        Response::text(region)
    });
    let ctx = Context::builder().bind(Deployment { region: "eu-central-1" }).build();
    let addr = start(Gate::new(app), ctx).await;

    let (code, _, body) = exchange(addr, get(addr, "/api/region")).await;

    assert_eq!(code, 200);
    assert_eq!(body, "eu-central-1");
}
