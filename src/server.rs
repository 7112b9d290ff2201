//! HTTP server and graceful shutdown.
//!
//! The server owns everything outside the gate's contract: the listening
//! socket, connection tasks, protocol negotiation, and process signals. Each
//! accepted connection runs in its own task; each request on it is dispatched
//! through the gate with a clone of the server's [`Context`].
//!
//! # Graceful shutdown and Kubernetes
//!
//! When Kubernetes terminates a pod it sends **SIGTERM**, then waits
//! `terminationGracePeriodSeconds` (default 30 s) before SIGKILL. On the
//! first signal the server stops accepting new connections, lets in-flight
//! connection tasks run to completion, then returns from [`Server::serve`] so
//! `main` can exit cleanly. Give the grace period more headroom than your
//! slowest request.

use std::convert::Infallible;
use std::net::SocketAddr;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::body::Body;
use crate::context::Context;
use crate::error::Error;
use crate::gate::Gate;
use crate::request::Request;

/// The HTTP server.
///
/// ```rust,no_run
/// # use seki::{Context, Gate, Request, Response, Server};
/// # async fn run(gate: Gate) -> Result<(), seki::Error> {
/// Server::bind("0.0.0.0:3000")
///     .context(Context::new())
///     .serve(gate)
///     .await
/// # }
/// ```
pub struct Server {
    addr: SocketAddr,
    ctx: Context,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr, ctx: Context::new() }
    }

    /// Sets the execution context handed to every invocation.
    ///
    /// Bind service handles and configuration once here; the gate passes the
    /// context through to your routes untouched.
    pub fn context(mut self, ctx: Context) -> Self {
        self.ctx = ctx;
        self
    }

    /// Starts accepting connections and dispatching them through `gate`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight connections completing).
    pub async fn serve(self, gate: Gate) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let ctx = self.ctx;

        info!(addr = %self.addr, "seki listening");

        // JoinSet tracks every spawned connection task so shutdown can wait
        // for all of them.
        let mut tasks = tokio::task::JoinSet::new();

        // Pinned on the stack so the loop can re-poll it each iteration.
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` polls arms top-to-bottom. Shutdown is first so a
                // SIGTERM stops accepting even when connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    // Cloning a Gate or Context bumps an Arc; the router and
                    // bindings themselves are built once and shared.
                    let gate = gate.clone();
                    let ctx = ctx.clone();
                    // TokioIo adapts tokio's AsyncRead/AsyncWrite to hyper's
                    // IO traits.
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection, not once
                        // per connection.
                        let svc = service_fn(move |req| {
                            let gate = gate.clone();
                            let ctx = ctx.clone();
                            async move { dispatch(gate, ctx, req).await }
                        });

                        // `auto::Builder` speaks both HTTP/1.1 and HTTP/2,
                        // whichever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: wait for every in-flight connection to finish before returning.
        while tasks.join_next().await.is_some() {}

        info!("seki stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Hot path: one inbound request becomes exactly one response.
///
/// The error type is [`Infallible`]. The gate cannot fail, so hyper never
/// sees an error from the service; rejection is an ordinary 404 response.
async fn dispatch(
    gate: Gate,
    ctx: Context,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Body>, Infallible> {
    let response = gate.handle(Request::from_hyper(req), ctx).await;
    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** (sent by `kubectl` and the
/// Kubernetes control plane) and **SIGINT** (Ctrl-C, for local dev).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // `pending()` never resolves, so on non-Unix platforms the SIGTERM arm is
    // effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
