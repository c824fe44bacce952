//! Debug echo HTTP server

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use qsoecho_core::config::EchoConfig;
use qsoecho_core::{Error, Result};

use crate::routes::Route;

/// Read-only state shared by every connection
#[derive(Debug, Clone)]
pub struct ServerContext {
    /// Bodies larger than this are rejected as unreadable
    pub max_body_size: usize,
}

impl ServerContext {
    pub fn from_config(config: &EchoConfig) -> Self {
        Self {
            max_body_size: config.max_body_size,
        }
    }
}

/// A bound listener, ready to serve
pub struct EchoServer {
    listener: TcpListener,
    ctx: Arc<ServerContext>,
}

impl EchoServer {
    /// Bind the configured listen address
    pub async fn bind(config: &EchoConfig) -> Result<Self> {
        let addr = config.listen_addr()?;
        let listener = TcpListener::bind(addr).await
            .map_err(|e| Error::Server(format!("Failed to bind {}: {}", addr, e)))?;

        Ok(Self {
            listener,
            ctx: Arc::new(ServerContext::from_config(config)),
        })
    }

    /// Address actually bound, useful when listening on port 0
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the process ends
    pub async fn serve(self) -> Result<()> {
        tracing::info!("qsoecho listening on http://{}", self.local_addr()?);

        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(s) => s,
                Err(e) => {
                    tracing::warn!("Accept error: {}", e);
                    continue;
                }
            };

            let io = TokioIo::new(stream);
            let ctx = self.ctx.clone();

            tokio::task::spawn(async move {
                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service_fn(move |req| dispatch(req, ctx.clone(), peer)))
                    .await
                {
                    tracing::warn!("Error serving connection from {}: {:?}", peer, err);
                }
            });
        }
    }
}

/// Bind and serve with the given configuration
pub async fn run_echo_server(config: &EchoConfig) -> Result<()> {
    EchoServer::bind(config).await?.serve().await
}

async fn dispatch(
    req: Request<Incoming>,
    ctx: Arc<ServerContext>,
    peer: SocketAddr,
) -> std::result::Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = handle_request(req, ctx).await?;

    tracing::info!(
        target: "qsoecho::access",
        status = response.status().as_u16(),
        latency_us = started.elapsed().as_micros() as u64,
        client = %peer,
        "{} {}",
        method,
        path
    );
    Ok(response)
}

/// Route a request and produce its response
///
/// Generic over the body so it can be driven without a socket.
pub async fn handle_request<B>(
    req: Request<B>,
    ctx: Arc<ServerContext>,
) -> std::result::Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Some(route) = Route::resolve(req.method(), req.uri().path()) else {
        return Ok(response(StatusCode::NOT_FOUND, "Not Found"));
    };

    let result = read_body(req.into_body(), ctx.max_body_size)
        .await
        .and_then(|body| route.handle(&body));

    match result {
        Ok(text) => Ok(response(StatusCode::OK, text)),
        Err(e) if e.is_request_error() => {
            tracing::warn!("Error while processing {}: {}", route, e);
            Ok(response(e.status(), e.public_message()))
        }
        Err(e) => {
            tracing::error!("Failed to handle {}: {}", route, e);
            Ok(response(e.status(), e.public_message()))
        }
    }
}

async fn read_body<B>(body: B, limit: usize) -> Result<Bytes>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Limited::new(body, limit)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| Error::Transport(e.to_string()))
}

fn response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from_static(body.as_bytes())));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    resp
}
