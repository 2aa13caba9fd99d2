//! HTTP/1 server loop.
//!
//! Accepts connections, collects each request body and hands the request to
//! `routes::dispatch`. Every request is processed independently; there is no
//! cross-request locking around the record stores.

use crate::routes::{dispatch, ApiResponse};
use crate::state::AppState;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use log::{debug, info, warn};
use std::convert::Infallible;
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// REST server over the shared application state.
pub struct HttpServer {
    state: Arc<AppState>,
    bind_addr: SocketAddr,
}

impl HttpServer {
    pub fn new(state: Arc<AppState>, bind_addr: SocketAddr) -> Self {
        Self { state, bind_addr }
    }

    /// Accepts connections until the listener fails.
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.bind_addr).await?;
        info!(
            "event=http_listen module=server status=ok addr={}",
            self.bind_addr
        );

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let state = Arc::clone(&self.state);

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let state = Arc::clone(&state);
                    async move { Ok::<_, Infallible>(handle_request(&state, req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    warn!(
                        "event=http_connection module=server status=error remote={} error={}",
                        remote_addr, err
                    );
                }
            });
        }
    }
}

async fn handle_request(state: &AppState, req: Request<Incoming>) -> Response<Full<Bytes>> {
    let started_at = Instant::now();
    let (parts, body) = req.into_parts();

    let response = match read_body(body).await {
        Ok(bytes) => dispatch(
            state,
            &parts.method,
            parts.uri.path(),
            parts.uri.query(),
            &bytes,
        ),
        Err(response) => response,
    };

    debug!(
        "event=http_request module=server status={} method={} path={} duration_ms={}",
        response.status.as_u16(),
        parts.method,
        parts.uri.path(),
        started_at.elapsed().as_millis()
    );

    into_hyper(response)
}

/// Collects at most `MAX_BODY_BYTES` of `body`; anything larger is a 400.
async fn read_body<B>(body: B) -> Result<Bytes, ApiResponse>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(
                "event=http_body module=server status=rejected error_code=too_large limit={MAX_BODY_BYTES}"
            );
            Err(ApiResponse {
                status: StatusCode::BAD_REQUEST,
                body: Bytes::from_static(br#"{"error":"request body too large"}"#),
            })
        }
        Err(err) => {
            warn!("event=http_body module=server status=error error={err}");
            Err(ApiResponse {
                status: StatusCode::BAD_REQUEST,
                body: Bytes::from_static(br#"{"error":"failed to read request body"}"#),
            })
        }
    }
}

fn into_hyper(response: ApiResponse) -> Response<Full<Bytes>> {
    let has_body = !response.body.is_empty();
    let mut hyper_response = Response::new(Full::new(response.body));
    *hyper_response.status_mut() = response.status;
    if has_body {
        hyper_response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    hyper_response
}
