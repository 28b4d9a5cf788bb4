use crate::adapters::rpc::{dispatch, parse_envelope, parse_operation_body, service_description};
use crate::domain::model::{GatewayRequest, Operation};
use crate::domain::ports::PaymentService;
use crate::utils::error::{GatewayError, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper::{Method, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Serialize;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

/// SOAP-style fault code carried by every error response.
pub const FAULT_CODE: &str = "Server";

/// Upper bound on a request body. Valid calls carry a few primitive fields.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Serialize)]
struct FaultEnvelope<'a> {
    fault: Fault<'a>,
}

#[derive(Debug, Serialize)]
struct Fault<'a> {
    code: &'a str,
    message: String,
}

/// Status and JSON body produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: Bytes,
}

impl HttpReply {
    fn json<T: Serialize>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                body: Bytes::from(body),
            },
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: Bytes::from_static(
                        br#"{"fault":{"code":"Server","message":"response serialization failed"}}"#,
                    ),
                }
            }
        }
    }

    fn fault(status: StatusCode, message: String) -> Self {
        Self::json(
            status,
            &FaultEnvelope {
                fault: Fault {
                    code: FAULT_CODE,
                    message,
                },
            },
        )
    }

    fn from_error(err: &GatewayError) -> Self {
        let status = match err {
            GatewayError::UnknownOperation { .. } => StatusCode::NOT_FOUND,
            e if e.is_client_fault() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", err);
        } else {
            tracing::warn!("Rejected request: {}", err);
        }

        Self::fault(status, err.to_string())
    }
}

/// Routes HTTP requests onto a [`PaymentService`].
///
/// | Method & path            | Meaning                                   |
/// |--------------------------|-------------------------------------------|
/// | `GET /`                  | service description                       |
/// | `GET /health`            | liveness                                  |
/// | `POST /rpc`              | full `{"operation": ...}` envelope        |
/// | `POST /{Operation}`      | parameters only, operation from the path  |
/// | `GET /WhatsYourId`       | the one parameterless operation           |
pub struct GatewayHandler {
    service: Arc<dyn PaymentService>,
}

impl GatewayHandler {
    pub fn new(service: Arc<dyn PaymentService>) -> Self {
        Self { service }
    }

    pub fn handle(&self, method: &Method, path: &str, body: &[u8]) -> HttpReply {
        let route = path.trim_matches('/');

        match (method, route) {
            (&Method::GET, "") => HttpReply::json(StatusCode::OK, &service_description()),
            (&Method::GET, "health") => {
                HttpReply::json(StatusCode::OK, &serde_json::json!({"status": "ok"}))
            }
            (&Method::POST, "rpc") => self.call(parse_envelope(body)),
            (_, "rpc") | (_, "") | (_, "health") => self.method_not_allowed(method, path),
            (_, name) => match Operation::from_name(name) {
                None => HttpReply::fault(StatusCode::NOT_FOUND, format!("No such path: {}", path)),
                Some(_) if method == Method::POST => self.call(parse_operation_body(name, body)),
                Some(Operation::WhatsYourId) if method == Method::GET => {
                    self.call(Ok(GatewayRequest::WhatsYourId))
                }
                Some(_) => self.method_not_allowed(method, path),
            },
        }
    }

    fn call(&self, request: Result<GatewayRequest>) -> HttpReply {
        match request.and_then(|request| dispatch(self.service.as_ref(), request)) {
            Ok(response) => HttpReply::json(StatusCode::OK, &response),
            Err(e) => HttpReply::from_error(&e),
        }
    }

    fn method_not_allowed(&self, method: &Method, path: &str) -> HttpReply {
        HttpReply::fault(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("{} is not supported on {}", method, path),
        )
    }
}

pub struct HttpServer {
    handler: Arc<GatewayHandler>,
}

impl HttpServer {
    pub fn new(handler: GatewayHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Binds `addr` and serves until Ctrl-C.
    pub async fn listen(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves connections from `listener` until `shutdown` resolves.
    ///
    /// In-flight connections are left to finish on their own tasks.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("🚀 Payment gateway listening on http://{}", local_addr);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(e) => {
                            tracing::warn!("Failed to accept connection: {}", e);
                            continue;
                        }
                    };
                    let handler = self.handler.clone();

                    tokio::task::spawn(async move {
                        if let Err(err) = handle_connection(stream, peer, handler).await {
                            tracing::debug!("Error handling connection from {}: {}", peer, err);
                        }
                    });
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping server...");
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Collects `body`, refusing anything larger than [`MAX_BODY_BYTES`].
async fn read_body<B>(body: B) -> std::result::Result<Bytes, HttpReply>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(HttpReply::fault(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Request body exceeds {} bytes", MAX_BODY_BYTES),
        )),
        Err(e) => Err(HttpReply::fault(
            StatusCode::BAD_REQUEST,
            format!("Failed to read request body: {}", e),
        )),
    }
}

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<GatewayHandler>,
) -> Result<()> {
    let io = TokioIo::new(stream);
    let service = RequestService { handler, peer };

    http1::Builder::new().serve_connection(io, service).await?;
    Ok(())
}

/// Resolves on Ctrl-C. If the signal handler cannot be installed it never resolves.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

struct RequestService {
    handler: Arc<GatewayHandler>,
    peer: SocketAddr,
}

impl Service<hyper::Request<Incoming>> for RequestService {
    type Response = hyper::Response<Full<Bytes>>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
        let handler = self.handler.clone();
        let peer = self.peer;

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            tracing::debug!("{} {} from {}", parts.method, parts.uri.path(), peer);

            let reply = match read_body(body).await {
                Ok(bytes) => handler.handle(&parts.method, parts.uri.path(), &bytes),
                Err(fault) => {
                    tracing::warn!("Rejected body from {}: {}", peer, fault.status);
                    fault
                }
            };

            let mut response = hyper::Response::new(Full::new(reply.body));
            *response.status_mut() = reply.status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Ok(response)
        })
    }
}
