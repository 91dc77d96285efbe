use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::StatusCode;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::Service;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};

use crate::error::Result;
use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;
use crate::shutdown::ShutdownCoordinator;

/// Largest request body read into memory. Form submissions are far smaller.
pub const DEFAULT_MAX_BODY_SIZE: usize = 64 * 1024;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type ServiceFuture<T> = Pin<Box<dyn Future<Output = std::result::Result<T, BoxError>> + Send>>;

/// HTTP/1.1 server driving a [`Handler`]
pub struct HttpServer {
	handler: Arc<dyn Handler>,
	max_body_size: usize,
}

impl HttpServer {
	/// Create a new server with the given handler
	pub fn new(handler: Arc<dyn Handler>) -> Self {
		Self {
			handler,
			max_body_size: DEFAULT_MAX_BODY_SIZE,
		}
	}

	/// Sets the request body limit. Larger bodies are answered with 413.
	pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
		self.max_body_size = max_body_size;
		self
	}

	/// Returns a clone of the server's handler.
	pub fn handler(&self) -> Arc<dyn Handler> {
		Arc::clone(&self.handler)
	}

	/// Binds `addr` and serves until `coordinator` starts shutdown.
	pub async fn listen_with_shutdown(
		self,
		addr: SocketAddr,
		coordinator: ShutdownCoordinator,
	) -> Result<()> {
		let listener = TcpListener::bind(addr).await?;
		self.serve_listener(listener, coordinator).await
	}

	/// Serves connections from an already bound listener.
	///
	/// When shutdown starts the server stops accepting connections, then
	/// notifies the coordinator. Open connections are interrupted.
	pub async fn serve_listener(
		self,
		listener: TcpListener,
		coordinator: ShutdownCoordinator,
	) -> Result<()> {
		let local_addr = listener.local_addr()?;
		tracing::info!(address = %local_addr, "server listening on http://{}", local_addr);

		let mut shutdown_rx = coordinator.subscribe();

		loop {
			tokio::select! {
				result = listener.accept() => {
					let (stream, socket_addr) = match result {
						Ok(accepted) => accepted,
						Err(err) => {
							tracing::warn!(error = %err, "failed to accept connection");
							continue;
						}
					};
					let service = RequestService {
						handler: Arc::clone(&self.handler),
						remote_addr: socket_addr,
						max_body_size: self.max_body_size,
					};
					let mut conn_shutdown = coordinator.subscribe();

					tokio::task::spawn(async move {
						tokio::select! {
							result = Self::handle_connection(stream, service) => {
								if let Err(err) = result {
									tracing::debug!(peer = %socket_addr, error = %err, "connection closed with error");
								}
							}
							_ = conn_shutdown.recv() => {}
						}
					});
				}
				_ = shutdown_rx.recv() => {
					tracing::info!("shutdown signal received, stopping server");
					break;
				}
			}
		}

		coordinator.notify_shutdown_complete();

		Ok(())
	}

	/// Handle a single TCP connection by processing HTTP requests
	async fn handle_connection(stream: TcpStream, service: RequestService) -> Result<()> {
		let io = TokioIo::new(stream);
		http1::Builder::new().serve_connection(io, service).await?;
		Ok(())
	}
}

/// Service implementation for hyper
struct RequestService {
	handler: Arc<dyn Handler>,
	remote_addr: SocketAddr,
	max_body_size: usize,
}

impl Service<hyper::Request<Incoming>> for RequestService {
	type Response = hyper::Response<Full<Bytes>>;
	type Error = BoxError;
	type Future = ServiceFuture<Self::Response>;

	fn call(&self, req: hyper::Request<Incoming>) -> Self::Future {
		let handler = Arc::clone(&self.handler);
		let remote_addr = self.remote_addr;
		let max_body_size = self.max_body_size;

		Box::pin(async move {
			let (parts, body) = req.into_parts();
			let method = parts.method.clone();
			let path = parts.uri.path().to_string();

			let body_bytes = match Limited::new(body, max_body_size).collect().await {
				Ok(collected) => collected.to_bytes(),
				Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
					tracing::warn!(%method, %path, limit = max_body_size, "request body too large");
					let response =
						Response::json_error(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")?;
					return Ok(into_hyper(response)?);
				}
				Err(err) => return Err(err),
			};

			let mut request = Request::new(
				parts.method,
				parts.uri,
				parts.version,
				parts.headers,
				body_bytes,
			);
			request.remote_addr = Some(remote_addr);

			let response = handler.handle(request).await.unwrap_or_else(|err| {
				tracing::error!(%method, %path, error = %err, "handler failed");
				Response::internal_server_error()
			});
			tracing::debug!(%method, %path, status = response.status.as_u16(), "request served");

			Ok(into_hyper(response)?)
		})
	}
}

fn into_hyper(
	response: Response,
) -> std::result::Result<hyper::Response<Full<Bytes>>, hyper::http::Error> {
	let mut hyper_response = hyper::Response::builder().status(response.status);
	for (key, value) in response.headers.iter() {
		hyper_response = hyper_response.header(key, value);
	}
	hyper_response.body(Full::new(response.body))
}

/// Binds `addr`, serves `handler` and stops on Ctrl-C.
pub async fn serve_with_shutdown(
	addr: SocketAddr,
	handler: Arc<dyn Handler>,
	coordinator: ShutdownCoordinator,
) -> Result<()> {
	let listener = TcpListener::bind(addr).await?;
	let server = HttpServer::new(handler).serve_listener(listener, coordinator.clone());
	tokio::pin!(server);

	tokio::select! {
		result = &mut server => result,
		_ = crate::shutdown::shutdown_signal() => {
			coordinator.shutdown();
			// Let the loop observe the notice and report completion
			let (result, ()) = tokio::join!(server, coordinator.wait_for_shutdown());
			result
		}
	}
}
