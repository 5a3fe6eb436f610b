//! HTTP server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

use crate::parser::{head_length, parse_head, parse_request};
use crate::routing::Router;
use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::response::{HttpResponse, StatusCode};

/// An HTTP server that feeds every request to one [`Router`].
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    /// The routing table, shared read-only by every connection.
    pub router: Arc<Router>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and router.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Log the registered routes.
    fn display_server_info(&self) {
        info!("Registered routes (first match wins):");
        for (index, entry) in self.router.entries().iter().enumerate() {
            info!("  #{index} {predicate}", predicate = entry.predicate);
        }
        info!("  fallback");
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: mpsc::Sender<()>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("Error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Handle a new connection.
    async fn handle_new_connection(
        mut socket: tokio::net::TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        router: Arc<Router>,
        read_buffer_size: usize,
        max_request_size: usize,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                let response = HttpResponse::new(StatusCode::ServiceUnavailable)
                    .with_content_type("text/plain")
                    .with_body_string("Server is at capacity, please try again later");
                let _ = socket.write_all(&response.to_bytes()).await;
                return;
            }
        };

        debug!("Accepted connection from {addr}");
        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;

            let result =
                Self::handle_connection(&mut socket, &router, read_buffer_size, max_request_size).await;
            if let Err(e) = result {
                error!("Error handling connection from {addr}: {e}");
            }
        });
    }

    /// Handle connection errors. Returns true if the accept loop should stop.
    async fn handle_connection_error(e: std::io::Error) -> bool {
        error!("Error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("Critical error accepting connection, shutting down");
            return true;
        }

        // For other errors, wait a bit before retrying
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Perform graceful shutdown.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("Waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let drained = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("Task failed during shutdown: {e}");
                }
            }
        })
        .await;

        if drained.is_err() {
            warn!("Shutdown timed out, aborting {len} remaining tasks", len = tasks.len());
            tasks.abort_all();
        }
        info!("Server shutdown complete");
    }

    /// Start the server and listen for incoming connections.
    pub async fn start(&self) -> Result<(), Error> {
        self.display_server_info();

        let listener = self.setup_listener().await?;

        // Create a semaphore to limit concurrent connections
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // Use JoinSet to keep track of all spawned tasks
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(
                                socket,
                                addr,
                                semaphore.clone(),
                                self.router.clone(),
                                self.config.read_buffer_size,
                                self.config.max_request_size,
                                &mut tasks,
                            ).await;
                        },
                        Err(e) => {
                            if Self::handle_connection_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Read one request: the head, then as much body as `Content-Length` declares.
    ///
    /// Fails with [`Error::PayloadTooLarge`] as soon as the head grows past
    /// `max_request_size` or the declared body would take the request past it.
    async fn read_request(
        socket: &mut (impl AsyncRead + Unpin),
        read_buffer_size: usize,
        max_request_size: usize,
    ) -> Result<Vec<u8>, Error> {
        let mut data = Vec::with_capacity(read_buffer_size.min(max_request_size));
        let mut buf = vec![0; read_buffer_size];

        loop {
            let n = socket.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);

            match head_length(&data) {
                Some(head_len) => {
                    let body_len = parse_head(&data[..head_len])
                        .ok()
                        .and_then(|request| request.content_length())
                        .unwrap_or(0);
                    let total = head_len.saturating_add(body_len);
                    if total > max_request_size {
                        return Err(Error::PayloadTooLarge(max_request_size));
                    }
                    if data.len() >= total {
                        break;
                    }
                }
                None if data.len() > max_request_size => {
                    return Err(Error::PayloadTooLarge(max_request_size));
                }
                None => {}
            }
        }

        Ok(data)
    }

    /// Handle a single connection.
    ///
    /// Oversized requests are answered with 413, parse failures (a body cut
    /// short included) with 400 and handler failures with 500; all three are
    /// also returned to the caller.
    pub async fn handle_connection(
        socket: &mut (impl AsyncRead + AsyncWrite + Unpin),
        router: &Router,
        read_buffer_size: usize,
        max_request_size: usize,
    ) -> Result<(), Error> {
        let data = match Self::read_request(socket, read_buffer_size, max_request_size).await {
            Ok(data) => data,
            Err(Error::PayloadTooLarge(limit)) => {
                let response = HttpResponse::new(StatusCode::PayloadTooLarge)
                    .with_content_type("text/plain")
                    .with_body_string(format!("Request exceeds the {limit} byte limit"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::PayloadTooLarge(limit));
            }
            Err(e) => return Err(e),
        };
        if data.is_empty() {
            return Ok(()); // Connection closed
        }

        let request = match parse_request(&data) {
            Ok(req) => req,
            Err(e) => {
                let response = HttpResponse::new(StatusCode::BadRequest)
                    .with_content_type("text/plain")
                    .with_body_string(format!("Error parsing request: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(Error::ParseError(e));
            }
        };

        let response = match router.dispatch(request).await {
            Ok(resp) => resp,
            Err(e) => {
                let response = HttpResponse::new(StatusCode::InternalServerError)
                    .with_content_type("text/plain")
                    .with_body_string(format!("Internal server error: {e}"));
                socket.write_all(&response.to_bytes()).await?;
                return Err(e);
            }
        };

        socket.write_all(&response.to_bytes()).await?;
        socket.flush().await?;

        Ok(())
    }
}
