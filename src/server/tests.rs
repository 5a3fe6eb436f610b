//! Tests for the HTTP server transport.

#[cfg(test)]
mod server_tests {
    use std::collections::VecDeque;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

    use crate::parser::{HttpRequest, Method};
    use crate::routing::{Predicate, Router};
    use crate::parser::Error as ParserError;
    use crate::server::{Error, HttpResponse, HttpServer, ServerConfig, StatusCode, handler_fn};
    use crate::test_support::Counting;

    const MAX_REQUEST: usize = 64 * 1024;

    // Mock TcpStream that hands out its input in fixed chunks
    struct MockTcpStream {
        chunks: VecDeque<Vec<u8>>,
        write_data: Vec<u8>,
    }

    impl MockTcpStream {
        fn new(read_data: Vec<u8>) -> Self {
            Self::chunked(vec![read_data])
        }

        fn chunked(chunks: Vec<Vec<u8>>) -> Self {
            Self {
                chunks: chunks.into_iter().filter(|c| !c.is_empty()).collect(),
                write_data: Vec::new(),
            }
        }

        fn written(&self) -> String {
            String::from_utf8_lossy(&self.write_data).into_owned()
        }
    }

    impl AsyncRead for MockTcpStream {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            if let Some(mut chunk) = this.chunks.pop_front() {
                let n = chunk.len().min(buf.remaining());
                buf.put_slice(&chunk[..n]);
                if n < chunk.len() {
                    this.chunks.push_front(chunk.split_off(n));
                }
            }
            Poll::Ready(Ok(()))
        }
    }

    impl AsyncWrite for MockTcpStream {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            self.get_mut().write_data.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn echo_router() -> Router {
        Router::builder()
            .route(
                Predicate::route(Method::POST, "/api/v1/gems").unwrap(),
                handler_fn(|req: HttpRequest| async move {
                    Ok(HttpResponse::new(StatusCode::Created)
                        .with_content_type("text/plain")
                        .with_body_bytes(req.body))
                }),
            )
            .route(
                Predicate::route(Method::GET, "/test").unwrap(),
                handler_fn(|_req| async {
                    Ok(HttpResponse::new(StatusCode::Ok)
                        .with_content_type("text/plain")
                        .with_body_string("Test response"))
                }),
            )
            .build()
    }

    #[test]
    fn test_server_creation() {
        let config = ServerConfig {
            addr: "127.0.0.1:9292".parse().unwrap(),
            max_connections: 100,
            read_buffer_size: 4096,
            max_request_size: 1024 * 1024,
        };
        let server = HttpServer::new(config.clone(), echo_router());
        assert_eq!(server.config.addr, config.addr);
        assert_eq!(server.config.max_connections, 100);
        assert_eq!(server.router.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_handle_connection_with_matching_route() {
        let mut stream = MockTcpStream::new(b"GET /test HTTP/1.1\r\nHost: localhost\r\n\r\n".to_vec());

        let result = HttpServer::handle_connection(&mut stream, &echo_router(), 1024, MAX_REQUEST).await;

        assert!(result.is_ok());
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.contains("Content-Length: 13\r\n"));
        assert!(response.ends_with("\r\n\r\nTest response"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_no_route() {
        let mut stream = MockTcpStream::new(b"GET /nonexistent HTTP/1.1\r\nHost: localhost\r\n\r\n".to_vec());

        let result = HttpServer::handle_connection(&mut stream, &echo_router(), 1024, MAX_REQUEST).await;

        // The fallback answers, so this is not an error
        assert!(result.is_ok());
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.contains("Content-Length: 0\r\n"));
        assert!(response.ends_with("\r\n\r\n"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_wrong_method() {
        let mut stream = MockTcpStream::new(b"POST /test HTTP/1.1\r\nHost: localhost\r\n\r\n".to_vec());

        let result = HttpServer::handle_connection(&mut stream, &echo_router(), 1024, MAX_REQUEST).await;

        assert!(result.is_ok());
        assert!(stream.written().starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_invalid_request() {
        let mut stream = MockTcpStream::new(b"INVALID REQUEST".to_vec());

        let result = HttpServer::handle_connection(&mut stream, &echo_router(), 1024, MAX_REQUEST).await;

        assert!(matches!(result, Err(Error::ParseError(_))));
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.contains("Error parsing request:"));
    }

    #[tokio::test]
    async fn test_handle_connection_with_handler_error() {
        let failing = Counting::failing("storage unavailable");
        let router = Router::builder()
            .route(Predicate::method(Method::GET), failing.handler())
            .build();
        let mut stream = MockTcpStream::new(b"GET /gems/rails.gem HTTP/1.1\r\nHost: localhost\r\n\r\n".to_vec());

        let result = HttpServer::handle_connection(&mut stream, &router, 1024, MAX_REQUEST).await;

        assert!(matches!(result, Err(Error::InternalError(ref m)) if m == "storage unavailable"));
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 500 Internal Server Error\r\n"));
        assert!(response.contains("storage unavailable"));
        assert_eq!(failing.calls(), 1);
    }

    #[tokio::test]
    async fn test_body_spanning_several_reads() {
        let mut stream = MockTcpStream::chunked(vec![
            b"POST /api/v1/gems HTTP/1.1\r\nHost: localhost\r\n".to_vec(),
            b"Content-Length: 11\r\n\r\nhello".to_vec(),
            b" world".to_vec(),
        ]);

        // A small buffer forces several reads as well
        let result = HttpServer::handle_connection(&mut stream, &echo_router(), 16, MAX_REQUEST).await;

        assert!(result.is_ok());
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 201 Created\r\n"));
        assert!(response.ends_with("\r\n\r\nhello world"));
    }

    fn counting_push_router(push: &Counting) -> Router {
        Router::builder()
            .route(Predicate::route(Method::POST, "/api/v1/gems").unwrap(), push.handler())
            .build()
    }

    #[tokio::test]
    async fn test_declared_body_over_limit_is_rejected() {
        let push = Counting::new(StatusCode::Created, "stored");
        let mut chunks = vec![b"POST /api/v1/gems HTTP/1.1\r\nHost: localhost\r\nContent-Length: 999999999999\r\n\r\n".to_vec()];
        chunks.extend(std::iter::repeat(vec![b'a'; 4096]).take(64));
        let mut stream = MockTcpStream::chunked(chunks);

        let result = HttpServer::handle_connection(&mut stream, &counting_push_router(&push), 1024, MAX_REQUEST).await;

        assert!(matches!(result, Err(Error::PayloadTooLarge(MAX_REQUEST))));
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
        assert_eq!(push.calls(), 0);
        // The reader stops at the head instead of draining the body
        assert_eq!(stream.chunks.len(), 64);
    }

    #[tokio::test]
    async fn test_unterminated_head_over_limit_is_rejected() {
        let push = Counting::new(StatusCode::Created, "stored");
        let mut chunks = vec![b"POST /api/v1/gems HTTP/1.1\r\nHost: localhost\r\n".to_vec()];
        chunks.extend(std::iter::repeat(b"X-Filler: aaaaaaaaaaaaaaaa\r\n".to_vec()).take(512));
        let mut stream = MockTcpStream::chunked(chunks);

        let result = HttpServer::handle_connection(&mut stream, &counting_push_router(&push), 1024, 4096).await;

        assert!(matches!(result, Err(Error::PayloadTooLarge(4096))));
        assert!(stream.written().starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
        assert_eq!(push.calls(), 0);
        assert!(!stream.chunks.is_empty());
    }

    #[tokio::test]
    async fn test_body_at_limit_is_accepted() {
        let head = b"POST /api/v1/gems HTTP/1.1\r\nHost: localhost\r\nContent-Length: 16\r\n\r\n".to_vec();
        let limit = head.len() + 16;
        let mut stream = MockTcpStream::chunked(vec![head, b"0123456789abcdef".to_vec()]);

        let result = HttpServer::handle_connection(&mut stream, &echo_router(), 1024, limit).await;

        assert!(result.is_ok());
        assert!(stream.written().ends_with("\r\n\r\n0123456789abcdef"));
    }

    #[tokio::test]
    async fn test_body_cut_short_is_not_dispatched() {
        let push = Counting::new(StatusCode::Created, "stored");
        let mut stream = MockTcpStream::chunked(vec![
            b"POST /api/v1/gems HTTP/1.1\r\nHost: localhost\r\nContent-Length: 4096\r\n\r\n".to_vec(),
            vec![b'a'; 1000],
        ]);

        let result = HttpServer::handle_connection(&mut stream, &counting_push_router(&push), 1024, MAX_REQUEST).await;

        assert!(matches!(
            result,
            Err(Error::ParseError(ParserError::IncompleteBody { expected: 4096, received: 1000 }))
        ));
        let response = stream.written();
        assert!(response.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(response.contains("Incomplete body"));
        assert_eq!(push.calls(), 0);
    }

    #[tokio::test]
    async fn test_closed_connection() {
        let mut stream = MockTcpStream::new(Vec::new());

        let result = HttpServer::handle_connection(&mut stream, &echo_router(), 1024, MAX_REQUEST).await;

        assert!(result.is_ok());
        assert!(stream.written().is_empty());
    }

    #[test]
    fn test_status_code_reason_phrase() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::Unauthorized.reason_phrase(), "Unauthorized");
        assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::PayloadTooLarge.reason_phrase(), "Payload Too Large");
    }

    #[test]
    fn test_http_response_builders() {
        let response = HttpResponse::new(StatusCode::Ok)
            .with_header("X-Custom", "Value")
            .with_content_type("application/json")
            .with_body_string("{}");

        assert_eq!(response.headers.get("Server"), Some("microroute-rs"));
        assert_eq!(response.headers.get("x-custom"), Some("Value"));
        assert_eq!(response.headers.get("Content-Type"), Some("application/json"));
        assert_eq!(response.headers.get("Content-Length"), Some("2"));
        assert_eq!(response.body, b"{}");
    }

    #[test]
    fn test_http_response_with_json() {
        let response = HttpResponse::new(StatusCode::Ok)
            .with_json(&serde_json::json!({"name": "rails"}))
            .unwrap();
        assert_eq!(response.headers.get("Content-Type"), Some("application/json"));
        assert_eq!(response.body, br#"{"name":"rails"}"#);
    }

    #[test]
    fn test_http_response_to_bytes() {
        let bytes = HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("Hello, world!")
            .to_bytes();
        let response = String::from_utf8_lossy(&bytes);

        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.contains("Server: microroute-rs\r\n"));
        assert_eq!(response.matches("Content-Length").count(), 1);
        assert!(response.ends_with("\r\n\r\nHello, world!"));
    }
}
