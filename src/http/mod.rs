//! HTTP/1.1 protocol implementation.
//!
//! A one-request-per-connection HTTP/1.1 server built directly on byte
//! streams, with no HTTP library underneath.
//!
//! # Architecture
//!
//! - **`status`**: Status codes and their reason phrases
//! - **`headers`**: Ordered header map shared by requests and responses
//! - **`request`**: HTTP request representation
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: The per-connection request-response state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate bytes until a full message arrives
//!        └──────┬──────┘
//!               │ Request parsed          (malformed → 400, skip to Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and build the response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rawhttp::files::FileService;
//! use rawhttp::http::connection::Connection;
//! use rawhttp::server::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::new(FileService::new(".")));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;
