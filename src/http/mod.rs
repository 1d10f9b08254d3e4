//! HTTP/1.x protocol layer.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine: one read, one response, close
//! - **`parser`**: Parses the request line and headers from a byte buffer
//! - **`request`**: Request representation (method, path, version, ordered headers)
//! - **`codec`**: Query-string splitting and percent-decoding of the request target
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Single read of the request bytes
//!        └──────┬──────┘
//!               │ Bytes received (nothing received → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse, decode, resolve, assemble
//!        └──────┬───────────┘
//!               │ Response ready (success or error page)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lantern::config::Config;
//! use lantern::http::connection::serve_connection;
//! use lantern::static_files::StaticHandler;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cfg = Config::default();
//!     let handler = Arc::new(StaticHandler::new(Arc::new(cfg.static_files.clone())));
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(serve_connection(socket, addr.to_string(), handler, cfg.server.clone()));
//!     }
//! }
//! ```

pub mod codec;
pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
