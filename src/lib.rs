//! rawhttp - minimal HTTP/1.1 server on raw TCP sockets
//!
//! Parsing, routing, file-backed handlers and response serialization,
//! with no HTTP library underneath.

pub mod config;
pub mod files;
pub mod http;
pub mod server;
