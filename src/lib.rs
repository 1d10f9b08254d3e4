//! Lantern - Static File Server
//!
//! Core library: HTTP/1.x request interpretation and the static-resource
//! response pipeline.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod static_files;
