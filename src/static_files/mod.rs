//! Static file serving
//!
//! Resolves request paths against the document root, builds success
//! responses and falls back to error pages when anything goes wrong.

pub mod error_page;
pub mod handler;
pub mod resolver;

pub use error_page::ErrorResponder;
pub use handler::{Outcome, StaticHandler};
pub use resolver::{ResolveError, ResolvedResource, Resolver};
