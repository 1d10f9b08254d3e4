//! Failure taxonomy of the request pipeline.
//!
//! Every variant is terminal for the request: the pipeline hands it to the
//! error responder, which turns [`ServeError::status`] into a response.

use std::fmt;

use crate::http::parser::ParseError;
use crate::http::response::StatusCode;
use crate::static_files::resolver::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeError {
    MalformedRequestLine,
    UnsupportedMethod(String),
    UnsupportedVersion(String),
    PathTooLong(usize),
    PathTraversalRejected(String),
    ResourceNotFound(String),
    ResourceUnreadable(String),
    ResourceReadIncomplete { expected: u64, read: u64 },
    HeaderFormattingOverflow(usize),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::MalformedRequestLine
            | ServeError::UnsupportedMethod(_)
            | ServeError::UnsupportedVersion(_)
            | ServeError::PathTooLong(_)
            | ServeError::PathTraversalRejected(_) => StatusCode::BadRequest,
            ServeError::ResourceNotFound(_) => StatusCode::NotFound,
            ServeError::ResourceUnreadable(_)
            | ServeError::ResourceReadIncomplete { .. }
            | ServeError::HeaderFormattingOverflow(_) => StatusCode::InternalServerError,
        }
    }
}

impl fmt::Display for ServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServeError::MalformedRequestLine => write!(f, "malformed request line"),
            ServeError::UnsupportedMethod(m) => write!(f, "unsupported method {m:?}"),
            ServeError::UnsupportedVersion(v) => write!(f, "unsupported version {v:?}"),
            ServeError::PathTooLong(len) => write!(f, "request path too long ({len} bytes)"),
            ServeError::PathTraversalRejected(p) => write!(f, "path rejected: {p:?}"),
            ServeError::ResourceNotFound(p) => write!(f, "no such resource: {p}"),
            ServeError::ResourceUnreadable(p) => write!(f, "cannot open resource: {p}"),
            ServeError::ResourceReadIncomplete { expected, read } => {
                write!(f, "short read: expected {expected} bytes, got {read}")
            }
            ServeError::HeaderFormattingOverflow(len) => {
                write!(f, "response header block too large ({len} bytes)")
            }
        }
    }
}

impl std::error::Error for ServeError {}

impl From<ParseError> for ServeError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedRequestLine => ServeError::MalformedRequestLine,
            ParseError::UnsupportedMethod(m) => ServeError::UnsupportedMethod(m),
            ParseError::UnsupportedVersion(v) => ServeError::UnsupportedVersion(v),
            ParseError::PathTooLong(len) => ServeError::PathTooLong(len),
        }
    }
}

impl From<ResolveError> for ServeError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::PathTraversal(p) => ServeError::PathTraversalRejected(p),
            ResolveError::NotFound(p) => ServeError::ResourceNotFound(p),
            ResolveError::Unreadable(p) => ServeError::ResourceUnreadable(p),
            ResolveError::ReadIncomplete { expected, read } => {
                ServeError::ResourceReadIncomplete { expected, read }
            }
        }
    }
}
