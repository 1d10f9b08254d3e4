//! Error responses, with optional custom pages.
//!
//! A page named `<code>.html` in the configured directory is used when it can
//! be read in full. Otherwise a fixed inline page is sent. Either way the
//! caller gets a complete response; this module never fails outward.

use std::fs::{self, File};

use crate::config::StaticConfig;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::static_files::resolver::read_exact_len;

/// Body used when no custom page is available.
pub const FALLBACK_PAGE: &str =
    "<html><body><h1>Error</h1><p>An error occurred.</p></body></html>";

pub const ERROR_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

#[derive(Debug, Clone)]
pub struct ErrorResponder {
    dir: String,
}

impl ErrorResponder {
    /// `dir` must not end with a slash.
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(cfg: &StaticConfig) -> Self {
        Self::new(cfg.error_pages.clone())
    }

    pub fn page_path(&self, status: StatusCode) -> String {
        format!("{}/{}.html", self.dir, status.as_u16())
    }

    pub fn respond(&self, status: StatusCode) -> Response {
        let body = match self.load_page(status) {
            Some(page) => page,
            None => FALLBACK_PAGE.as_bytes().to_vec(),
        };

        ResponseBuilder::new(status)
            .header("Content-Type", ERROR_CONTENT_TYPE)
            .header("Content-Length", body.len().to_string())
            .header("Connection", "close")
            .body(body)
            .build()
    }

    fn load_page(&self, status: StatusCode) -> Option<Vec<u8>> {
        let path = self.page_path(status);

        let meta = match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => meta,
            _ => {
                tracing::debug!(path = %path, "no custom error page, using fallback");
                return None;
            }
        };

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "failed to open error page");
                return None;
            }
        };

        match read_exact_len(file, meta.len()) {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!(path = %path, error = ?e, "failed to read error page");
                None
            }
        }
    }
}
