//! Content-Type lookup by file extension.
//!
//! The extension is whatever follows the last `.` in the file name of the
//! resolved path. Matching is exact and case-sensitive, so `INDEX.HTML` is
//! served as `application/octet-stream`.

use std::collections::HashMap;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Built-in extension table.
///
/// # Examples
/// ```
/// use lantern::http::mime::builtin_content_type;
/// assert_eq!(builtin_content_type(Some("html")), "text/html");
/// assert_eq!(builtin_content_type(Some("svg")), "image/svg+xml");
/// assert_eq!(builtin_content_type(None), "application/octet-stream");
/// ```
pub fn builtin_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        Some("html" | "htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// Returns the substring after the last `.` in the file name of `path`.
pub fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// The built-in table plus configured overrides.
#[derive(Debug, Clone, Default)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
}

impl MimeTable {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn content_type<'a>(&'a self, path: &str) -> &'a str {
        let ext = extension_of(path);

        ext.and_then(|e| self.overrides.get(e))
            .map(String::as_str)
            .unwrap_or_else(|| builtin_content_type(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_taken_from_last_dot() {
        assert_eq!(extension_of("./public/archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of("./public/README"), None);
        assert_eq!(extension_of("./public/.hidden"), Some("hidden"));
        assert_eq!(extension_of("./public/trailing."), Some(""));
    }

    #[test]
    fn unknown_extension() {
        assert_eq!(builtin_content_type(Some("xyz")), DEFAULT_CONTENT_TYPE);
        assert_eq!(builtin_content_type(Some("HTML")), DEFAULT_CONTENT_TYPE);
        assert_eq!(builtin_content_type(None), DEFAULT_CONTENT_TYPE);
    }
}
