//! Maps a decoded request path onto a file under the document root.
//!
//! Rules, applied in order:
//!
//! 1. A path containing `..` anywhere, or not starting with `/`, is rejected.
//! 2. The filesystem path is `root + path`, verbatim.
//! 3. A path ending in `/` gets the default document appended.
//! 4. The file must exist. A directory gets the default document appended
//!    once more; anything that still is not a regular file is not found.
//! 5. The whole file is read into memory; an open failure or short read fails.

use std::fs::{self, File};
use std::io::Read;

use crate::config::StaticConfig;
use crate::http::mime::MimeTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    PathTraversal(String),
    NotFound(String),
    Unreadable(String),
    ReadIncomplete { expected: u64, read: u64 },
}

/// A file that passed every rule and was read in full.
#[derive(Debug, Clone)]
pub struct ResolvedResource {
    pub filesystem_path: String,
    pub size_bytes: u64,
    pub content_type: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    root: String,
    default_document: String,
}

impl Resolver {
    /// `root` must not end with a slash.
    pub fn new(root: impl Into<String>, default_document: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_document: default_document.into(),
        }
    }

    pub fn from_config(cfg: &StaticConfig) -> Self {
        Self::new(cfg.root.clone(), cfg.default_document.clone())
    }

    /// Applies rules 1 to 4 and returns the filesystem path with its size.
    pub fn locate(&self, path: &str) -> Result<(String, u64), ResolveError> {
        if !path.starts_with('/') {
            tracing::debug!(path, "path must start with '/'");
            return Err(ResolveError::PathTraversal(path.to_string()));
        }
        if path.contains("..") {
            tracing::debug!(path, "path contains '..'");
            return Err(ResolveError::PathTraversal(path.to_string()));
        }

        let mut fs_path = format!("{}{}", self.root, path);
        if path.ends_with('/') {
            fs_path.push_str(&self.default_document);
        }

        let mut meta =
            fs::metadata(&fs_path).map_err(|_| ResolveError::NotFound(fs_path.clone()))?;

        if meta.is_dir() {
            fs_path.push('/');
            fs_path.push_str(&self.default_document);
            meta = fs::metadata(&fs_path).map_err(|_| ResolveError::NotFound(fs_path.clone()))?;
        }

        if !meta.is_file() {
            return Err(ResolveError::NotFound(fs_path));
        }

        Ok((fs_path, meta.len()))
    }

    /// Runs every rule and reads the file.
    pub fn resolve(&self, path: &str, mime: &MimeTable) -> Result<ResolvedResource, ResolveError> {
        let (fs_path, size) = self.locate(path)?;
        tracing::debug!(path = %fs_path, size, "resource located");
        self.load(fs_path, size, mime)
    }

    /// Applies rule 5 to a path that `locate` returned.
    pub fn load(
        &self,
        fs_path: String,
        size: u64,
        mime: &MimeTable,
    ) -> Result<ResolvedResource, ResolveError> {
        let file = File::open(&fs_path).map_err(|e| {
            tracing::error!(path = %fs_path, error = %e, "failed to open resource");
            ResolveError::Unreadable(fs_path.clone())
        })?;

        let contents = read_exact_len(file, size).map_err(|e| {
            tracing::error!(path = %fs_path, error = ?e, "failed to read resource");
            e
        })?;

        let content_type = mime.content_type(&fs_path).to_string();

        Ok(ResolvedResource {
            filesystem_path: fs_path,
            size_bytes: size,
            content_type,
            contents,
        })
    }
}

/// Reads exactly `expected` bytes, failing if the file ends early.
pub(crate) fn read_exact_len(file: File, expected: u64) -> Result<Vec<u8>, ResolveError> {
    let mut contents = Vec::with_capacity(usize::try_from(expected).unwrap_or(0));
    let outcome = file.take(expected).read_to_end(&mut contents);

    let read = contents.len() as u64;
    if outcome.is_err() || read != expected {
        return Err(ResolveError::ReadIncomplete { expected, read });
    }

    Ok(contents)
}
