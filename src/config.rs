//! Server configuration.
//!
//! Loaded once at startup from an optional YAML file and a couple of
//! environment overrides, then shared read-only with every connection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "LANTERN_CONFIG";

/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Size of the single read performed per connection.
    pub read_buffer_size: usize,
    pub read_timeout_secs: Option<u64>,
}

/// Everything the request pipeline needs. Never mutated after startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Document root, stored without a trailing slash.
    pub root: String,
    /// Directory holding `<status>.html` pages.
    pub error_pages: String,
    pub default_document: String,
    /// Value of the `Server` response header.
    pub server_name: String,
    pub max_headers: usize,
    /// Longest header name/value or query key/value accepted.
    pub max_field_len: usize,
    pub max_path_len: usize,
    pub max_query_params: usize,
    pub max_response_header_bytes: usize,
    /// Extension -> content type, checked before the built-in table.
    pub mime_types: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_buffer_size: 4096,
            read_timeout_secs: None,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: "./public".to_string(),
            error_pages: "./errors".to_string(),
            default_document: "index.html".to_string(),
            server_name: "Lantern/1.0".to_string(),
            max_headers: 32,
            max_field_len: 255,
            max_path_len: 2048,
            max_query_params: 32,
            max_response_header_bytes: 4096,
            mime_types: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from `LANTERN_CONFIG` (if set) and applies the
    /// `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_ENV).ok();
        let listen = std::env::var(LISTEN_ENV).ok();
        Self::load_from(path.as_deref().map(Path::new), listen)
    }

    /// Same as [`Config::load`] with the environment lookups already done.
    pub fn load_from(path: Option<&Path>, listen_override: Option<String>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                serde_yaml::from_str::<Config>(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(addr) = listen_override {
            cfg.server.listen_addr = addr;
        }

        cfg.finish()
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("parsing config")?;
        cfg.finish()
    }

    pub fn log_level(&self) -> anyhow::Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.logging.level))
    }

    fn finish(mut self) -> anyhow::Result<Self> {
        self.static_files.root = strip_trailing_slash(&self.static_files.root);
        self.static_files.error_pages = strip_trailing_slash(&self.static_files.error_pages);
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let s = &self.static_files;

        if s.max_headers == 0 {
            bail!("static_files.max_headers must be greater than zero");
        }
        if s.max_field_len == 0 {
            bail!("static_files.max_field_len must be greater than zero");
        }
        if self.server.read_buffer_size == 0 {
            bail!("server.read_buffer_size must be greater than zero");
        }
        if s.default_document.is_empty()
            || s.default_document.contains('/')
            || s.default_document.contains("..")
        {
            bail!("static_files.default_document must be a plain file name");
        }
        self.log_level()?;

        Ok(())
    }
}

// A root of "/" becomes "", so joining with "/path" still yields "/path".
fn strip_trailing_slash(dir: &str) -> String {
    dir.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_removed() {
        assert_eq!(strip_trailing_slash("./public/"), "./public");
        assert_eq!(strip_trailing_slash("./public//"), "./public");
        assert_eq!(strip_trailing_slash("/srv/www"), "/srv/www");
        assert_eq!(strip_trailing_slash("/"), "");
    }
}
