//! Percent-decoding and query-string splitting.
//!
//! The raw request path is split at the first `?` *before* anything is
//! decoded. The resource path and each query key/value are then decoded
//! independently, so an encoded `%3F`, `%26` or `%3D` never acts as a
//! delimiter.

use crate::config::StaticConfig;

/// One `key=value` pair from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

/// Result of splitting and decoding a raw request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Decoded path used for resolution, without the query string.
    pub path: String,
    pub query: Vec<QueryParam>,
}

#[derive(Debug, Clone, Copy)]
pub struct QueryLimits {
    /// Longest decoded key or value kept; longer pairs are dropped whole.
    pub max_field_len: usize,
    pub max_params: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self::from(&StaticConfig::default())
    }
}

impl From<&StaticConfig> for QueryLimits {
    fn from(cfg: &StaticConfig) -> Self {
        Self {
            max_field_len: cfg.max_field_len,
            max_params: cfg.max_query_params,
        }
    }
}

/// Decodes `%XX` escapes and `+` in a path or query component.
///
/// A `%` not followed by two hex digits is copied literally. Bytes that do
/// not form valid UTF-8 after decoding are replaced with U+FFFD.
///
/// ```
/// # use lantern::http::codec::decode;
/// assert_eq!(decode("/a%20b+c"), "/a b c");
/// assert_eq!(decode("/100%"), "/100%");
/// ```
pub fn decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => match (hex_value(bytes.get(i + 1)), hex_value(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push((hi << 4) | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn hex_value(b: Option<&u8>) -> Option<u8> {
    match *b? {
        c @ b'0'..=b'9' => Some(c - b'0'),
        c @ b'a'..=b'f' => Some(c - b'a' + 10),
        c @ b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Splits a raw path at the first `?` into the resource path and its
/// `&`-separated parameters. Nothing is decoded here.
///
/// Empty tokens and tokens without `=` are skipped.
pub fn split_query(raw: &str) -> (&str, Vec<(&str, &str)>) {
    let Some((path, query)) = raw.split_once('?') else {
        return (raw, Vec::new());
    };

    let params = query
        .split('&')
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.split_once('='))
        .collect();

    (path, params)
}

/// Splits `raw` and decodes both halves into a [`Target`].
///
/// Pairs whose decoded key or value exceeds `max_field_len` are dropped, not
/// truncated. Pairs past `max_params` are ignored.
pub fn parse_target(raw: &str, limits: &QueryLimits) -> Target {
    let (path, pairs) = split_query(raw);

    let query = pairs
        .into_iter()
        .map(|(k, v)| QueryParam {
            key: decode(k),
            value: decode(v),
        })
        .filter(|p| p.key.len() <= limits.max_field_len && p.value.len() <= limits.max_field_len)
        .take(limits.max_params)
        .collect();

    Target {
        path: decode(path),
        query,
    }
}
