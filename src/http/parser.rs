use crate::config::StaticConfig;
use crate::http::request::{HeaderEntry, Method, Request, RequestLine, Version};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The request line holds fewer than three tokens.
    MalformedRequestLine,
    UnsupportedMethod(String),
    UnsupportedVersion(String),
    /// The raw path exceeds the configured maximum.
    PathTooLong(usize),
}

/// Bounds applied while parsing a request.
#[derive(Debug, Clone, Copy)]
pub struct ParseLimits {
    /// Headers past this count are ignored.
    pub max_headers: usize,
    /// A header whose name or value is longer ends header parsing.
    pub max_field_len: usize,
    pub max_path_len: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self::from(&StaticConfig::default())
    }
}

impl From<&StaticConfig> for ParseLimits {
    fn from(cfg: &StaticConfig) -> Self {
        Self {
            max_headers: cfg.max_headers,
            max_field_len: cfg.max_field_len,
            max_path_len: cfg.max_path_len,
        }
    }
}

/// Parses the request line and headers out of a single read buffer.
///
/// The buffer is assumed to hold the whole request. Header parsing stops at
/// the first blank line, at a line without a colon, at an overlong field, at
/// an unterminated trailing line, or once `max_headers` entries are collected.
/// None of those are errors.
pub fn parse_http_request(buf: &[u8], limits: &ParseLimits) -> Result<Request, ParseError> {
    let (first, mut rest) = split_line(buf).unwrap_or((buf, &[][..]));

    let line = parse_request_line(first, limits)?;

    let mut headers = Vec::new();
    while headers.len() < limits.max_headers {
        let Some((raw, next)) = split_line(rest) else {
            break;
        };
        if raw.is_empty() {
            break;
        }
        let Some(colon) = raw.iter().position(|&b| b == b':') else {
            break;
        };

        let name = &raw[..colon];
        let value = trim_ows(&raw[colon + 1..]);
        if name.len() > limits.max_field_len || value.len() > limits.max_field_len {
            break;
        }

        headers.push(HeaderEntry {
            name: String::from_utf8_lossy(name).into_owned(),
            value: String::from_utf8_lossy(value).into_owned(),
        });
        rest = next;
    }

    Ok(Request { line, headers })
}

fn parse_request_line(raw: &[u8], limits: &ParseLimits) -> Result<RequestLine, ParseError> {
    let text = std::str::from_utf8(raw).map_err(|_| ParseError::MalformedRequestLine)?;

    let mut parts = text.split_ascii_whitespace();
    let (Some(method_str), Some(path), Some(version_str)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::MalformedRequestLine);
    };

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::UnsupportedMethod(method_str.to_string()))?;
    let version = Version::from_str(version_str)
        .ok_or_else(|| ParseError::UnsupportedVersion(version_str.to_string()))?;

    if path.len() > limits.max_path_len {
        return Err(ParseError::PathTooLong(path.len()));
    }

    Ok(RequestLine {
        method,
        path: path.to_string(),
        version,
    })
}

/// Splits off one `\n`-terminated line, dropping a trailing `\r`.
fn split_line(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    let end = buf.iter().position(|&b| b == b'\n')?;
    let line = &buf[..end];
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    Some((line, &buf[end + 1..]))
}

fn trim_ows(mut value: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', tail @ ..] = value {
        value = tail;
    }
    while let [head @ .., b' ' | b'\t'] = value {
        value = head;
    }
    value
}
