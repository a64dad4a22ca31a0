use std::fmt;

use crate::http::headers::Headers;
use crate::http::request::{Method, Request};

/// The only protocol version the server accepts.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Default cap on the size of the request line plus headers.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;

/// Default cap on a declared request body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Size caps applied while a request is still arriving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request line does not split into exactly three tokens
    InvalidRequestLine,
    /// Protocol version other than HTTP/1.1
    UnsupportedVersion,
    /// Header line without a colon
    InvalidHeader,
    /// Content-Length is not a non-negative integer
    InvalidContentLength,
    /// Request line or headers are not valid UTF-8
    InvalidEncoding,
    /// No header terminator within the configured limit
    HeadersTooLarge,
    /// Declared Content-Length exceeds the configured limit
    BodyTooLarge,
    /// More bytes are needed before the message is complete
    Incomplete,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseError::InvalidRequestLine => "invalid request line",
            ParseError::UnsupportedVersion => "unsupported protocol version",
            ParseError::InvalidHeader => "invalid header line",
            ParseError::InvalidContentLength => "invalid Content-Length",
            ParseError::InvalidEncoding => "request head is not valid UTF-8",
            ParseError::HeadersTooLarge => "request head too large",
            ParseError::BodyTooLarge => "request body too large",
            ParseError::Incomplete => "incomplete request",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseError {}

/// Parses one HTTP/1.1 request from the front of `buf`.
///
/// On success returns the request and the number of bytes it occupied.
/// `ParseError::Incomplete` means the caller should read more and retry.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    parse_http_request_limited(buf, Limits::default())
}

/// Same as [`parse_http_request`] with explicit size caps.
///
/// The body cap is checked against the declared `Content-Length` before
/// any body bytes are required, so an oversized upload fails immediately.
pub fn parse_http_request_limited(
    buf: &[u8],
    limits: Limits,
) -> Result<(Request, usize), ParseError> {
    // Reject a bad request line as soon as it is complete
    if let Some(line_end) = find(buf, b"\r\n") {
        let line = std::str::from_utf8(&buf[..line_end])
            .map_err(|_| ParseError::InvalidEncoding)?;
        parse_request_line(line)?;
    }

    let headers_end = match find(buf, b"\r\n\r\n") {
        Some(pos) => pos,
        None if buf.len() > limits.max_header_bytes => return Err(ParseError::HeadersTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    if headers_end > limits.max_header_bytes {
        return Err(ParseError::HeadersTooLarge);
    }

    let head = std::str::from_utf8(&buf[..headers_end])
        .map_err(|_| ParseError::InvalidEncoding)?;
    let mut lines = head.split("\r\n");

    let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
    let (method, target, version) = parse_request_line(request_line)?;

    let mut headers = Headers::new();
    for line in lines {
        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        headers.insert(key.trim(), value.trim());
    }

    let content_length = headers
        .get_ignore_case("Content-Length")
        .map(|v| v.trim().parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);
    if content_length > limits.max_body_bytes {
        return Err(ParseError::BodyTooLarge);
    }

    let body_start = headers_end + 4;
    let body_bytes = &buf[body_start..];
    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let request = Request {
        method: Method::from(method),
        target: target.to_string(),
        version: version.to_string(),
        headers,
        body: body_bytes[..content_length].to_vec(),
    };

    Ok((request, body_start + content_length))
}

fn parse_request_line(line: &str) -> Result<(&str, &str, &str), ParseError> {
    let parts: Vec<&str> = line.split(' ').collect();
    let (method, target, version) = match parts.as_slice() {
        [method, target, version] => (*method, *target, *version),
        _ => return Err(ParseError::InvalidRequestLine),
    };

    if version != HTTP_VERSION {
        return Err(ParseError::UnsupportedVersion);
    }

    Ok((method, target, version))
}

fn find(buf: &[u8], needle: &[u8]) -> Option<usize> {
    buf.windows(needle.len()).position(|w| w == needle)
}
