use crate::http::headers::Headers;
use crate::http::status::StatusCode;

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers are written in insertion order. Nothing is added implicitly:
/// whoever attaches a body also sets `Content-Type` and `Content-Length`.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in insertion order
    pub headers: Headers,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use rawhttp::http::response::ResponseBuilder;
/// # use rawhttp::http::status::StatusCode;
/// let response = ResponseBuilder::new(StatusCode::OK)
///     .header("Content-Type", "application/json")
///     .header("Content-Length", "2")
///     .body(b"{}".to_vec())
///     .build();
/// assert_eq!(response.headers.len(), 2);
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Headers,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: impl Into<StatusCode>) -> Self {
        Self {
            status: status.into(),
            headers: Headers::new(),
            body: Vec::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A response with no headers and no body.
    pub fn empty(status: StatusCode) -> Self {
        ResponseBuilder::new(status).build()
    }

    /// A `text/plain` response carrying `body`.
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .header("Content-Length", body.len().to_string())
            .body(body)
            .build()
    }

    /// A 200 OK `application/octet-stream` response.
    pub fn octet_stream(body: Vec<u8>) -> Self {
        ResponseBuilder::new(StatusCode::OK)
            .header("Content-Type", "application/octet-stream")
            .header("Content-Length", body.len().to_string())
            .body(body)
            .build()
    }

    pub fn ok() -> Self {
        Self::empty(StatusCode::OK)
    }

    pub fn created() -> Self {
        Self::empty(StatusCode::CREATED)
    }

    pub fn bad_request() -> Self {
        Self::empty(StatusCode::BAD_REQUEST)
    }

    pub fn not_found() -> Self {
        Self::empty(StatusCode::NOT_FOUND)
    }

    /// 500 with the error message as a `text/plain` body.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::text(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}
