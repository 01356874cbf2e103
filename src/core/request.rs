//! HTTP request descriptor for the filter pipeline.

use http::header::{self, HeaderName};
use http::{HeaderMap, Method, Uri};

/// Header name constants for fast lookup.
mod header_names {
    use super::*;

    pub static ACCEPT_ENCODING: HeaderName = header::ACCEPT_ENCODING;
    pub static USER_AGENT: HeaderName = header::USER_AGENT;
}

/// The request-side view a filter needs: URI plus header lookup.
///
/// Hosts build one per request from their native request type (see the
/// `From<http::request::Parts>` impl) and discard it once the response is
/// complete. The request body never passes through this crate.
///
/// Note: Clone is intentionally not derived to prevent expensive copies.
/// Use references or move semantics instead.
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl Request {
    /// Create a new request descriptor.
    #[inline]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
        }
    }

    /// Get the HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Get the request path (no query string).
    #[inline]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Get the query string.
    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Get the full URI.
    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Get the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header value by name (fast path with HeaderName constant).
    #[inline]
    fn header_by_name(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get a header value by string name (slower, case-insensitive).
    #[inline]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get Accept-Encoding header value.
    #[inline]
    pub fn accept_encoding(&self) -> Option<&str> {
        self.header_by_name(&header_names::ACCEPT_ENCODING)
    }

    /// Get User-Agent header value.
    #[inline]
    pub fn user_agent(&self) -> Option<&str> {
        self.header_by_name(&header_names::USER_AGENT)
    }

    /// Check if the client accepts gzip compression.
    ///
    /// Also covers the historical `x-gzip` spelling.
    #[inline]
    pub fn accepts_gzip(&self) -> bool {
        self.accept_encoding()
            .map(|v| v.contains("gzip"))
            .unwrap_or(false)
    }
}

impl From<http::request::Parts> for Request {
    fn from(parts: http::request::Parts) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
        }
    }
}
