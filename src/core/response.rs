//! HTTP response abstractions for the filter pipeline.
//!
//! Filters never see a concrete host response type. They work against
//! [`ResponseSink`], the minimal capability set the hosting server must
//! provide: status and header access plus a writable byte sink. A filter may
//! replace the sink it forwards downstream with a decorated one for the
//! duration of a single request.

use std::io;

use bytes::{Bytes, BytesMut};
use http::header::HeaderName;
use http::{HeaderMap, HeaderValue, StatusCode};

/// Capability set of an outbound HTTP response.
///
/// Implementations are owned by a single request/response exchange; the
/// pipeline never shares a sink across requests.
pub trait ResponseSink {
    /// Get the response status.
    fn status(&self) -> StatusCode;

    /// Set the response status.
    fn set_status(&mut self, status: StatusCode);

    /// Get a response header.
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue>;

    /// Set a response header, replacing any previous value.
    fn insert_header(&mut self, name: HeaderName, value: HeaderValue);

    /// Remove a response header.
    fn remove_header(&mut self, name: &HeaderName);

    /// Write a chunk of body bytes.
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// Flush buffered body bytes toward the client.
    fn flush(&mut self) -> io::Result<()>;

    /// Get a header as a string, if present and valid UTF-8.
    fn header_str(&self, name: &HeaderName) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }
}

/// In-memory [`ResponseSink`] backed by a growable byte buffer.
///
/// Suitable for hosts that assemble complete responses before writing them to
/// the wire, and for tests. Converts into an `http::Response<Bytes>` once the
/// exchange is finished.
///
/// Note: Clone is intentionally not derived to prevent expensive copies.
#[derive(Debug)]
pub struct BufferedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl BufferedResponse {
    /// Create an empty 200 OK response.
    #[inline]
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: BytesMut::new(),
        }
    }

    /// Get the headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the accumulated body bytes.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Get the accumulated body length.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Consume the response, keeping only the body.
    #[inline]
    pub fn into_body(self) -> Bytes {
        self.body.freeze()
    }

    /// Convert into an `http` response for handoff to the host.
    pub fn into_http(self) -> http::Response<Bytes> {
        let mut res = http::Response::new(self.body.freeze());
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }
}

impl Default for BufferedResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSink for BufferedResponse {
    #[inline]
    fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    #[inline]
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    #[inline]
    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    #[inline]
    fn remove_header(&mut self, name: &HeaderName) {
        self.headers.remove(name);
    }

    #[inline]
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.body.extend_from_slice(chunk);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        // Everything is already in memory.
        Ok(())
    }
}
