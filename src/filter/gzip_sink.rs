//! Threshold-deferred gzip response sink.
//!
//! [`GzipResponseSink`] wraps a downstream [`ResponseSink`] and holds body
//! bytes back until it knows whether compressing is worth it:
//!
//! - Below the threshold, writes accumulate in a plain buffer and nothing
//!   reaches the downstream sink.
//! - The write that reaches the threshold commits the response to gzip:
//!   `Content-Length` is dropped, `Content-Encoding: gzip` and
//!   `Vary: Accept-Encoding` are set, and from then on encoder output drains
//!   downstream as it is produced. The commitment is irreversible.
//! - If [`finish`](GzipResponseSink::finish) arrives while still buffering,
//!   the held bytes flow downstream untouched and no encoding header is set.
//!
//! Once a response has committed to gzip, attempts to change
//! `Content-Length` or `Content-Encoding` are ignored; they would lie about
//! the bytes on the wire.

use std::io::{self, Write};
use std::mem;

use flate2::write::GzEncoder;
use flate2::Compression;
use http::header::{self, HeaderName};
use http::{HeaderValue, StatusCode};
use tracing::{debug, trace};

use crate::core::response::ResponseSink;

enum SinkState {
    /// Below threshold: bytes held back, nothing written downstream.
    Buffering(Vec<u8>),
    /// Committed to gzip: encoder output drains downstream as it appears.
    Compressing(GzEncoder<Vec<u8>>),
    /// Sealed by [`GzipResponseSink::finish`].
    Finished { compressed: bool },
}

/// A [`ResponseSink`] decorator that gzips bodies once they prove large
/// enough.
///
/// Wraps the downstream sink for the duration of one exchange. The caller
/// must invoke [`finish`](GzipResponseSink::finish) on every exit path,
/// success or not, or a small response stays stuck in the buffer.
pub struct GzipResponseSink<'a> {
    inner: &'a mut dyn ResponseSink,
    threshold: usize,
    state: SinkState,
}

impl<'a> GzipResponseSink<'a> {
    /// Wrap `inner`, compressing only bodies of at least `threshold` bytes.
    ///
    /// A threshold of zero commits to gzip on the first write.
    pub fn new(inner: &'a mut dyn ResponseSink, threshold: usize) -> Self {
        Self {
            inner,
            threshold,
            state: SinkState::Buffering(Vec::new()),
        }
    }

    /// Whether the sink has committed to gzip output.
    pub fn is_compressing(&self) -> bool {
        matches!(
            self.state,
            SinkState::Compressing(_) | SinkState::Finished { compressed: true }
        )
    }

    /// Whether the sink has been sealed by [`finish`](Self::finish).
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SinkState::Finished { .. })
    }

    /// Flush whichever path the sink committed to and seal it.
    ///
    /// Idempotent: the first call decides the outcome, later calls are
    /// no-ops.
    pub fn finish(&mut self) -> io::Result<()> {
        match mem::replace(&mut self.state, SinkState::Finished { compressed: false }) {
            SinkState::Buffering(buf) => {
                debug!(
                    len = buf.len(),
                    threshold = self.threshold,
                    "body below threshold, passing through uncompressed"
                );
                if !buf.is_empty() {
                    self.inner.write_body(&buf)?;
                }
                self.inner.flush()
            }
            SinkState::Compressing(encoder) => {
                self.state = SinkState::Finished { compressed: true };
                let tail = encoder.finish()?;
                if !tail.is_empty() {
                    self.inner.write_body(&tail)?;
                }
                self.inner.flush()
            }
            SinkState::Finished { compressed } => {
                self.state = SinkState::Finished { compressed };
                Ok(())
            }
        }
    }

    /// Switch from buffering to gzip. No-op unless currently buffering.
    fn commit_to_gzip(&mut self) -> io::Result<()> {
        let buffered = match &mut self.state {
            SinkState::Buffering(buf) => mem::take(buf),
            _ => return Ok(()),
        };
        debug!(
            buffered = buffered.len(),
            threshold = self.threshold,
            "threshold reached, switching to gzip"
        );
        self.inner.remove_header(&header::CONTENT_LENGTH);
        self.inner
            .insert_header(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        self.inner
            .insert_header(header::VARY, HeaderValue::from_static("Accept-Encoding"));
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&buffered)?;
        self.state = SinkState::Compressing(encoder);
        Ok(())
    }

    /// Move whatever the encoder has produced so far downstream.
    fn drain_compressed(&mut self) -> io::Result<()> {
        if let SinkState::Compressing(encoder) = &mut self.state {
            if !encoder.get_ref().is_empty() {
                let chunk = mem::take(encoder.get_mut());
                self.inner.write_body(&chunk)?;
            }
        }
        Ok(())
    }
}

impl ResponseSink for GzipResponseSink<'_> {
    #[inline]
    fn status(&self) -> StatusCode {
        self.inner.status()
    }

    #[inline]
    fn set_status(&mut self, status: StatusCode) {
        self.inner.set_status(status);
    }

    #[inline]
    fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.inner.header(name)
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        if self.is_compressing() && is_guarded(&name) {
            trace!(header = %name, "ignoring header write after gzip commitment");
            return;
        }
        self.inner.insert_header(name, value);
    }

    fn remove_header(&mut self, name: &HeaderName) {
        if self.is_compressing() && is_guarded(name) {
            trace!(header = %name, "ignoring header removal after gzip commitment");
            return;
        }
        self.inner.remove_header(name);
    }

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        let over_threshold = match &mut self.state {
            SinkState::Buffering(buf) => {
                buf.extend_from_slice(chunk);
                buf.len() >= self.threshold
            }
            SinkState::Compressing(encoder) => {
                encoder.write_all(chunk)?;
                false
            }
            SinkState::Finished { .. } => return Err(closed()),
        };
        if over_threshold {
            self.commit_to_gzip()?;
        }
        self.drain_compressed()
    }

    fn flush(&mut self) -> io::Result<()> {
        let committed = match &mut self.state {
            // Still undecided; emitting now would foreclose the passthrough
            // path for small bodies.
            SinkState::Buffering(_) => false,
            SinkState::Compressing(encoder) => {
                encoder.flush()?;
                true
            }
            SinkState::Finished { .. } => false,
        };
        if committed {
            self.drain_compressed()?;
            self.inner.flush()?;
        }
        Ok(())
    }
}

fn is_guarded(name: &HeaderName) -> bool {
    *name == header::CONTENT_LENGTH || *name == header::CONTENT_ENCODING
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "write after response finalized")
}
