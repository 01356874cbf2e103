//! Filter pipeline.
//!
//! Filters wrap request handling the way servlet filters do: each sees the
//! request descriptor, the response sink, and a [`Next`] handle that runs
//! the rest of the chain. A filter may decorate the sink it forwards through
//! [`Next::run`], which is exactly how [`GzipFilter`] injects its
//! compressing wrapper.

pub mod chain;
pub mod gzip;
pub mod gzip_sink;

pub use chain::{FilterChain, Handler, Next};
pub use gzip::GzipFilter;
pub use gzip_sink::GzipResponseSink;

use crate::core::error::Result;
use crate::core::request::Request;
use crate::core::response::ResponseSink;

/// Interface implemented by response filters.
///
/// Implementations must be stateless per request; a single instance is
/// shared across every exchange the chain serves.
pub trait Filter: Send + Sync {
    /// Short name used in logs and chain introspection.
    fn name(&self) -> &'static str;

    /// Handle one exchange, calling `next.run` to continue the chain.
    fn handle(&self, req: &Request, res: &mut dyn ResponseSink, next: Next<'_>) -> Result<()>;
}
