//! Conditional gzip response filter.

use tracing::{debug, error, warn};

use crate::config::GzipConfig;
use crate::core::error::Result;
use crate::core::request::Request;
use crate::core::response::ResponseSink;

use super::chain::Next;
use super::gzip_sink::GzipResponseSink;
use super::Filter;

/// Filter that gzip-compresses responses for clients that ask for it.
///
/// Per request the filter decides once, before the handler runs, whether
/// the exchange is a compression candidate:
///
/// 1. paths matching the configured URL exclusion never compress;
/// 2. clients whose User-Agent matches the configured exclusion never
///    compress;
/// 3. otherwise the exchange is a candidate exactly when Accept-Encoding
///    lists gzip.
///
/// Candidates get their sink wrapped in [`GzipResponseSink`]; whether gzip
/// actually happens then depends on the body reaching the configured
/// threshold. Everything else flows through untouched.
///
/// The filter keeps no per-request state, so one instance can serve
/// concurrent exchanges.
pub struct GzipFilter {
    config: GzipConfig,
}

impl GzipFilter {
    /// Create the filter from a prepared config.
    pub fn new(config: GzipConfig) -> Self {
        config.log_summary();
        Self { config }
    }

    /// Create the filter with the default threshold and no exclusions.
    pub fn with_defaults() -> Self {
        Self::new(GzipConfig::default())
    }

    /// Get the active configuration.
    #[inline]
    pub fn config(&self) -> &GzipConfig {
        &self.config
    }

    fn should_compress(&self, req: &Request) -> bool {
        if self.config.is_url_ignored(req.path()) {
            debug!(path = req.path(), "url excluded from compression");
            return false;
        }
        if let Some(agent) = req.user_agent() {
            if self.config.is_user_agent_ignored(agent) {
                debug!(user_agent = agent, "client excluded from compression");
                return false;
            }
        }
        if !req.accepts_gzip() {
            debug!(path = req.path(), "client does not accept gzip");
            return false;
        }
        true
    }
}

impl Filter for GzipFilter {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn handle(&self, req: &Request, res: &mut dyn ResponseSink, next: Next<'_>) -> Result<()> {
        if !self.should_compress(req) {
            return next.run(req, res);
        }

        let mut sink = GzipResponseSink::new(res, self.config.threshold());
        let result = next.run(req, &mut sink);
        if let Err(err) = &result {
            error!(path = req.path(), error = %err, "handler failed under gzip filter");
        }
        // The wrapper must settle on every exit path or held-back bytes
        // would never reach the client.
        let finished = sink.finish();
        if let Err(err) = &finished {
            warn!(path = req.path(), error = %err, "failed to finalize gzip response");
        }
        result?;
        finished?;
        Ok(())
    }
}
