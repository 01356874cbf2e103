//! Filter chain assembly and execution.

use std::sync::Arc;

use tracing::trace;

use crate::core::error::Result;
use crate::core::request::Request;
use crate::core::response::ResponseSink;

use super::Filter;

/// Terminal handler invoked once every filter has passed the request on.
pub type Handler = dyn Fn(&Request, &mut dyn ResponseSink) -> Result<()>;

/// Handle on the remainder of the chain.
///
/// Each filter receives one; calling [`run`](Next::run) executes the filters
/// after it and finally the terminal handler. Not calling it short-circuits
/// the exchange.
pub struct Next<'a> {
    filters: &'a [Arc<dyn Filter>],
    handler: &'a Handler,
}

impl Next<'_> {
    /// Run the remaining filters, then the terminal handler.
    pub fn run(self, req: &Request, res: &mut dyn ResponseSink) -> Result<()> {
        match self.filters.split_first() {
            Some((filter, rest)) => {
                trace!(filter = filter.name(), "entering filter");
                filter.handle(
                    req,
                    res,
                    Next {
                        filters: rest,
                        handler: self.handler,
                    },
                )
            }
            None => (self.handler)(req, res),
        }
    }
}

/// Ordered collection of filters wrapped around a terminal handler.
///
/// Filters run in registration order on the way in and unwind in reverse on
/// the way out. The chain holds no per-request state; one instance serves
/// any number of sequential or concurrent exchanges.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Register a filter at the end of the chain.
    pub fn add<F: Filter + 'static>(self, filter: F) -> Self {
        self.add_arc(Arc::new(filter))
    }

    /// Register an already shared filter.
    pub fn add_arc(mut self, filter: Arc<dyn Filter>) -> Self {
        trace!(filter = filter.name(), "registered filter");
        self.filters.push(filter);
        self
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Names of the registered filters, in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Run one exchange through the chain and into `handler`.
    pub fn run(&self, req: &Request, res: &mut dyn ResponseSink, handler: &Handler) -> Result<()> {
        Next {
            filters: &self.filters,
            handler,
        }
        .run(req, res)
    }
}
