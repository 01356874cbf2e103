//! Logging setup.
//!
//! Hosts embedding the filter usually bring their own `tracing` subscriber;
//! these helpers cover binaries and tests that just want sensible output.
//! `RUST_LOG` overrides the default directive when set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a formatting subscriber with an `info` default level.
pub fn init() {
    init_with_filter("info");
}

/// Install a formatting subscriber with the given default directive.
///
/// Does nothing if a global subscriber is already installed, so repeated
/// calls from tests are harmless.
pub fn init_with_filter(default: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init();
}
