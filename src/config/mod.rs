//! Filter configuration.
//!
//! Configuration can come from three places: the typed
//! [`GzipConfigBuilder`], a string map of init parameters
//! ([`GzipConfig::from_params`]), or the process environment
//! ([`GzipConfig::from_env`]). All three funnel through the same validation,
//! so exclusion patterns always compile before the first request.

pub mod error;
pub mod gzip;
pub mod parse;

pub use error::ConfigError;
pub use gzip::{GzipConfig, GzipConfigBuilder, DEFAULT_COMPRESSION_THRESHOLD};
