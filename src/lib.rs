//! Conditional gzip compression for HTTP responses.
//!
//! The crate provides a servlet-style [`GzipFilter`] that sits in a
//! [`FilterChain`] in front of a request handler and compresses response
//! bodies when, and only when, it is worth it:
//!
//! - the client advertises gzip support in `Accept-Encoding`;
//! - neither the request path nor the User-Agent matches a configured
//!   exclusion pattern;
//! - the body reaches a configurable size threshold (8192 bytes unless
//!   overridden).
//!
//! Responses below the threshold pass through byte for byte. Larger ones go
//! out with `Content-Encoding: gzip`, a cleared `Content-Length` and
//! `Vary: Accept-Encoding`.
//!
//! # Example
//!
//! ```
//! use gzip_filter::config::GzipConfig;
//! use gzip_filter::core::{BufferedResponse, Request, ResponseSink};
//! use gzip_filter::filter::{FilterChain, GzipFilter};
//! use http::{HeaderMap, Method};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GzipConfig::builder()
//!     .threshold(64)
//!     .ignore_url_pattern(r".*\.png")
//!     .build()?;
//!
//! let chain = FilterChain::new().add(GzipFilter::new(config));
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(http::header::ACCEPT_ENCODING, "gzip".parse()?);
//! let req = Request::new(Method::GET, "/report".parse()?, headers);
//!
//! let mut res = BufferedResponse::new();
//! chain.run(&req, &mut res, &|_req, res| {
//!     res.write_body(&[b'x'; 512])?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(res.header_str(&http::header::CONTENT_ENCODING), Some("gzip"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod filter;
pub mod logging;

pub use crate::config::{ConfigError, GzipConfig, DEFAULT_COMPRESSION_THRESHOLD};
pub use crate::core::{BufferedResponse, Error, Request, ResponseSink, Result};
pub use crate::filter::{Filter, FilterChain, GzipFilter, GzipResponseSink, Next};

/// Crate version, for diagnostics.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
