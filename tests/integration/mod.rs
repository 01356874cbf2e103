//! Integration tests for gzip_filter
//!
//! These run the filter chain in process against an in-memory response
//! sink; no network or external server is involved.


mod http_gzip;
mod thresholds;
