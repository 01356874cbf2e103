//! Threshold behavior: small bodies pass through, large ones compress.

use crate::helpers::*;
use gzip_filter::config::{GzipConfig, DEFAULT_COMPRESSION_THRESHOLD};

fn tiny_threshold() -> GzipConfig {
    GzipConfig::builder()
        .threshold(10)
        .build()
        .expect("config should build")
}

/// Test a body below the threshold is served unmodified
#[test]
fn test_body_below_threshold_unmodified() {
    let app = TestApp::new(tiny_threshold(), b"hello");
    let res = app.get("/greeting", &[("accept-encoding", "gzip")]);
    assert_identity(&res, b"hello");
}

/// Test a body at exactly the threshold is compressed
#[test]
fn test_body_at_threshold_compressed() {
    let app = TestApp::with_body_of(tiny_threshold(), b'a', 10);
    let res = app.get("/page", &[("accept-encoding", "gzip")]);
    assert_gzipped(&res, &[b'a'; 10]);
}

/// Test a body above the threshold is compressed and decodes intact
#[test]
fn test_body_above_threshold_compressed() {
    let app = TestApp::with_body_of(tiny_threshold(), b'a', 20);
    let res = app.get("/page", &[("accept-encoding", "gzip")]);
    assert_gzipped(&res, &[b'a'; 20]);
}

/// Test the default threshold splits at 8192 bytes
#[test]
fn test_default_threshold_boundary() {
    let just_under = TestApp::with_body_of(
        GzipConfig::new(),
        b'x',
        DEFAULT_COMPRESSION_THRESHOLD - 1,
    );
    let res = just_under.get("/page", &[("accept-encoding", "gzip")]);
    assert_identity(&res, &vec![b'x'; DEFAULT_COMPRESSION_THRESHOLD - 1]);

    let at_limit = TestApp::with_body_of(GzipConfig::new(), b'x', DEFAULT_COMPRESSION_THRESHOLD);
    let res = at_limit.get("/page", &[("accept-encoding", "gzip")]);
    assert_gzipped(&res, &vec![b'x'; DEFAULT_COMPRESSION_THRESHOLD]);
}

/// Test the threshold counts cumulative bytes across many small writes
#[test]
fn test_chunked_writes_cross_threshold() {
    let app = TestApp::with_body_of(tiny_threshold(), b'c', 64);
    let res = app.get_chunked("/page", &[("accept-encoding", "gzip")], 3);
    assert_gzipped(&res, &[b'c'; 64]);
}

/// Test chunked writes that never reach the threshold pass through
#[test]
fn test_chunked_writes_below_threshold() {
    let app = TestApp::new(tiny_threshold(), b"abcdefg");
    let res = app.get_chunked("/page", &[("accept-encoding", "gzip")], 2);
    assert_identity(&res, b"abcdefg");
}

/// Test an empty body stays empty with no encoding header
#[test]
fn test_empty_body_stays_empty() {
    let app = TestApp::new(tiny_threshold(), b"");
    let res = app.get("/empty", &[("accept-encoding", "gzip")]);
    assert_identity(&res, b"");
}
