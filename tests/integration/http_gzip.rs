//! Decision tests: which exchanges compress and which pass through.

use crate::helpers::*;
use gzip_filter::config::GzipConfig;
use gzip_filter::core::ResponseSink;
use http::header::VARY;

fn config() -> GzipConfig {
    GzipConfig::builder()
        .threshold(16)
        .ignore_url_pattern(r".*\.(png|jpg|gif)")
        .ignore_user_agents_pattern("(?i)mozilla/4\\.0[678].*")
        .build()
        .expect("config should build")
}

/// Test that gzip is applied when Accept-Encoding: gzip is sent
#[test]
fn test_gzip_applied_for_accepting_client() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/page.html", &[("accept-encoding", "gzip")]);
    assert_gzipped(&res, &[b'a'; 64]);
}

/// Test the legacy x-gzip token also counts as gzip support
#[test]
fn test_x_gzip_token_accepted() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/page.html", &[("accept-encoding", "x-gzip")]);
    assert_gzipped(&res, &[b'a'; 64]);
}

/// Test gzip is picked out of a multi-token Accept-Encoding
#[test]
fn test_accept_encoding_multiple_tokens() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/page.html", &[("accept-encoding", "deflate, gzip;q=0.9, br")]);
    assert_gzipped(&res, &[b'a'; 64]);
}

/// Test Vary: Accept-Encoding is set on compressed responses
#[test]
fn test_vary_header_present() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/page.html", &[("accept-encoding", "gzip")]);
    assert_eq!(
        res.header_str(&VARY),
        Some("Accept-Encoding"),
        "compressed responses should vary on Accept-Encoding"
    );
}

/// Test no compression when Accept-Encoding is not sent
#[test]
fn test_no_compression_without_accept_encoding() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/page.html", &[]);
    assert_identity(&res, &[b'a'; 64]);
    assert!(res.header(&VARY).is_none(), "untouched response gains no Vary");
}

/// Test clients asking for other encodings get identity
#[test]
fn test_no_compression_for_other_encodings() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/page.html", &[("accept-encoding", "br, deflate")]);
    assert_identity(&res, &[b'a'; 64]);

    let res = app.get("/page.html", &[("accept-encoding", "identity")]);
    assert_identity(&res, &[b'a'; 64]);
}

/// Test excluded URLs are never compressed, even for gzip clients
#[test]
fn test_ignored_url_never_compressed() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/images/logo.png", &[("accept-encoding", "gzip")]);
    assert_identity(&res, &[b'a'; 64]);
}

/// Test the URL exclusion matches on the path with the query stripped
#[test]
fn test_ignored_url_matches_path_without_query() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get("/images/logo.png?cache=1", &[("accept-encoding", "gzip")]);
    assert_identity(&res, &[b'a'; 64]);
}

/// Test the URL exclusion applies only when the pattern spans the whole path
#[test]
fn test_url_exclusion_requires_full_path_match() {
    let pattern_config = |pattern: &str| {
        GzipConfig::builder()
            .threshold(10)
            .ignore_url_pattern(pattern)
            .build()
            .expect("config should build")
    };

    // "admin" occurs in the path but does not span it, so the exchange
    // still compresses.
    let app = TestApp::with_body_of(pattern_config("admin"), b'a', 64);
    let res = app.get("/admin/dashboard", &[("accept-encoding", "gzip")]);
    assert_gzipped(&res, &[b'a'; 64]);

    // A pattern covering the whole path excludes it.
    let app = TestApp::with_body_of(pattern_config("/admin/.*"), b'a', 64);
    let res = app.get("/admin/dashboard", &[("accept-encoding", "gzip")]);
    assert_identity(&res, &[b'a'; 64]);
}

/// Test excluded User-Agents are never compressed
#[test]
fn test_ignored_user_agent_never_compressed() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get(
        "/page.html",
        &[
            ("accept-encoding", "gzip"),
            ("user-agent", "Mozilla/4.06 (X11; U; SunOS)"),
        ],
    );
    assert_identity(&res, &[b'a'; 64]);
}

/// Test a non-matching User-Agent still compresses
#[test]
fn test_other_user_agents_still_compress() {
    let app = TestApp::with_body_of(config(), b'a', 64);
    let res = app.get(
        "/page.html",
        &[
            ("accept-encoding", "gzip"),
            ("user-agent", "Mozilla/5.0 (X11; Linux x86_64)"),
        ],
    );
    assert_gzipped(&res, &[b'a'; 64]);
}
