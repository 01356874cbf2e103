//! Parsing helpers shared by the configuration sources.

use std::collections::HashMap;
use std::env;

/// Read an optional environment variable. Empty values count as unset.
pub fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Look up an optional init parameter. Empty values count as unset.
pub fn param_opt<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    match params.get(key) {
        Some(v) if !v.trim().is_empty() => Some(v.trim()),
        _ => None,
    }
}

/// Interpret a raw threshold value.
///
/// Only a number that parses as a positive `usize` overrides `default`;
/// anything else, including values too large for the platform, the default
/// wins. Misconfigured sizes degrade to the stock threshold rather than
/// failing startup.
pub fn read_threshold(raw: Option<&str>, default: usize) -> usize {
    match raw.and_then(|v| v.trim().parse::<usize>().ok()) {
        Some(n) if n > 0 => n,
        _ => default,
    }
}
