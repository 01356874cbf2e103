//! Gzip filter configuration.
//!
//! Three knobs, mirroring the classic servlet filter init parameters:
//!
//! - `compression_threshold` / `COMPRESSION_THRESHOLD`: minimum body size in
//!   bytes before compression kicks in. Only a positive number overrides the
//!   default.
//! - `ignore_url_pattern` / `IGNORE_URL_PATTERN`: regex that must match the
//!   whole request path; matching requests are never compressed.
//! - `ignore_user_agents_pattern` / `IGNORE_USER_AGENTS_PATTERN`: regex that
//!   must match the whole User-Agent header; matching clients are never
//!   compressed.
//!
//! Patterns compile eagerly; a broken regex is a startup error, not a
//! per-request surprise.

use std::collections::HashMap;

use regex::Regex;
use tracing::debug;

use super::error::ConfigError;
use super::parse::{env_opt, param_opt, read_threshold};

/// Default minimum body size, in bytes, before compression kicks in.
pub const DEFAULT_COMPRESSION_THRESHOLD: usize = 8192;

const THRESHOLD_KEY: &str = "compression_threshold";
const IGNORE_URL_KEY: &str = "ignore_url_pattern";
const IGNORE_USER_AGENTS_KEY: &str = "ignore_user_agents_pattern";

const THRESHOLD_ENV: &str = "COMPRESSION_THRESHOLD";
const IGNORE_URL_ENV: &str = "IGNORE_URL_PATTERN";
const IGNORE_USER_AGENTS_ENV: &str = "IGNORE_USER_AGENTS_PATTERN";

/// Settings for [`GzipFilter`](crate::filter::GzipFilter).
#[derive(Debug, Clone)]
pub struct GzipConfig {
    threshold: usize,
    ignore_url_pattern: Option<ExclusionPattern>,
    ignore_user_agents_pattern: Option<ExclusionPattern>,
}

impl GzipConfig {
    /// Create a config with the default threshold and no exclusions.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a config.
    #[inline]
    pub fn builder() -> GzipConfigBuilder {
        GzipConfigBuilder::default()
    }

    /// Build from a set of init parameters, servlet style.
    ///
    /// Unknown keys are ignored; empty values count as unset.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder().threshold(read_threshold(
            param_opt(params, THRESHOLD_KEY),
            DEFAULT_COMPRESSION_THRESHOLD,
        ));
        if let Some(pattern) = param_opt(params, IGNORE_URL_KEY) {
            builder = builder.ignore_url_pattern(pattern);
        }
        if let Some(pattern) = param_opt(params, IGNORE_USER_AGENTS_KEY) {
            builder = builder.ignore_user_agents_pattern(pattern);
        }
        builder.build()
    }

    /// Build from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder().threshold(read_threshold(
            env_opt(THRESHOLD_ENV).as_deref(),
            DEFAULT_COMPRESSION_THRESHOLD,
        ));
        if let Some(pattern) = env_opt(IGNORE_URL_ENV) {
            builder = builder.ignore_url_pattern(pattern);
        }
        if let Some(pattern) = env_opt(IGNORE_USER_AGENTS_ENV) {
            builder = builder.ignore_user_agents_pattern(pattern);
        }
        builder.build()
    }

    /// Minimum body size, in bytes, before compression kicks in.
    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Source text of the URL exclusion pattern, if any.
    #[inline]
    pub fn ignore_url_pattern(&self) -> Option<&str> {
        self.ignore_url_pattern.as_ref().map(|p| p.source.as_str())
    }

    /// Source text of the User-Agent exclusion pattern, if any.
    #[inline]
    pub fn ignore_user_agents_pattern(&self) -> Option<&str> {
        self.ignore_user_agents_pattern.as_ref().map(|p| p.source.as_str())
    }

    /// Whether the URL exclusion pattern matches the entire request path.
    pub fn is_url_ignored(&self, path: &str) -> bool {
        self.ignore_url_pattern
            .as_ref()
            .map(|p| p.matches(path))
            .unwrap_or(false)
    }

    /// Whether the client exclusion pattern matches the entire User-Agent.
    pub fn is_user_agent_ignored(&self, user_agent: &str) -> bool {
        self.ignore_user_agents_pattern
            .as_ref()
            .map(|p| p.matches(user_agent))
            .unwrap_or(false)
    }

    /// Log the effective configuration.
    pub fn log_summary(&self) {
        debug!(
            threshold = self.threshold,
            ignore_url_pattern = self.ignore_url_pattern(),
            ignore_user_agents_pattern = self.ignore_user_agents_pattern(),
            "gzip filter configured"
        );
    }
}

impl Default for GzipConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_COMPRESSION_THRESHOLD,
            ignore_url_pattern: None,
            ignore_user_agents_pattern: None,
        }
    }
}

/// Builder for [`GzipConfig`].
#[derive(Debug, Default)]
pub struct GzipConfigBuilder {
    threshold: Option<usize>,
    ignore_url_pattern: Option<String>,
    ignore_user_agents_pattern: Option<String>,
}

impl GzipConfigBuilder {
    /// Set the compression threshold. Zero keeps the default.
    pub fn threshold(mut self, threshold: usize) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the URL exclusion pattern.
    ///
    /// An excluded path must match the pattern in full: `admin` does not
    /// exclude `/admin/users`, while `/admin/.*` does.
    pub fn ignore_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_url_pattern = Some(pattern.into());
        self
    }

    /// Set the User-Agent exclusion pattern.
    ///
    /// The whole header value must match, so prefix patterns want a
    /// trailing `.*`.
    pub fn ignore_user_agents_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_user_agents_pattern = Some(pattern.into());
        self
    }

    /// Compile the patterns and produce the config.
    pub fn build(self) -> Result<GzipConfig, ConfigError> {
        let threshold = match self.threshold {
            Some(n) if n > 0 => n,
            _ => DEFAULT_COMPRESSION_THRESHOLD,
        };
        Ok(GzipConfig {
            threshold,
            ignore_url_pattern: compile(IGNORE_URL_KEY, self.ignore_url_pattern)?,
            ignore_user_agents_pattern: compile(
                IGNORE_USER_AGENTS_KEY,
                self.ignore_user_agents_pattern,
            )?,
        })
    }
}

/// An exclusion pattern compiled for whole-subject matching.
///
/// The regex is wrapped in implicit anchors so it only matches when it spans
/// the entire path or User-Agent value; `source` keeps the text as configured
/// for accessors, logs and error messages.
#[derive(Debug, Clone)]
struct ExclusionPattern {
    source: String,
    regex: Regex,
}

impl ExclusionPattern {
    fn matches(&self, subject: &str) -> bool {
        self.regex.is_match(subject)
    }
}

fn compile(key: &str, pattern: Option<String>) -> Result<Option<ExclusionPattern>, ConfigError> {
    match pattern {
        Some(pattern) => match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(regex) => Ok(Some(ExclusionPattern {
                source: pattern,
                regex,
            })),
            Err(error) => Err(ConfigError::InvalidPattern {
                key: key.to_string(),
                pattern,
                error,
            }),
        },
        None => Ok(None),
    }
}
