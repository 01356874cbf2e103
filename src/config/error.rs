//! Configuration error type.

use std::error::Error as StdError;
use std::fmt;

/// Error raised while building filter configuration.
///
/// Pattern errors are raised eagerly at configuration time so a broken
/// exclusion regex aborts startup instead of surfacing per request.
#[derive(Debug)]
pub enum ConfigError {
    /// An exclusion pattern failed to compile.
    InvalidPattern {
        key: String,
        pattern: String,
        error: regex::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPattern { key, pattern, error } => {
                write!(f, "invalid regex for {key}: \"{pattern}\": {error}")
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::InvalidPattern { error, .. } => Some(error),
        }
    }
}
