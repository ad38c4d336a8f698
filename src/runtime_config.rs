//! # Runtime Configuration Module
//!
//! Environment-variable driven knobs for the router's runtime behavior.
//!
//! ## Environment Variables
//!
//! ### `SPRIG_SLOW_MATCH_US`
//!
//! Trie lookups that take longer than this many microseconds are logged at
//! `warn`. Accepts a decimal integer.
//!
//! Default: `1000` (1 ms)
//!
//! ## Usage
//!
//! ```rust
//! use sprig::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow match threshold: {:?}", config.slow_match_threshold);
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_SLOW_MATCH_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Lookups slower than this are reported at `warn`
    pub slow_match_threshold: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            slow_match_threshold: Duration::from_micros(DEFAULT_SLOW_MATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let slow_match_us = lookup("SPRIG_SLOW_MATCH_US")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_SLOW_MATCH_US);
        RuntimeConfig {
            slow_match_threshold: Duration::from_micros(slow_match_us),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let cfg = RuntimeConfig::from_lookup(|_| None);
        assert_eq!(cfg, RuntimeConfig::default());
        assert_eq!(cfg.slow_match_threshold, Duration::from_millis(1));
    }

    #[test]
    fn test_reads_threshold() {
        let cfg = RuntimeConfig::from_lookup(|k| {
            (k == "SPRIG_SLOW_MATCH_US").then(|| "250".to_string())
        });
        assert_eq!(cfg.slow_match_threshold, Duration::from_micros(250));
    }

    #[test]
    fn test_invalid_value_falls_back() {
        let cfg = RuntimeConfig::from_lookup(|_| Some("fast".to_string()));
        assert_eq!(cfg.slow_match_threshold, Duration::from_micros(1000));
    }
}
