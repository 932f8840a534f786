//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the control surface.
//!
//! ## Environment Variables
//!
//! ### `MSRV_ROUTES`
//!
//! Path to a route table file (`.toml`, `.yaml`/`.yml` or `.json`). Optional;
//! embedders that register routes in code leave it unset.
//!
//! ### `MSRV_METHOD_NOT_ALLOWED`
//!
//! When `1`, `true`, `yes` or `on`, a request whose path matches a route but
//! whose method has no handler is answered with 405 and the allowed methods.
//! Otherwise it is answered like any unmatched path (404). Default: off.
//!
//! ### `MSRV_SLOW_DISPATCH_US`
//!
//! Dispatches slower than this many microseconds are logged at warn level.
//! Accepts decimal (`1000`) or hexadecimal (`0x3e8`). Default: `1000`.
//!
//! ## Usage
//!
//! ```rust
//! use msrv_router::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Slow dispatch threshold: {:?}", config.slow_dispatch);
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_SLOW_DISPATCH_US: u64 = 1000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Route table to load at startup
    pub routes_file: Option<PathBuf>,
    /// Answer 405 for path-matched requests with an unregistered method
    pub method_not_allowed: bool,
    /// Slow dispatch warning threshold
    pub slow_dispatch: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            routes_file: None,
            method_not_allowed: false,
            slow_dispatch: Duration::from_micros(DEFAULT_SLOW_DISPATCH_US),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let routes_file = lookup("MSRV_ROUTES")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let method_not_allowed = lookup("MSRV_METHOD_NOT_ALLOWED")
            .map(|val| parse_flag(&val))
            .unwrap_or(false);

        let slow_us = match lookup("MSRV_SLOW_DISPATCH_US") {
            Some(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    u64::from_str_radix(hex, 16).unwrap_or(DEFAULT_SLOW_DISPATCH_US)
                } else {
                    val.parse().unwrap_or(DEFAULT_SLOW_DISPATCH_US)
                }
            }
            None => DEFAULT_SLOW_DISPATCH_US,
        };

        RuntimeConfig {
            routes_file,
            method_not_allowed,
            slow_dispatch: Duration::from_micros(slow_us),
        }
    }
}

fn parse_flag(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
