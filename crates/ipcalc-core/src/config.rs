//! Runtime settings
//!
//! ipcalc has no configuration file; the few knobs the front-end needs are
//! read from environment variables.

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Reverse lookup timeout in whole seconds
pub const DNS_TIMEOUT_VAR: &str = "IPCALC_DNS_TIMEOUT";

/// Set to `0` or `false` to ignore `/etc/resolv.conf`
pub const SYSTEM_RESOLVER_VAR: &str = "IPCALC_SYSTEM_RESOLVER";

const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value present but not understood
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings for the hostname lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Upper bound on a single reverse lookup
    pub dns_timeout: Duration,
    /// Use the host's resolver configuration instead of the built-in upstreams
    pub use_system_resolver: bool,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(DNS_TIMEOUT_VAR) {
            let secs: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: DNS_TIMEOUT_VAR,
                value: value.clone(),
                reason: "expected a number of seconds",
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: DNS_TIMEOUT_VAR,
                    value,
                    reason: "timeout must be positive",
                });
            }
            settings.dns_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup(SYSTEM_RESOLVER_VAR) {
            settings.use_system_resolver = parse_flag(&value).ok_or(ConfigError::InvalidValue {
                var: SYSTEM_RESOLVER_VAR,
                value,
                reason: "expected 1/0, true/false, yes/no or on/off",
            })?;
        }

        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dns_timeout: DEFAULT_DNS_TIMEOUT,
            use_system_resolver: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
