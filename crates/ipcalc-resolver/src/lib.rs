//! Reverse DNS lookups for ipcalc
//!
//! Finds the hostname registered for an address through a PTR query. The
//! calculator itself never talks to the network; the front-end calls into
//! this crate only when a hostname was asked for.
//!
//! # Examples
//!
//! ```no_run
//! use ipcalc_resolver::ReverseResolver;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = ReverseResolver::new();
//!     let name = resolver.lookup_hostname("8.8.8.8".parse()?).await?;
//!     println!("{}", name);
//!     Ok(())
//! }
//! ```

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use ipcalc_core::config::Settings;
use std::net::IpAddr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Reverse lookup errors
#[derive(Error, Debug)]
pub enum DnsError {
    /// No PTR record for the address
    #[error("cannot find hostname for {0}")]
    NotFound(IpAddr),

    /// DNS lookup failed
    #[error("DNS lookup failed: {0}")]
    LookupFailed(String),

    /// Timeout
    #[error("DNS query timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, DnsError>;

/// PTR resolver with a bounded wait
pub struct ReverseResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl ReverseResolver {
    /// Create a resolver with default settings
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    /// Create a resolver from runtime settings
    ///
    /// When the system configuration cannot be read the built-in upstream
    /// servers are used instead.
    pub fn from_settings(settings: &Settings) -> Self {
        let resolver = if settings.use_system_resolver {
            match TokioAsyncResolver::tokio_from_system_conf() {
                Ok(resolver) => resolver,
                Err(e) => {
                    warn!("system resolver configuration unavailable ({}), using defaults", e);
                    Self::default_resolver()
                }
            }
        } else {
            Self::default_resolver()
        };

        Self {
            resolver,
            timeout: settings.dns_timeout,
        }
    }

    fn default_resolver() -> TokioAsyncResolver {
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    }

    /// Time allowed for a single lookup
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Hostname registered for `ip`
    ///
    /// The first PTR record wins. Names are returned in lowercase without
    /// the trailing root dot.
    pub async fn lookup_hostname(&self, ip: IpAddr) -> Result<String> {
        debug!("reverse lookup for {}", ip);

        let lookup = tokio::time::timeout(self.timeout, self.resolver.reverse_lookup(ip))
            .await
            .map_err(|_| DnsError::Timeout(self.timeout))?
            .map_err(|e| {
                if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                    DnsError::NotFound(ip)
                } else {
                    DnsError::LookupFailed(e.to_string())
                }
            })?;

        let name = lookup
            .iter()
            .map(|ptr| normalize_hostname(&ptr.to_string()))
            .find(|name| !name.is_empty())
            .ok_or(DnsError::NotFound(ip))?;

        debug!("{} resolves to {}", ip, name);
        Ok(name)
    }
}

/// Lowercase a DNS name and strip the trailing root label
pub fn normalize_hostname(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hostname() {
        assert_eq!(normalize_hostname("Dns.Google."), "dns.google");
        assert_eq!(normalize_hostname("localhost"), "localhost");
        assert_eq!(normalize_hostname("."), "");
    }

    #[test]
    fn test_error_display() {
        let err = DnsError::NotFound("192.0.2.1".parse().unwrap());
        assert_eq!(err.to_string(), "cannot find hostname for 192.0.2.1");

        let err = DnsError::Timeout(Duration::from_secs(2));
        assert_eq!(err.to_string(), "DNS query timed out after 2s");
    }

    #[tokio::test]
    async fn test_resolver_creation() {
        let resolver = ReverseResolver::new();
        assert_eq!(resolver.timeout(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_resolver_uses_configured_timeout() {
        let settings = Settings {
            dns_timeout: Duration::from_secs(1),
            use_system_resolver: false,
        };
        let resolver = ReverseResolver::from_settings(&settings);
        assert_eq!(resolver.timeout(), Duration::from_secs(1));
    }
}
