//! Prefix, netmask and address-space calculations
//!
//! Derives everything ipcalc reports from an address and a prefix:
//! - Parse loose input (`172/8`, `10.0.0.1/255.0.0.0`, `2001:db8::/32`)
//! - Convert between prefix lengths and netmasks
//! - Network, broadcast and usable host range
//! - IANA special-purpose address classification
//!
//! # Examples
//!
//! ```
//! use ipcalc_cidr::compute_ipv4;
//!
//! let info = compute_ipv4("192.168.1.10", Some("24")).unwrap();
//! assert_eq!(info.network.to_string(), "192.168.1.0");
//! assert_eq!(info.broadcast.unwrap().to_string(), "192.168.1.255");
//! assert_eq!(info.address_space.label(), "Private Use");
//! ```

pub mod format;
pub mod mask;
pub mod parse;
pub mod space;
pub mod v4;
pub mod v6;

pub use mask::{classful_netmask, mask_text_to_prefix, prefix_to_mask_text};
pub use space::{classify_ipv4, classify_ipv6};
pub use v4::Ipv4Network;
pub use v6::Ipv6Network;

use ipcalc_core::{AddressFamily, NetworkInfo, Result};
use tracing::debug;

/// Calculate an IPv4 network
///
/// `address_text` may carry its own `/prefix` or `/netmask`; alternatively
/// the prefix or netmask comes in `prefix_or_mask`. Giving both is an error.
/// Without either, the address is treated as a single host.
pub fn compute_ipv4(address_text: &str, prefix_or_mask: Option<&str>) -> Result<NetworkInfo> {
    let (address, prefix) = parse::parse_ipv4(address_text, prefix_or_mask)?;
    let network = Ipv4Network::new(address, prefix)?;
    debug!("{} is in {}", address, network);
    Ok(network.info())
}

/// Calculate an IPv6 network
///
/// The prefix must be in `1..=128`; without one the address is a single host.
///
/// ```
/// use ipcalc_cidr::compute_ipv6;
///
/// let info = compute_ipv6("fe80::1/64", None).unwrap();
/// assert_eq!(info.host_max.to_string(), "fe80::ffff:ffff:ffff:ffff");
/// assert!(compute_ipv6("::/0", None).is_err());
/// ```
pub fn compute_ipv6(address_text: &str, prefix_text: Option<&str>) -> Result<NetworkInfo> {
    let (address, prefix) = parse::parse_ipv6(address_text, prefix_text)?;
    let network = Ipv6Network::new(address, prefix)?;
    debug!("{} is in {}", address, network);
    Ok(network.info())
}

/// Calculate a network of either family, picked from the address text
pub fn compute(address_text: &str, prefix_or_mask: Option<&str>) -> Result<NetworkInfo> {
    match AddressFamily::detect(address_text) {
        AddressFamily::V4 => compute_ipv4(address_text, prefix_or_mask),
        AddressFamily::V6 => compute_ipv6(address_text, prefix_or_mask),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipcalc_core::{AddressSpace, CalcError, HostCount};

    #[test]
    fn test_compute_dispatches_on_family() {
        assert_eq!(compute("10.0.0.1/8", None).unwrap().family, AddressFamily::V4);
        assert_eq!(compute("::1", None).unwrap().family, AddressFamily::V6);
    }

    #[test]
    fn test_compute_ipv4_full_record() {
        let info = compute_ipv4("192.168.1.10", Some("24")).unwrap();
        assert_eq!(info.address.to_string(), "192.168.1.10");
        assert_eq!(info.prefix, 24);
        assert_eq!(info.netmask.to_string(), "255.255.255.0");
        assert_eq!(info.network.to_string(), "192.168.1.0");
        assert_eq!(info.broadcast.map(|b| b.to_string()).as_deref(), Some("192.168.1.255"));
        assert_eq!(info.host_min.to_string(), "192.168.1.1");
        assert_eq!(info.host_max.to_string(), "192.168.1.254");
        assert_eq!(info.hosts, HostCount::Exact(254));
        assert_eq!(info.address_space, AddressSpace::PrivateUse);
    }

    #[test]
    fn test_compute_ipv6_defaults_to_single_host() {
        let info = compute_ipv6("2001:db8::7", None).unwrap();
        assert_eq!(info.prefix, 128);
        assert!(info.is_single_host());
        assert_eq!(info.host_min, info.network);
        assert_eq!(info.host_max, info.network);
    }

    #[test]
    fn test_compute_errors() {
        assert!(matches!(compute("10.0.0.256", None), Err(CalcError::InvalidAddress { .. })));
        assert!(matches!(compute("10.0.0.1/40", None), Err(CalcError::InvalidPrefix(_))));
        assert!(matches!(compute("::1/0", None), Err(CalcError::InvalidPrefix(_))));
    }
}
