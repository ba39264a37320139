//! IPv6 network arithmetic
//!
//! All masking is done byte by byte over the 16-byte address.

use crate::format::expand_ipv6;
use crate::mask::prefix_to_mask_v6;
use crate::space::classify_ipv6;
use ipcalc_core::{AddressFamily, HostCount, NetworkInfo, Result};
use std::fmt;
use std::net::{IpAddr, Ipv6Addr};

/// An IPv6 address together with the network it sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Network {
    address: [u8; 16],
    network: [u8; 16],
    mask: [u8; 16],
    prefix_len: u8,
}

impl Ipv6Network {
    /// Create from an address and a prefix length in `1..=128`
    ///
    /// ```
    /// use ipcalc_cidr::Ipv6Network;
    ///
    /// let net = Ipv6Network::new("2001:db8::1".parse().unwrap(), 32).unwrap();
    /// assert_eq!(net.to_string(), "2001:db8::/32");
    /// ```
    pub fn new(address: Ipv6Addr, prefix_len: u8) -> Result<Self> {
        let mask = prefix_to_mask_v6(prefix_len)?.octets();
        let address = address.octets();

        let mut network = [0u8; 16];
        for (i, byte) in network.iter_mut().enumerate() {
            *byte = address[i] & mask[i];
        }

        Ok(Self {
            address,
            network,
            mask,
            prefix_len,
        })
    }

    /// The address the network was built from
    pub fn address(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.address)
    }

    pub fn network(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.network)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn mask(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.mask)
    }

    /// Lowest address; IPv6 reserves no network address
    pub fn host_min(&self) -> Ipv6Addr {
        self.network()
    }

    /// Highest address: the network with every host bit set
    ///
    /// IPv6 has no broadcast, so nothing is held back at the top either.
    pub fn host_max(&self) -> Ipv6Addr {
        if self.prefix_len == 128 {
            return self.network();
        }

        let mut max = self.network;
        for (i, byte) in max.iter_mut().enumerate() {
            *byte |= !self.mask[i];
        }
        Ipv6Addr::from(max)
    }

    /// Number of addresses, `2^(128 - prefix)`
    ///
    /// Counts that do not fit in 64 bits are reported as a power of two.
    pub fn host_count(&self) -> HostCount {
        let exp = 128 - self.prefix_len;
        if exp < 64 {
            HostCount::Exact(1u64 << exp)
        } else {
            HostCount::PowerOfTwo(exp)
        }
    }

    /// Full calculation result for this network
    pub fn info(&self) -> NetworkInfo {
        NetworkInfo {
            family: AddressFamily::V6,
            address: IpAddr::V6(self.address()),
            prefix: self.prefix_len,
            netmask: IpAddr::V6(self.mask()),
            network: IpAddr::V6(self.network()),
            broadcast: None,
            host_min: IpAddr::V6(self.host_min()),
            host_max: IpAddr::V6(self.host_max()),
            hosts: self.host_count(),
            address_space: classify_ipv6(self.network()),
            expanded_address: Some(expand_ipv6(self.address())),
            expanded_network: Some(expand_ipv6(self.network())),
        }
    }
}

impl fmt::Display for Ipv6Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(text: &str, prefix_len: u8) -> Ipv6Network {
        Ipv6Network::new(text.parse().unwrap(), prefix_len).unwrap()
    }

    fn addr(text: &str) -> Ipv6Addr {
        text.parse().unwrap()
    }

    #[test]
    fn test_network() {
        let n = net("2001:db8:abcd:12::1", 48);
        assert_eq!(n.network(), addr("2001:db8:abcd::"));
        assert_eq!(n.mask(), addr("ffff:ffff:ffff::"));
        assert_eq!(n.address(), addr("2001:db8:abcd:12::1"));
    }

    #[test]
    fn test_partial_byte_prefix() {
        let n = net("2001:db8:ffff::", 36);
        assert_eq!(n.network(), addr("2001:db8:f000::"));
        assert_eq!(n.host_max(), addr("2001:db8:ffff:ffff:ffff:ffff:ffff:ffff"));
    }

    #[test]
    fn test_host_range() {
        let n = net("fe80::1", 64);
        assert_eq!(n.host_min(), addr("fe80::"));
        assert_eq!(n.host_max(), addr("fe80::ffff:ffff:ffff:ffff"));
    }

    #[test]
    fn test_slash_128() {
        let n = net("2001:db8::5", 128);
        assert_eq!(n.host_min(), n.network());
        assert_eq!(n.host_max(), n.network());
        assert_eq!(n.host_count(), HostCount::Exact(1));
    }

    #[test]
    fn test_slash_127() {
        let n = net("2001:db8::5", 127);
        assert_eq!(n.host_min(), addr("2001:db8::4"));
        assert_eq!(n.host_max(), addr("2001:db8::5"));
        assert_eq!(n.host_count(), HostCount::Exact(2));
    }

    #[test]
    fn test_host_count() {
        assert_eq!(net("::1", 65).host_count(), HostCount::Exact(1 << 63));
        assert_eq!(net("::1", 64).host_count(), HostCount::PowerOfTwo(64));
        assert_eq!(net("::1", 1).host_count(), HostCount::PowerOfTwo(127));
    }

    #[test]
    fn test_zero_prefix_rejected() {
        assert!(Ipv6Network::new(Ipv6Addr::UNSPECIFIED, 0).is_err());
    }

    #[test]
    fn test_info() {
        let info = net("2001:db8::1", 64).info();
        assert_eq!(info.broadcast, None);
        assert_eq!(
            info.expanded_network.as_deref(),
            Some("2001:0db8:0000:0000:0000:0000:0000:0000")
        );
        assert_eq!(
            info.expanded_address.as_deref(),
            Some("2001:0db8:0000:0000:0000:0000:0000:0001")
        );
    }
}
