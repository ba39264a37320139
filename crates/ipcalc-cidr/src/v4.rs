//! IPv4 network arithmetic

use crate::mask::mask_bits_v4;
use crate::space::classify_ipv4;
use ipcalc_core::{AddressFamily, CalcError, HostCount, NetworkInfo, Result};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// An IPv4 address together with the network it sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Network {
    /// Address as given
    address: u32,
    /// Network address (address & mask)
    network: u32,
    /// Prefix length (0-32)
    prefix_len: u8,
    /// Network mask
    mask: u32,
}

impl Ipv4Network {
    /// Create from an address and prefix length
    ///
    /// # Examples
    ///
    /// ```
    /// use ipcalc_cidr::Ipv4Network;
    /// use std::net::Ipv4Addr;
    ///
    /// let net = Ipv4Network::new(Ipv4Addr::new(192, 168, 1, 10), 24).unwrap();
    /// assert_eq!(net.network(), Ipv4Addr::new(192, 168, 1, 0));
    /// assert_eq!(net.broadcast(), Ipv4Addr::new(192, 168, 1, 255));
    /// ```
    pub fn new(address: Ipv4Addr, prefix_len: u8) -> Result<Self> {
        if prefix_len > 32 {
            return Err(CalcError::InvalidPrefix(prefix_len.to_string()));
        }

        let address = u32::from(address);
        let mask = mask_bits_v4(prefix_len);

        Ok(Self {
            address,
            network: address & mask,
            prefix_len,
            mask,
        })
    }

    /// The address the network was built from
    pub fn address(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.address)
    }

    /// Get network address
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    /// Get prefix length
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Get network mask
    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask)
    }

    /// Get broadcast address
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.broadcast_bits())
    }

    /// Lowest usable host address
    ///
    /// `/31` links (RFC 3021) and `/32` hosts have no reserved network
    /// address, so the network itself is returned.
    pub fn host_min(&self) -> Ipv4Addr {
        if self.prefix_len >= 31 {
            Ipv4Addr::from(self.network)
        } else {
            Ipv4Addr::from(self.network + 1)
        }
    }

    /// Highest usable host address
    pub fn host_max(&self) -> Ipv4Addr {
        match self.prefix_len {
            32 => Ipv4Addr::from(self.network),
            31 => Ipv4Addr::from(self.broadcast_bits()),
            _ => Ipv4Addr::from(self.broadcast_bits() - 1),
        }
    }

    /// Number of usable host addresses
    pub fn host_count(&self) -> u64 {
        let size = 1u64 << (32 - u32::from(self.prefix_len));
        if self.prefix_len >= 31 {
            size
        } else {
            size - 2
        }
    }

    /// Full calculation result for this network
    pub fn info(&self) -> NetworkInfo {
        NetworkInfo {
            family: AddressFamily::V4,
            address: IpAddr::V4(self.address()),
            prefix: self.prefix_len,
            netmask: IpAddr::V4(self.mask()),
            network: IpAddr::V4(self.network()),
            broadcast: Some(IpAddr::V4(self.broadcast())),
            host_min: IpAddr::V4(self.host_min()),
            host_max: IpAddr::V4(self.host_max()),
            hosts: HostCount::Exact(self.host_count()),
            address_space: classify_ipv4(self.network()),
            expanded_address: None,
            expanded_network: None,
        }
    }

    fn broadcast_bits(&self) -> u32 {
        self.network | !self.mask
    }
}

impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_len)
    }
}
