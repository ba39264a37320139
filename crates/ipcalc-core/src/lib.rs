//! Core types and errors for ipcalc
//!
//! This crate provides the types shared by the calculator, the resolver and
//! the command line front-end:
//! - [`AddressFamily`] - IPv4 or IPv6
//! - [`AddressSpace`] - IANA special-purpose classification
//! - [`HostCount`] - number of addresses in a network
//! - [`NetworkInfo`] - the complete result of a calculation
//! - [`CalcError`] - error types
//!
//! ```
//! use ipcalc_core::{AddressFamily, AddressSpace};
//!
//! assert_eq!(AddressFamily::detect("fe80::1"), AddressFamily::V6);
//! assert_eq!(AddressSpace::PrivateUse.to_string(), "Private Use");
//! ```

use serde::{Serialize, Serializer};
use std::fmt;
use std::net::IpAddr;
use thiserror::Error;

pub mod config;

/// Internet address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AddressFamily {
    /// 32-bit addresses
    #[serde(rename = "IPv4")]
    V4,
    /// 128-bit addresses
    #[serde(rename = "IPv6")]
    V6,
}

impl AddressFamily {
    /// Guess the family of a textual address.
    ///
    /// Anything containing a `:` is treated as IPv6, everything else as IPv4.
    pub fn detect(text: &str) -> Self {
        if text.contains(':') {
            AddressFamily::V6
        } else {
            AddressFamily::V4
        }
    }

    /// Number of bits in an address of this family
    pub fn max_prefix(self) -> u8 {
        match self {
            AddressFamily::V4 => 32,
            AddressFamily::V6 => 128,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => f.write_str("IPv4"),
            AddressFamily::V6 => f.write_str("IPv6"),
        }
    }
}

/// Address space a network belongs to
///
/// Labels follow the IANA IPv4 and IPv6 special-purpose address registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressSpace {
    ThisHostOnThisNetwork,
    PrivateUse,
    SharedAddressSpace,
    Loopback,
    LinkLocal,
    IetfProtocolAssignments,
    TestNet1,
    TestNet2,
    TestNet3,
    SixToFourRelayAnycast,
    Amt,
    LimitedBroadcast,
    Benchmarking,
    Multicast,
    Reserved,
    /// Catch-all for IPv4 addresses outside every special range
    Internet,
    LoopbackAddress,
    UnspecifiedAddress,
    Ipv4Mapped,
    Ipv4Ipv6Translation,
    DiscardOnly,
    SixToFour,
    GlobalUnicast,
    UniqueLocalUnicast,
    LinkScopedUnicast,
}

impl AddressSpace {
    /// Human readable label, as printed by the `ADDRSPACE` output
    pub fn label(self) -> &'static str {
        match self {
            AddressSpace::ThisHostOnThisNetwork => "This host on this network",
            AddressSpace::PrivateUse => "Private Use",
            AddressSpace::SharedAddressSpace => "Shared Address Space",
            AddressSpace::Loopback => "Loopback",
            AddressSpace::LinkLocal => "Link Local",
            AddressSpace::IetfProtocolAssignments => "IETF Protocol Assignments",
            AddressSpace::TestNet1 => "Documentation (TEST-NET-1)",
            AddressSpace::TestNet2 => "Documentation (TEST-NET-2)",
            AddressSpace::TestNet3 => "Documentation (TEST-NET-3)",
            AddressSpace::SixToFourRelayAnycast => "6 to 4 Relay Anycast (Deprecated)",
            AddressSpace::Amt => "AMT",
            AddressSpace::LimitedBroadcast => "Limited Broadcast",
            AddressSpace::Benchmarking => "Benchmarking",
            AddressSpace::Multicast => "Multicast",
            AddressSpace::Reserved => "Reserved",
            AddressSpace::Internet => "Internet or Reserved for Future use",
            AddressSpace::LoopbackAddress => "Loopback Address",
            AddressSpace::UnspecifiedAddress => "Unspecified Address",
            AddressSpace::Ipv4Mapped => "IPv4-mapped Address",
            AddressSpace::Ipv4Ipv6Translation => "IPv4-IPv6 Translat.",
            AddressSpace::DiscardOnly => "Discard-Only Address Block",
            AddressSpace::SixToFour => "6to4",
            AddressSpace::GlobalUnicast => "Global Unicast",
            AddressSpace::UniqueLocalUnicast => "Unique Local Unicast",
            AddressSpace::LinkScopedUnicast => "Link-Scoped Unicast",
        }
    }
}

impl fmt::Display for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AddressSpace {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Number of host addresses in a network
///
/// IPv6 networks quickly outgrow any integer type, so large counts are kept
/// as a power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCount {
    /// Exact number of addresses
    Exact(u64),
    /// `2^n` addresses
    PowerOfTwo(u8),
}

impl fmt::Display for HostCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostCount::Exact(n) => write!(f, "{}", n),
            HostCount::PowerOfTwo(exp) => write!(f, "2^({})", exp),
        }
    }
}

impl Serialize for HostCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            HostCount::Exact(n) => serializer.serialize_u64(*n),
            HostCount::PowerOfTwo(_) => serializer.collect_str(self),
        }
    }
}

/// Everything ipcalc derives from an address and a prefix
///
/// Instances are only produced by the calculator, fully populated; a failed
/// calculation yields a [`CalcError`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    /// Address family of every address below
    pub family: AddressFamily,
    /// The address as given (after CIDR shorthand expansion)
    pub address: IpAddr,
    /// Prefix length
    pub prefix: u8,
    /// Netmask derived from the prefix
    pub netmask: IpAddr,
    /// Network address
    pub network: IpAddr,
    /// Broadcast address, IPv4 only
    pub broadcast: Option<IpAddr>,
    /// Lowest usable host address
    pub host_min: IpAddr,
    /// Highest usable host address
    pub host_max: IpAddr,
    /// Number of usable host addresses
    pub hosts: HostCount,
    /// Classification of the network address
    pub address_space: AddressSpace,
    /// Uncompressed form of `address`, IPv6 only
    pub expanded_address: Option<String>,
    /// Uncompressed form of `network`, IPv6 only
    pub expanded_network: Option<String>,
}

impl NetworkInfo {
    /// True when the prefix covers the whole address (`/32` or `/128`)
    pub fn is_single_host(&self) -> bool {
        self.prefix == self.family.max_prefix()
    }
}

/// Error types for ipcalc calculations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Malformed address text for the family
    #[error("bad {family} address: {text}")]
    InvalidAddress { family: AddressFamily, text: String },

    /// Malformed or out of range prefix
    #[error("bad prefix: {0}")]
    InvalidPrefix(String),

    /// Netmask that does not describe a prefix
    #[error("bad netmask: {0}")]
    InvalidMask(String),
}

impl CalcError {
    /// Shorthand for [`CalcError::InvalidAddress`]
    pub fn invalid_address(family: AddressFamily, text: &str) -> Self {
        CalcError::InvalidAddress {
            family,
            text: text.to_string(),
        }
    }
}

/// Result type alias for ipcalc operations
pub type Result<T> = std::result::Result<T, CalcError>;
