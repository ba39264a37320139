//! Address-space classification
//!
//! Ordered tables derived from the IANA special-purpose address registries.
//! Lookups walk the table top to bottom and the first matching range wins,
//! so narrower ranges sit above the ranges that enclose them.

use crate::mask::{mask_bits_v4, mask_bits_v6};
use ipcalc_core::AddressSpace;
use std::net::{Ipv4Addr, Ipv6Addr};

struct SpaceV4 {
    base: u32,
    prefix_len: u8,
    space: AddressSpace,
}

struct SpaceV6 {
    base: u128,
    prefix_len: u8,
    space: AddressSpace,
}

const fn v4(octets: [u8; 4], prefix_len: u8, space: AddressSpace) -> SpaceV4 {
    SpaceV4 {
        base: u32::from_be_bytes(octets),
        prefix_len,
        space,
    }
}

const fn v6(base: u128, prefix_len: u8, space: AddressSpace) -> SpaceV6 {
    SpaceV6 {
        base,
        prefix_len,
        space,
    }
}

const IPV4_SPACES: &[SpaceV4] = &[
    v4([0, 0, 0, 0], 8, AddressSpace::ThisHostOnThisNetwork),
    v4([10, 0, 0, 0], 8, AddressSpace::PrivateUse),
    v4([100, 64, 0, 0], 10, AddressSpace::SharedAddressSpace),
    v4([127, 0, 0, 0], 8, AddressSpace::Loopback),
    v4([169, 254, 0, 0], 16, AddressSpace::LinkLocal),
    v4([172, 16, 0, 0], 12, AddressSpace::PrivateUse),
    v4([192, 0, 0, 0], 24, AddressSpace::IetfProtocolAssignments),
    v4([192, 0, 2, 0], 24, AddressSpace::TestNet1),
    v4([198, 51, 100, 0], 24, AddressSpace::TestNet2),
    v4([203, 0, 113, 0], 24, AddressSpace::TestNet3),
    v4([192, 88, 99, 0], 24, AddressSpace::SixToFourRelayAnycast),
    v4([192, 52, 193, 0], 24, AddressSpace::Amt),
    v4([192, 168, 0, 0], 16, AddressSpace::PrivateUse),
    v4([255, 255, 255, 255], 32, AddressSpace::LimitedBroadcast),
    v4([198, 18, 0, 0], 15, AddressSpace::Benchmarking),
    v4([224, 0, 0, 0], 4, AddressSpace::Multicast),
    v4([240, 0, 0, 0], 4, AddressSpace::Reserved),
];

const IPV6_SPACES: &[SpaceV6] = &[
    v6(0x1, 128, AddressSpace::LoopbackAddress),
    v6(0x0, 128, AddressSpace::UnspecifiedAddress),
    v6(0xffff_0000_0000, 96, AddressSpace::Ipv4Mapped),
    v6(0x0064_ff9b << 96, 96, AddressSpace::Ipv4Ipv6Translation),
    v6(0x0100 << 112, 64, AddressSpace::DiscardOnly),
    v6(0x2001 << 112, 23, AddressSpace::IetfProtocolAssignments),
    v6(0x2002 << 112, 16, AddressSpace::SixToFour),
    v6(0x2000 << 112, 3, AddressSpace::GlobalUnicast),
    v6(0xfc00 << 112, 7, AddressSpace::UniqueLocalUnicast),
    v6(0xfe80 << 112, 10, AddressSpace::LinkScopedUnicast),
    v6(0xff00 << 112, 8, AddressSpace::Multicast),
];

/// Address space of an IPv4 network address
///
/// ```
/// use ipcalc_cidr::classify_ipv4;
/// use ipcalc_core::AddressSpace;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(classify_ipv4(Ipv4Addr::new(10, 0, 0, 0)), AddressSpace::PrivateUse);
/// assert_eq!(classify_ipv4(Ipv4Addr::new(8, 8, 8, 0)), AddressSpace::Internet);
/// ```
pub fn classify_ipv4(network: Ipv4Addr) -> AddressSpace {
    let bits = u32::from(network);
    IPV4_SPACES
        .iter()
        .find(|range| bits & mask_bits_v4(range.prefix_len) == range.base)
        .map_or(AddressSpace::Internet, |range| range.space)
}

/// Address space of an IPv6 network address
pub fn classify_ipv6(network: Ipv6Addr) -> AddressSpace {
    let bits = u128::from(network);
    IPV6_SPACES
        .iter()
        .find(|range| bits & mask_bits_v6(range.prefix_len) == range.base)
        .map_or(AddressSpace::Reserved, |range| range.space)
}
