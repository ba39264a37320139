//! Conversions between prefix lengths and netmasks

use ipcalc_core::{AddressFamily, CalcError, Result};
use std::net::{Ipv4Addr, Ipv6Addr};

/// IPv4 netmask with the top `prefix_len` bits set
///
/// `/0` yields `0.0.0.0`.
pub fn prefix_to_mask_v4(prefix_len: u8) -> Result<Ipv4Addr> {
    if prefix_len > 32 {
        return Err(CalcError::InvalidPrefix(prefix_len.to_string()));
    }
    Ok(Ipv4Addr::from(mask_bits_v4(prefix_len)))
}

/// IPv6 netmask with the top `prefix_len` bits set
///
/// Built a byte at a time: whole `0xff` bytes, one partial byte, then zeros.
/// `/0` is not a valid IPv6 prefix here.
pub fn prefix_to_mask_v6(prefix_len: u8) -> Result<Ipv6Addr> {
    if prefix_len == 0 || prefix_len > 128 {
        return Err(CalcError::InvalidPrefix(prefix_len.to_string()));
    }

    let mut octets = [0u8; 16];
    let mut remaining = prefix_len;
    for byte in octets.iter_mut() {
        if remaining >= 8 {
            *byte = 0xff;
            remaining -= 8;
        } else {
            *byte = !(0xffu8 >> remaining);
            break;
        }
    }

    Ok(Ipv6Addr::from(octets))
}

/// Prefix length described by an IPv4 netmask
///
/// The mask must be a non-empty run of ones starting at the most significant
/// bit. `0.0.0.0` is rejected; a `/0` has to be spelled as a prefix.
pub fn mask_to_prefix_v4(mask: Ipv4Addr) -> Result<u8> {
    let bits = u32::from(mask);
    let prefix = bits.leading_ones();
    if prefix == 0 || bits.checked_shl(prefix).unwrap_or(0) != 0 {
        return Err(CalcError::InvalidMask(mask.to_string()));
    }
    Ok(prefix as u8)
}

/// Prefix length described by an IPv6 netmask
pub fn mask_to_prefix_v6(mask: Ipv6Addr) -> Result<u8> {
    let bits = u128::from(mask);
    let prefix = bits.leading_ones();
    if prefix == 0 || bits.checked_shl(prefix).unwrap_or(0) != 0 {
        return Err(CalcError::InvalidMask(mask.to_string()));
    }
    Ok(prefix as u8)
}

/// Netmask for `prefix_len` in the family's textual form
///
/// ```
/// use ipcalc_cidr::prefix_to_mask_text;
/// use ipcalc_core::AddressFamily;
///
/// assert_eq!(prefix_to_mask_text(20, AddressFamily::V4).unwrap(), "255.255.240.0");
/// assert_eq!(prefix_to_mask_text(48, AddressFamily::V6).unwrap(), "ffff:ffff:ffff::");
/// ```
pub fn prefix_to_mask_text(prefix_len: u8, family: AddressFamily) -> Result<String> {
    match family {
        AddressFamily::V4 => prefix_to_mask_v4(prefix_len).map(|m| m.to_string()),
        AddressFamily::V6 => prefix_to_mask_v6(prefix_len).map(|m| m.to_string()),
    }
}

/// Prefix length of a textual netmask
pub fn mask_text_to_prefix(mask_text: &str, family: AddressFamily) -> Result<u8> {
    let invalid = || CalcError::InvalidMask(mask_text.to_string());
    match family {
        AddressFamily::V4 => {
            let mask: Ipv4Addr = mask_text.parse().map_err(|_| invalid())?;
            mask_to_prefix_v4(mask).map_err(|_| invalid())
        }
        AddressFamily::V6 => {
            let mask: Ipv6Addr = mask_text.parse().map_err(|_| invalid())?;
            mask_to_prefix_v6(mask).map_err(|_| invalid())
        }
    }
}

/// Pre-CIDR class A/B/C netmask for an address
pub fn classful_netmask(addr: Ipv4Addr) -> Ipv4Addr {
    match addr.octets()[0] {
        0..=127 => Ipv4Addr::new(255, 0, 0, 0),
        128..=191 => Ipv4Addr::new(255, 255, 0, 0),
        _ => Ipv4Addr::new(255, 255, 255, 0),
    }
}

pub(crate) fn mask_bits_v4(prefix_len: u8) -> u32 {
    u32::MAX.checked_shl(32 - u32::from(prefix_len)).unwrap_or(0)
}

pub(crate) fn mask_bits_v6(prefix_len: u8) -> u128 {
    u128::MAX.checked_shl(128 - u32::from(prefix_len)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_to_mask_v4() {
        assert_eq!(prefix_to_mask_v4(0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(prefix_to_mask_v4(8).unwrap(), Ipv4Addr::new(255, 0, 0, 0));
        assert_eq!(prefix_to_mask_v4(23).unwrap(), Ipv4Addr::new(255, 255, 254, 0));
        assert_eq!(prefix_to_mask_v4(32).unwrap(), Ipv4Addr::BROADCAST);
        assert!(prefix_to_mask_v4(33).is_err());
    }

    #[test]
    fn test_prefix_to_mask_v6() {
        assert_eq!(
            prefix_to_mask_v6(64).unwrap(),
            "ffff:ffff:ffff:ffff::".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(
            prefix_to_mask_v6(12).unwrap(),
            "fff0::".parse::<Ipv6Addr>().unwrap()
        );
        assert_eq!(prefix_to_mask_v6(128).unwrap(), Ipv6Addr::from(u128::MAX));
        assert!(prefix_to_mask_v6(0).is_err());
        assert!(prefix_to_mask_v6(129).is_err());
    }

    #[test]
    fn test_byte_mask_matches_bit_mask() {
        for prefix in 1..=128u8 {
            let mask = prefix_to_mask_v6(prefix).unwrap();
            assert_eq!(u128::from(mask), mask_bits_v6(prefix), "/{}", prefix);
        }
    }

    #[test]
    fn test_mask_to_prefix_v4() {
        assert_eq!(mask_to_prefix_v4(Ipv4Addr::new(255, 255, 255, 0)).unwrap(), 24);
        assert_eq!(mask_to_prefix_v4(Ipv4Addr::new(255, 255, 255, 255)).unwrap(), 32);
        assert_eq!(mask_to_prefix_v4(Ipv4Addr::new(128, 0, 0, 0)).unwrap(), 1);
    }

    #[test]
    fn test_mask_to_prefix_rejects_holes() {
        assert!(matches!(
            mask_to_prefix_v4(Ipv4Addr::new(255, 0, 255, 0)),
            Err(CalcError::InvalidMask(_))
        ));
        assert!(mask_to_prefix_v4(Ipv4Addr::new(0, 0, 0, 255)).is_err());
        assert!(mask_to_prefix_v6("ffff::1".parse().unwrap()).is_err());
    }

    #[test]
    fn test_mask_to_prefix_rejects_zero() {
        assert!(mask_to_prefix_v4(Ipv4Addr::UNSPECIFIED).is_err());
        assert!(mask_to_prefix_v6(Ipv6Addr::UNSPECIFIED).is_err());
    }

    #[test]
    fn test_round_trip_v4() {
        for prefix in 1..=32u8 {
            let mask = prefix_to_mask_v4(prefix).unwrap();
            assert_eq!(mask_to_prefix_v4(mask).unwrap(), prefix);
        }
    }

    #[test]
    fn test_round_trip_v6() {
        for prefix in 1..=128u8 {
            let mask = prefix_to_mask_v6(prefix).unwrap();
            assert_eq!(mask_to_prefix_v6(mask).unwrap(), prefix);
        }
    }

    #[test]
    fn test_mask_text() {
        assert_eq!(mask_text_to_prefix("255.255.255.128", AddressFamily::V4).unwrap(), 25);
        assert_eq!(mask_text_to_prefix("ffff:ffff::", AddressFamily::V6).unwrap(), 32);
        assert_eq!(
            mask_text_to_prefix("255.255.0", AddressFamily::V4),
            Err(CalcError::InvalidMask("255.255.0".to_string()))
        );
        assert_eq!(
            mask_text_to_prefix("255.0.255.0", AddressFamily::V4),
            Err(CalcError::InvalidMask("255.0.255.0".to_string()))
        );
        assert_eq!(prefix_to_mask_text(0, AddressFamily::V4).unwrap(), "0.0.0.0");
        assert!(prefix_to_mask_text(0, AddressFamily::V6).is_err());
    }

    #[test]
    fn test_classful_netmask() {
        assert_eq!(classful_netmask(Ipv4Addr::new(10, 1, 2, 3)), Ipv4Addr::new(255, 0, 0, 0));
        assert_eq!(classful_netmask(Ipv4Addr::new(127, 0, 0, 1)), Ipv4Addr::new(255, 0, 0, 0));
        assert_eq!(classful_netmask(Ipv4Addr::new(172, 16, 0, 1)), Ipv4Addr::new(255, 255, 0, 0));
        assert_eq!(classful_netmask(Ipv4Addr::new(192, 168, 0, 1)), Ipv4Addr::new(255, 255, 255, 0));
    }
}
