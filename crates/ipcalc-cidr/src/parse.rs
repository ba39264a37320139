//! Turning loosely formatted input into an address and a prefix

use crate::mask::mask_text_to_prefix;
use ipcalc_core::{AddressFamily, CalcError, Result};
use std::borrow::Cow;
use std::net::{Ipv4Addr, Ipv6Addr};
use tracing::debug;

/// Split `addr/prefix` at the first `/`
pub fn split_prefix(text: &str) -> (&str, Option<&str>) {
    match text.split_once('/') {
        Some((address, prefix)) => (address, Some(prefix)),
        None => (text, None),
    }
}

/// Re-inflate CIDR shorthand such as `172` or `172.16` to four octets
///
/// Trailing zero octets are appended until the address has three dots.
///
/// ```
/// use ipcalc_cidr::parse::expand_shorthand;
///
/// assert_eq!(expand_shorthand("172"), "172.0.0.0");
/// assert_eq!(expand_shorthand("172.16"), "172.16.0.0");
/// assert_eq!(expand_shorthand("10.1.2.3"), "10.1.2.3");
/// ```
pub fn expand_shorthand(address: &str) -> Cow<'_, str> {
    let dots = address.matches('.').count();
    if dots >= 3 {
        return Cow::Borrowed(address);
    }

    let mut padded = String::with_capacity(address.len() + 2 * (3 - dots));
    padded.push_str(address);
    for _ in dots..3 {
        padded.push_str(".0");
    }
    debug!("expanded shorthand address {} to {}", address, padded);
    Cow::Owned(padded)
}

/// Parse IPv4 input: `addr`, `addr/prefix`, `addr/netmask`, or `addr` plus
/// a separate netmask argument
///
/// Without any prefix the address is taken as a single host (`/32`).
pub fn parse_ipv4(text: &str, netmask: Option<&str>) -> Result<(Ipv4Addr, u8)> {
    let (address_text, inline) = split_prefix(text);
    let prefix_text = merge_prefix(inline, netmask)?;

    let address_text = match prefix_text {
        Some(_) => expand_shorthand(address_text),
        None => Cow::Borrowed(address_text),
    };

    let address: Ipv4Addr = address_text
        .parse()
        .map_err(|_| CalcError::invalid_address(AddressFamily::V4, &address_text))?;

    let prefix = match prefix_text {
        Some(prefix_text) => parse_ipv4_prefix(prefix_text)?,
        None => 32,
    };

    Ok((address, prefix))
}

/// Parse IPv6 input: `addr` or `addr/prefix`
///
/// `/0` is refused; a missing prefix means a single host (`/128`).
pub fn parse_ipv6(text: &str, prefix: Option<&str>) -> Result<(Ipv6Addr, u8)> {
    let (address_text, inline) = split_prefix(text);
    let prefix_text = merge_prefix(inline, prefix)?;

    let address: Ipv6Addr = address_text
        .parse()
        .map_err(|_| CalcError::invalid_address(AddressFamily::V6, address_text))?;

    let prefix = match prefix_text {
        Some(prefix_text) => match parse_decimal(prefix_text) {
            Some(prefix @ 1..=128) => prefix,
            _ => return Err(CalcError::InvalidPrefix(prefix_text.to_string())),
        },
        None => 128,
    };

    Ok((address, prefix))
}

/// Prefix text as a length: dotted netmask or decimal integer in `0..=32`
fn parse_ipv4_prefix(text: &str) -> Result<u8> {
    if text.contains('.') {
        return mask_text_to_prefix(text, AddressFamily::V4)
            .map_err(|_| CalcError::InvalidPrefix(text.to_string()));
    }

    match parse_decimal(text) {
        Some(prefix @ 0..=32) => Ok(prefix),
        _ => Err(CalcError::InvalidPrefix(text.to_string())),
    }
}

fn parse_decimal(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn merge_prefix<'a>(inline: Option<&'a str>, separate: Option<&'a str>) -> Result<Option<&'a str>> {
    match (inline, separate) {
        (Some(inline), Some(separate)) => Err(CalcError::InvalidPrefix(format!(
            "both /{} and {} specified",
            inline, separate
        ))),
        (inline, separate) => Ok(inline.or(separate)),
    }
}
