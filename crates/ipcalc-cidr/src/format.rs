//! Textual forms of addresses

use std::net::Ipv6Addr;

/// Uncompressed IPv6 form: eight groups of four lowercase hex digits
///
/// ```
/// use ipcalc_cidr::format::expand_ipv6;
///
/// let addr = "2001:db8::1".parse().unwrap();
/// assert_eq!(expand_ipv6(addr), "2001:0db8:0000:0000:0000:0000:0000:0001");
/// ```
pub fn expand_ipv6(addr: Ipv6Addr) -> String {
    let mut out = String::with_capacity(39);
    for (i, byte) in addr.octets().iter().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(':');
        }
        out.push(hex_digit(byte >> 4));
        out.push(hex_digit(byte & 0x0f));
    }
    out
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap_or('0')
}
