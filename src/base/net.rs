//! Networking-related types.
//!
//! The address type is the one from `core::net`, re-exported here so
//! the rest of the crate has a single place to take it from. In addition,
//! the module provides [`inet_aton`], the strict dotted-decimal parser used
//! to short-circuit name resolution for address literals.

use core::fmt;

pub use core::net::Ipv4Addr;

//------------ inet_aton -----------------------------------------------------

/// Returns whether `s` looks like an IPv4 address literal.
///
/// This is the case if the string is not empty and consists of nothing but
/// ASCII digits and dots. Such a string is never handed to the DNS: it is
/// either a valid literal or an error.
pub fn is_address_literal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|ch| ch == b'.' || ch.is_ascii_digit())
}

/// Converts a dotted-decimal IPv4 address literal into an address.
///
/// Up to four decimal segments separated by dots are accepted. Segments
/// missing at the end are taken as zero, so `"10.1"` is `10.1.0.0`. The
/// conversion fails if the string contains anything but digits and dots,
/// if a segment is empty or larger than 255, or if there are more than four
/// segments.
pub fn inet_aton(s: &str) -> Result<Ipv4Addr, AddrParseError> {
    if !is_address_literal(s) {
        return Err(AddrParseError(()));
    }
    let mut octets = [0u8; 4];
    for (idx, segment) in s.split('.').enumerate() {
        let slot = octets.get_mut(idx).ok_or(AddrParseError(()))?;
        if segment.is_empty() {
            return Err(AddrParseError(()));
        }
        let mut value = 0u16;
        for ch in segment.bytes() {
            value = value * 10 + u16::from(ch - b'0');
            if value > 255 {
                return Err(AddrParseError(()));
            }
        }
        *slot = value as u8;
    }
    Ok(octets.into())
}

//------------ AddrParseError ------------------------------------------------

/// A string was not a valid dotted-decimal IPv4 address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AddrParseError(());

impl fmt::Display for AddrParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("invalid IPv4 address literal")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AddrParseError {}

//============ Testing =======================================================
