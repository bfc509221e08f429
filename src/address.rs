//! IP address capability used by the authority parser and serializer.
//!
//! URI parsing needs three things from an IP library: parse a dotted IPv4
//! literal, parse the inside of a bracketed IPv6 literal, and format an
//! address back to text. [`AddressService`] names exactly that, so callers
//! can substitute their own implementation (tests use a stub). The default
//! [`StdAddressService`] is backed by `std::net`.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::AddressError;

/// Parses and formats IP addresses on behalf of the URI engine.
pub trait AddressService {
    /// Parses dotted-quad IPv4 text.
    ///
    /// # Errors
    ///
    /// Returns `AddressError` if `text` is not an IPv4 address. The authority
    /// parser treats this as "not an address" and falls back to a host name.
    fn parse_ipv4(&self, text: &str) -> Result<Ipv4Addr, AddressError>;

    /// Parses IPv6 text (without the surrounding brackets).
    ///
    /// # Errors
    ///
    /// Returns `AddressError` if `text` is not an IPv6 address. The error is
    /// surfaced to the caller of the URI parser.
    fn parse_ipv6(&self, text: &str) -> Result<Ipv6Addr, AddressError>;

    /// Writes the canonical text form of `addr` (IPv6 without brackets).
    ///
    /// # Errors
    ///
    /// Propagates errors from `out`.
    fn format(&self, addr: &IpAddr, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Returns true if both addresses are the same.
    fn equal(&self, a: &IpAddr, b: &IpAddr) -> bool {
        a == b
    }
}

/// [`AddressService`] backed by the standard library parsers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdAddressService;

impl AddressService for StdAddressService {
    fn parse_ipv4(&self, text: &str) -> Result<Ipv4Addr, AddressError> {
        text.parse().map_err(|_| AddressError {
            value: text.to_string(),
            reason: "invalid IPv4 address",
        })
    }

    fn parse_ipv6(&self, text: &str) -> Result<Ipv6Addr, AddressError> {
        text.parse().map_err(|_| AddressError {
            value: text.to_string(),
            reason: "invalid IPv6 address",
        })
    }

    fn format(&self, addr: &IpAddr, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{addr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ipv4() {
        let ip = StdAddressService.parse_ipv4("13.37.73.31").unwrap();
        assert_eq!(ip, Ipv4Addr::new(13, 37, 73, 31));
    }

    #[test]
    fn parse_ipv4_rejects_names() {
        assert!(StdAddressService.parse_ipv4("example").is_err());
        assert!(StdAddressService.parse_ipv4("1.2.3").is_err());
    }

    #[test]
    fn parse_ipv6_rejects_ipv4() {
        let err = StdAddressService.parse_ipv6("1.2.3.4").unwrap_err();
        assert_eq!(err.value, "1.2.3.4");
    }

    #[test]
    fn format_ipv6_is_compressed() {
        let ip = IpAddr::V6(StdAddressService.parse_ipv6("2001:db8:0:0:0:0:0:7").unwrap());
        let mut out = String::new();
        StdAddressService.format(&ip, &mut out).unwrap();
        assert_eq!(out, "2001:db8::7");
    }

    #[test]
    fn equal_compares_values() {
        let a = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let b: IpAddr = "127.0.0.1".parse().unwrap();
        assert!(StdAddressService.equal(&a, &b));
        assert!(!StdAddressService.equal(&a, &IpAddr::V6(Ipv6Addr::LOCALHOST)));
    }
}
