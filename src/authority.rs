//! Authority (`userinfo@host:port`) parsing.
//!
//! # Grammar Reference
//!
//! ```abnf
//! authority   = [ userinfo "@" ] host [ ":" port ]
//! userinfo    = *( unreserved / pct-encoded / sub-delims / ":" )
//! host        = IP-literal / IPv4address / reg-name
//! IP-literal  = "[" IPv6address "]"
//! reg-name    = *( unreserved / pct-encoded / sub-delims )
//! port        = *DIGIT
//! ```

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::address::{AddressService, StdAddressService};
use crate::error::AuthorityError;
use crate::percent::{self, HOST, USERINFO};
use crate::serialize;

/// The host of a URI: either a registered name or a typed IP address.
///
/// An empty name stands for "no authority present", which is how URIs such
/// as `urn:example` or `http:/foo` are represented.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// A percent-decoded registered name (e.g. "git.sr.ht")
    Name(String),
    /// An IPv4 or IPv6 address (e.g. `13.37.73.31`, `2001:db8::7`)
    Ip(IpAddr),
}

impl Host {
    /// Returns true if this is the empty name, i.e. no authority.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Name(name) if name.is_empty())
    }

    /// Returns the registered name, if this is not an IP host.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Ip(_) => None,
        }
    }

    /// Returns the IP address, if this is an IP host.
    #[must_use]
    pub const fn ip(&self) -> Option<IpAddr> {
        match self {
            Self::Name(_) => None,
            Self::Ip(ip) => Some(*ip),
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::Name(String::new())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serialize::write_host(self, f, &StdAddressService)
    }
}

/// A parsed authority component.
///
/// # Examples
///
/// ```
/// use uri_codec::{Authority, Host};
///
/// let authority = Authority::parse("user:1234@harelang.org:8080").unwrap();
/// assert_eq!(authority.userinfo(), "user:1234");
/// assert_eq!(authority.host(), &Host::Name("harelang.org".to_string()));
/// assert_eq!(authority.port(), Some(8080));
///
/// let authority = Authority::parse("[2001:db8::7]").unwrap();
/// assert!(authority.host().ip().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Authority {
    userinfo: String,
    host: Host,
    port: Option<u16>,
}

impl Authority {
    /// Parses an authority using the standard address parsers.
    ///
    /// # Errors
    ///
    /// Returns `AuthorityError` if:
    /// - More than one '@' appears, or the userinfo has a character that
    ///   must be escaped
    /// - The host contains a character outside the reg-name set
    /// - A bracketed literal is unclosed or not an IPv6 address
    /// - The port is not all digits or exceeds 65535
    /// - A percent escape is malformed
    pub fn parse(input: &str) -> Result<Self, AuthorityError> {
        Self::parse_with(input, &StdAddressService)
    }

    /// Parses an authority, resolving IP literals through `service`.
    ///
    /// # Errors
    ///
    /// See [`Authority::parse`].
    pub fn parse_with<S>(input: &str, service: &S) -> Result<Self, AuthorityError>
    where
        S: AddressService + ?Sized,
    {
        parse_authority(input, service).inspect_err(|e| {
            log::debug!("rejected authority {input:?}: {e}");
        })
    }

    /// Returns the percent-decoded userinfo, empty when absent.
    #[must_use]
    pub fn userinfo(&self) -> &str {
        &self.userinfo
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> &Host {
        &self.host
    }

    /// Returns the port, if specified.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    pub(crate) fn into_parts(self) -> (String, Host, Option<u16>) {
        (self.userinfo, self.host, self.port)
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serialize::write_authority(
            &self.userinfo,
            &self.host,
            self.port,
            f,
            &StdAddressService,
        )
    }
}

impl FromStr for Authority {
    type Err = AuthorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Authority {
    type Error = AuthorityError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

pub(crate) fn parse_authority<S>(input: &str, service: &S) -> Result<Authority, AuthorityError>
where
    S: AddressService + ?Sized,
{
    let (userinfo, host_port, offset) = split_userinfo(input)?;

    let (host, port) = if host_port.starts_with('[') {
        parse_ip_literal(host_port, offset, service)?
    } else {
        parse_reg_name(host_port, offset, service)?
    };

    Ok(Authority {
        userinfo,
        host,
        port,
    })
}

/// Splits off and decodes the userinfo. Also returns the offset of the
/// host within `input`.
fn split_userinfo(input: &str) -> Result<(String, &str, usize), AuthorityError> {
    let mut at = None;
    let mut count = 0;
    let mut in_brackets = false;

    for (i, byte) in input.bytes().enumerate() {
        match byte {
            b'[' => in_brackets = true,
            b']' => in_brackets = false,
            b'@' if !in_brackets => {
                count += 1;
                at = Some(i);
            }
            _ => {}
        }
    }

    let Some(at) = at else {
        return Ok((String::new(), input, 0));
    };

    let raw = &input[..at];
    if count > 1 {
        return Err(AuthorityError::InvalidUserinfo {
            value: raw.to_string(),
            reason: "more than one '@' delimiter",
        });
    }

    if !raw.bytes().all(|b| b == b'%' || USERINFO.contains(b)) {
        return Err(AuthorityError::InvalidUserinfo {
            value: raw.to_string(),
            reason: "contains a character that must be percent-encoded",
        });
    }

    let userinfo = percent::decode(raw).map_err(AuthorityError::InvalidEncoding)?;
    Ok((userinfo, &input[at + 1..], at + 1))
}

fn parse_ip_literal<S>(
    input: &str,
    offset: usize,
    service: &S,
) -> Result<(Host, Option<u16>), AuthorityError>
where
    S: AddressService + ?Sized,
{
    let closing_bracket = input.find(']').ok_or(AuthorityError::UnclosedBracket)?;

    let ipv6 = service
        .parse_ipv6(&input[1..closing_bracket])
        .map_err(AuthorityError::InvalidAddress)?;

    let rest = &input[closing_bracket + 1..];
    let port = if let Some(port) = rest.strip_prefix(':') {
        parse_port(port)?
    } else if let Some(c) = rest.chars().next() {
        return Err(AuthorityError::InvalidHost {
            char: c,
            position: offset + closing_bracket + 1,
        });
    } else {
        None
    };

    Ok((Host::Ip(IpAddr::V6(ipv6)), port))
}

fn parse_reg_name<S>(
    input: &str,
    offset: usize,
    service: &S,
) -> Result<(Host, Option<u16>), AuthorityError>
where
    S: AddressService + ?Sized,
{
    let (raw_host, port) = match input.split_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (input, None),
    };

    if let Some((i, c)) = raw_host.char_indices().find(|&(_, c)| !is_reg_name_char(c)) {
        return Err(AuthorityError::InvalidHost {
            char: c,
            position: offset + i,
        });
    }

    let name = percent::decode(raw_host).map_err(AuthorityError::InvalidEncoding)?;

    // Dotted literals are checked after decoding, so `1%2e2.3.4` and its
    // canonical form `1.2.3.4` agree.
    let host = match service.parse_ipv4(&name) {
        Ok(ip) => Host::Ip(IpAddr::V4(ip)),
        Err(_) => Host::Name(name),
    };

    let port = match port {
        Some(port) => parse_port(port)?,
        None => None,
    };

    Ok((host, port))
}

fn parse_port(input: &str) -> Result<Option<u16>, AuthorityError> {
    if input.is_empty() {
        return Ok(None);
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AuthorityError::InvalidPort {
            value: input.to_string(),
            reason: "port must consist of ASCII digits",
        });
    }

    input
        .parse::<u16>()
        .map(Some)
        .map_err(|_| AuthorityError::InvalidPort {
            value: input.to_string(),
            reason: "port must be 0-65535",
        })
}

fn is_reg_name_char(c: char) -> bool {
    u8::try_from(c).is_ok_and(|b| b == b'%' || HOST.contains(b))
}

#[cfg(feature = "serde")]
impl serde::Serialize for Host {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Host {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let authority = Authority::parse(&s).map_err(serde::de::Error::custom)?;
        if !authority.userinfo.is_empty() || authority.port.is_some() {
            return Err(serde::de::Error::custom(format!(
                "expected a bare host, found authority '{s}'"
            )));
        }
        Ok(authority.host)
    }
}
