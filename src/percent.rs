//! Percent-encoding (`%XX`) codec.
//!
//! Decoding turns every escape into the byte it names; encoding escapes every
//! byte outside a component's [`AsciiSet`]. Together they canonicalize: a
//! decode followed by an encode emits unreserved characters literally and
//! all remaining escapes with uppercase hex digits.
//!
//! ```
//! use uri_codec::percent::{self, PATH};
//!
//! let decoded = percent::decode("/~sircmpw%6e/Build%20status").unwrap();
//! assert_eq!(decoded, "/~sircmpwn/Build status");
//! assert_eq!(percent::encode(&decoded, &PATH), "/~sircmpwn/Build%20status");
//! ```

use crate::constants::{PATH_EXTRAS, SUB_DELIMS, UNRESERVED_MARKS};
use crate::error::PercentError;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// A set of ASCII characters that a component may carry unescaped.
///
/// Bytes outside the ASCII range are never members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsciiSet {
    bits: u128,
}

impl AsciiSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Builds a set from the characters of `chars`.
    ///
    /// Non-ASCII bytes are ignored.
    #[must_use]
    pub const fn from_chars(chars: &str) -> Self {
        let bytes = chars.as_bytes();
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < bytes.len() {
            set = set.add(bytes[i]);
            i += 1;
        }
        set
    }

    /// Builds a set from the inclusive byte range `start..=end`.
    #[must_use]
    pub const fn from_range(start: u8, end: u8) -> Self {
        let mut set = Self::EMPTY;
        let mut i = start;
        loop {
            set = set.add(i);
            if i >= end {
                break;
            }
            i += 1;
        }
        set
    }

    /// Returns the set with `byte` added.
    #[must_use]
    pub const fn add(mut self, byte: u8) -> Self {
        if byte.is_ascii() {
            self.bits |= 1u128 << byte;
        }
        self
    }

    /// Returns the set with `byte` removed.
    #[must_use]
    pub const fn remove(mut self, byte: u8) -> Self {
        if byte.is_ascii() {
            self.bits &= !(1u128 << byte);
        }
        self
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Test whether or not the set contains the given byte.
    #[inline]
    #[must_use]
    pub const fn contains(&self, byte: u8) -> bool {
        byte.is_ascii() && self.bits & (1u128 << byte) != 0
    }
}

/// ASCII letters, digits, and `-._~`. Safe in every component.
pub const UNRESERVED: AsciiSet = AsciiSet::from_range(b'a', b'z')
    .merge(AsciiSet::from_range(b'A', b'Z'))
    .merge(AsciiSet::from_range(b'0', b'9'))
    .merge(AsciiSet::from_chars(UNRESERVED_MARKS));

/// Characters a registered host name may carry unescaped.
pub const HOST: AsciiSet = UNRESERVED.merge(AsciiSet::from_chars(SUB_DELIMS));

/// Characters userinfo may carry unescaped.
pub const USERINFO: AsciiSet = HOST.add(b':');

/// Characters a path may carry unescaped.
pub const PATH: AsciiSet = HOST.merge(AsciiSet::from_chars(PATH_EXTRAS));

/// Characters a query may carry unescaped.
pub const QUERY: AsciiSet = PATH.add(b'?');

/// Characters a fragment may carry unescaped.
pub const FRAGMENT: AsciiSet = QUERY;

/// Characters a single query key or value may carry unescaped: the query set
/// without the pair delimiters `&` and `=`.
pub const QUERY_PAIR: AsciiSet = QUERY.remove(b'&').remove(b'=');

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Reads the escape starting at `position`, which must hold a '%'.
fn escape_at(bytes: &[u8], position: usize) -> Result<u8, PercentError> {
    let hi = bytes.get(position + 1).copied().and_then(hex_value);
    let lo = bytes.get(position + 2).copied().and_then(hex_value);
    match (hi, lo) {
        (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
        _ => Err(PercentError::InvalidEscape { position }),
    }
}

/// Percent-decodes `input`, appending the raw bytes to `out`.
///
/// # Errors
///
/// Returns `PercentError::InvalidEscape` if a '%' is not followed by two hex
/// digits. Bytes appended before the failure are left in `out`.
pub fn decode_into(input: &str, out: &mut Vec<u8>) -> Result<(), PercentError> {
    let bytes = input.as_bytes();
    out.reserve(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            out.push(escape_at(bytes, i)?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    Ok(())
}

/// Percent-decodes `input` into an owned string.
///
/// # Errors
///
/// Returns `PercentError::InvalidEscape` for a malformed escape and
/// `PercentError::InvalidUtf8` if the decoded bytes are not UTF-8.
pub fn decode(input: &str) -> Result<String, PercentError> {
    // Fast path: nothing to decode.
    if !input.contains('%') {
        return Ok(input.to_string());
    }

    let mut out = Vec::with_capacity(input.len());
    decode_into(input, &mut out)?;
    String::from_utf8(out).map_err(|_| PercentError::InvalidUtf8)
}

/// Appends `input` to `out`, escaping every byte outside `set`.
pub fn encode_into(input: &str, set: &AsciiSet, out: &mut String) {
    out.reserve(input.len());
    for &byte in input.as_bytes() {
        if set.contains(byte) {
            out.push(char::from(byte));
        } else {
            push_escape(byte, out);
        }
    }
}

/// Returns `input` with every byte outside `set` escaped.
#[must_use]
pub fn encode(input: &str, set: &AsciiSet) -> String {
    let mut out = String::with_capacity(input.len());
    encode_into(input, set, &mut out);
    out
}

/// Canonicalizes the escapes of still-encoded text without decoding it.
///
/// Escapes naming an unreserved character are replaced by that character;
/// every other escape is kept, rewritten with uppercase hex digits. All other
/// bytes pass through untouched, so delimiters such as `&` and `=` keep their
/// structural meaning.
///
/// ```
/// use uri_codec::percent;
///
/// let raw = "q=%7esearch%2f%61&x=%3d";
/// assert_eq!(percent::normalize(raw).unwrap(), "q=~search%2Fa&x=%3D");
/// ```
///
/// # Errors
///
/// Returns `PercentError::InvalidEscape` if a '%' is not followed by two hex
/// digits.
pub fn normalize(input: &str) -> Result<String, PercentError> {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());

    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let byte = escape_at(bytes, i)?;
        out.push_str(&input[start..i]);
        if UNRESERVED.contains(byte) {
            out.push(char::from(byte));
        } else {
            push_escape(byte, &mut out);
        }
        i += 3;
        start = i;
    }
    out.push_str(&input[start..]);

    Ok(out)
}

fn push_escape(byte: u8, out: &mut String) {
    out.push('%');
    out.push(char::from(HEX_UPPER[usize::from(byte >> 4)]));
    out.push(char::from(HEX_UPPER[usize::from(byte & 0x0f)]));
}
