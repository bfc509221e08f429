//! Error types for URI parsing and the percent codec.

use std::fmt;

/// Errors that can occur when parsing a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Returns true if the failure came from the address service rejecting
    /// a bracketed IP literal, as opposed to malformed URI text in general.
    #[must_use]
    pub const fn is_address_error(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::InvalidAuthority(AuthorityError::InvalidAddress(_))
        )
    }
}

/// Specific parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No ':' terminates a scheme
    MissingScheme,
    /// The scheme before ':' is empty
    EmptyScheme,
    /// Character not allowed in a scheme
    InvalidSchemeChar {
        /// The invalid character
        char: char,
        /// Position in the input
        position: usize,
    },
    /// Authority parsing failed
    InvalidAuthority(AuthorityError),
    /// Path could not be percent-decoded
    InvalidPath(PercentError),
    /// Fragment could not be percent-decoded
    InvalidFragment(PercentError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': ", self.input)?;
        fmt::Display::fmt(&self.kind, f)
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingScheme => write!(f, "missing scheme; URI must start with '<scheme>:'"),
            Self::EmptyScheme => write!(f, "scheme cannot be empty"),
            Self::InvalidSchemeChar { char, position } => {
                write!(
                    f,
                    "invalid scheme character '{char}' at position {position}; scheme must start with a letter followed by letters, digits, '+', '-' or '.'"
                )
            }
            Self::InvalidAuthority(e) => write!(f, "invalid authority: {e}"),
            Self::InvalidPath(e) => write!(f, "invalid path: {e}"),
            Self::InvalidFragment(e) => write!(f, "invalid fragment: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    // The arms bind different payload types, so they cannot be merged.
    #[allow(clippy::match_same_arms)]
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidAuthority(e) => Some(e),
            ParseErrorKind::InvalidPath(e) | ParseErrorKind::InvalidFragment(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors for authority (`userinfo@host:port`) parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// Malformed userinfo
    InvalidUserinfo {
        /// The offending userinfo text
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Character not allowed in a host name
    InvalidHost {
        /// The invalid character
        char: char,
        /// Position in the authority
        position: usize,
    },
    /// A bracketed IP literal has no closing ']'
    UnclosedBracket,
    /// Invalid port number
    InvalidPort {
        /// The invalid value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// The address service rejected a bracketed literal
    InvalidAddress(AddressError),
    /// Userinfo or host name could not be percent-decoded
    InvalidEncoding(PercentError),
}

impl fmt::Display for AuthorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUserinfo { value, reason } => {
                write!(f, "invalid userinfo '{value}': {reason}")
            }
            Self::InvalidHost { char, position } => {
                write!(f, "invalid host character '{char}' at position {position}")
            }
            Self::UnclosedBracket => write!(f, "missing closing bracket for IP literal"),
            Self::InvalidPort { value, reason } => write!(f, "invalid port '{value}': {reason}"),
            Self::InvalidAddress(e) => write!(f, "{e}"),
            Self::InvalidEncoding(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AuthorityError {
    #[allow(clippy::match_same_arms)]
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidAddress(e) => Some(e),
            Self::InvalidEncoding(e) => Some(e),
            _ => None,
        }
    }
}

/// Error reported by an [`AddressService`](crate::AddressService) for text
/// that is not a valid address of the requested family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressError {
    /// The rejected text
    pub value: String,
    /// Reason for invalidity
    pub reason: &'static str,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid IP address '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for AddressError {}

/// Errors for percent-decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    /// '%' not followed by two hex digits
    InvalidEscape {
        /// Position of the '%' in the input
        position: usize,
    },
    /// Decoded bytes are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for PercentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscape { position } => {
                write!(
                    f,
                    "invalid percent escape at position {position}; '%' must be followed by two hex digits"
                )
            }
            Self::InvalidUtf8 => write!(f, "percent-decoded bytes are not valid UTF-8"),
        }
    }
}

impl std::error::Error for PercentError {}
