//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uri_codec::prelude::*;
//!
//! let uri = Uri::parse("https://harelang.org/").unwrap();
//! assert_eq!(uri.host().name(), Some("harelang.org"));
//! ```

pub use crate::{
    // Core types
    AddressService, AsciiSet, Authority, Host, QueryDecoder, StdAddressService, Uri,
    // Query codec
    decode_pairs, encode_pairs,
    // Errors
    AddressError, AuthorityError, ParseError, ParseErrorKind, PercentError,
};
