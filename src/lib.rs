//! Parser, validator, and canonical serializer for generic URIs.
//!
//! This crate decomposes URI text into its components, validates it against
//! the generic URI grammar (RFC 3986), and renders a parsed URI back to
//! canonical text. A companion codec splits the query component into
//! percent-decoded key/value pairs and joins pairs back into a query.
//!
//! # Overview
//!
//! ```text
//! scheme ":" [ "//" [ userinfo "@" ] host [ ":" port ] ] path [ "?" query ] [ "#" fragment ]
//! ```
//!
//! Userinfo, host names, path, and fragment are percent-decoded while
//! parsing. The query is kept raw, because decoding it before splitting on
//! `&` and `=` would be lossy.
//!
//! # Quick Start
//!
//! ```rust
//! use uri_codec::{Host, Uri};
//!
//! let uri = Uri::parse("foo://example.com:8042/over/there?name=ferret#nose").unwrap();
//!
//! assert_eq!(uri.scheme(), "foo");
//! assert_eq!(uri.host(), &Host::Name("example.com".to_string()));
//! assert_eq!(uri.port(), Some(8042));
//! assert_eq!(uri.path(), "/over/there");
//! assert_eq!(uri.query(), "name=ferret");
//! assert_eq!(uri.fragment(), "nose");
//!
//! // Serialization produces canonical text
//! assert_eq!(uri.to_string(), "foo://example.com:8042/over/there?name=ferret#nose");
//! ```
//!
//! # Query Strings
//!
//! ```rust
//! use uri_codec::{encode_pairs, QueryDecoder};
//!
//! let query = encode_pairs([("search", "#risc-v"), ("quantity", "100%")]);
//! assert_eq!(query, "search=%23risc-v&quantity=100%25");
//!
//! let mut decoder = QueryDecoder::new(&query);
//! while let Some((key, value)) = decoder.next_pair().unwrap() {
//!     println!("{key} = {value}");
//! }
//! ```
//!
//! # IP Addresses
//!
//! Dotted IPv4 hosts and bracketed IPv6 literals become [`Host::Ip`]. Address
//! parsing and formatting go through the [`AddressService`] trait;
//! [`Uri::parse`] uses [`StdAddressService`], and [`Uri::parse_with`] accepts
//! any other implementation.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Uri`] and [`Host`] as their
//!   canonical text.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod address;
mod authority;
mod constants;
mod error;
pub mod percent;
pub mod prelude;
mod query;
mod serialize;
mod uri;

pub use address::{AddressService, StdAddressService};
pub use authority::{Authority, Host};
pub use constants::{PATH_EXTRAS, SUB_DELIMS, UNRESERVED_MARKS};
pub use error::{AddressError, AuthorityError, ParseError, ParseErrorKind, PercentError};
pub use percent::AsciiSet;
pub use query::{QueryDecoder, decode_pairs, encode_pairs};
pub use uri::Uri;
