//! Query string codec.
//!
//! A URI keeps its query raw; this module splits it into `&`-separated
//! `key=value` pairs and percent-decodes each one, and joins pairs back into
//! an encoded query.

use std::str::{self, Split};

use crate::error::PercentError;
use crate::percent::{self, QUERY_PAIR};

/// Cursor over the decoded key/value pairs of a raw query string.
///
/// The decoder owns two buffers that are cleared and refilled on every
/// step, so walking a query allocates at most once per buffer. Each pair is
/// borrowed from those buffers and lives until the next call to
/// [`next_pair`](Self::next_pair); copy it to keep it longer.
///
/// # Examples
///
/// ```
/// use uri_codec::QueryDecoder;
///
/// let mut decoder = QueryDecoder::new("search=%23risc-v&sort=longest-active&quantity=100%25");
/// assert_eq!(decoder.next_pair().unwrap(), Some(("search", "#risc-v")));
/// assert_eq!(decoder.next_pair().unwrap(), Some(("sort", "longest-active")));
/// assert_eq!(decoder.next_pair().unwrap(), Some(("quantity", "100%")));
/// assert_eq!(decoder.next_pair().unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct QueryDecoder<'a> {
    tokens: Split<'a, char>,
    key: Vec<u8>,
    value: Vec<u8>,
}

impl<'a> QueryDecoder<'a> {
    /// Creates a decoder over `query` (without the leading '?').
    #[must_use]
    pub fn new(query: &'a str) -> Self {
        Self {
            tokens: query.split('&'),
            key: Vec::new(),
            value: Vec::new(),
        }
    }

    /// Decodes the next pair, or returns `None` once the query is exhausted.
    ///
    /// An empty token (as in `a=1&&b=2`) ends the walk, like the end of
    /// input. A token without '=' yields an empty value.
    ///
    /// # Errors
    ///
    /// Returns `PercentError` if the key or value holds a malformed escape
    /// or does not decode to UTF-8.
    pub fn next_pair(&mut self) -> Result<Option<(&str, &str)>, PercentError> {
        let token = match self.tokens.next() {
            None => return Ok(None),
            Some("") => {
                // Terminal: later calls keep returning `None`.
                self.tokens.by_ref().for_each(drop);
                return Ok(None);
            }
            Some(token) => token,
        };

        let (raw_key, raw_value) = token.split_once('=').unwrap_or((token, ""));
        log::trace!("decoding query pair {raw_key:?}={raw_value:?}");

        self.key.clear();
        self.value.clear();
        percent::decode_into(raw_key, &mut self.key)?;
        percent::decode_into(raw_value, &mut self.value)?;

        let key = str::from_utf8(&self.key).map_err(|_| PercentError::InvalidUtf8)?;
        let value = str::from_utf8(&self.value).map_err(|_| PercentError::InvalidUtf8)?;
        Ok(Some((key, value)))
    }
}

/// Decodes every pair of `query` into owned strings.
///
/// # Errors
///
/// Returns the first `PercentError` met while decoding.
pub fn decode_pairs(query: &str) -> Result<Vec<(String, String)>, PercentError> {
    let mut decoder = QueryDecoder::new(query);
    let mut pairs = Vec::new();
    while let Some((key, value)) = decoder.next_pair()? {
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}

/// Encodes `pairs` into a query string (without the leading '?').
///
/// Keys and values are percent-encoded so that `&`, `=`, `#`, and `%` in
/// them survive a decode. Pairs are joined with `&`; a pair with an empty
/// value is written as the bare key.
///
/// ```
/// use uri_codec::encode_pairs;
///
/// let query = encode_pairs([("search", "#risc-v"), ("quantity", "100%"), ("flag", "")]);
/// assert_eq!(query, "search=%23risc-v&quantity=100%25&flag");
/// ```
///
/// # Panics
///
/// Panics if any key is empty.
pub fn encode_pairs<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();
    for (key, value) in pairs {
        let (key, value) = (key.as_ref(), value.as_ref());
        assert!(!key.is_empty(), "query keys must not be empty");

        if !out.is_empty() {
            out.push('&');
        }
        percent::encode_into(key, &QUERY_PAIR, &mut out);
        if !value.is_empty() {
            out.push('=');
            percent::encode_into(value, &QUERY_PAIR, &mut out);
        }
    }
    out
}
