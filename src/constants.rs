//! Character classes of the generic URI grammar.

/// Punctuation that is unreserved in every component, besides ASCII letters
/// and digits.
pub const UNRESERVED_MARKS: &str = "-._~";

/// Sub-delimiters, allowed unescaped in host names, userinfo, paths,
/// queries, and fragments.
pub const SUB_DELIMS: &str = "!$&'()*+,;=";

/// Extra characters a path may carry besides unreserved and sub-delimiters.
pub const PATH_EXTRAS: &str = "/:@";
