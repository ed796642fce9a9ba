// crates/geodb-core/src/text.rs

/// Convert a string into a folded key for case-insensitive comparison.
///
/// Uses full Unicode lowercasing, so `"ÅLAND"` and `"åland"` fold to the
/// same key. Accents are kept: `"Cote"` does not match `"Côte"`.
///
/// # Examples
///
/// ```rust
/// use geodb_core::text::fold_case;
///
/// assert_eq!(fold_case("Afghanistan"), "afghanistan");
/// assert_eq!(fold_case("ÅLAND"), "åland");
/// ```
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Case-insensitive equality on [`fold_case`] keys.
///
/// ```rust
/// use geodb_core::text::equals_folded;
///
/// assert!(equals_folded("Asia", "ASIA"));
/// assert!(!equals_folded("Asia", "Europe"));
/// ```
pub fn equals_folded(a: &str, b: &str) -> bool {
    a == b || fold_case(a) == fold_case(b)
}

/// Why a string did not yield an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntPrefixError {
    /// No digit after the optional sign.
    NoDigits,
    /// Well-formed digits, but outside `i64`.
    OutOfRange,
}

/// Parse an id the way lenient form handlers do: skip leading whitespace,
/// accept an optional sign, then read the leading run of ASCII digits and
/// ignore whatever follows (`"12abc"` is 12).
///
/// ```rust
/// use geodb_core::text::{parse_leading_int, IntPrefixError};
///
/// assert_eq!(parse_leading_int(" 12abc"), Ok(12));
/// assert_eq!(parse_leading_int("abc"), Err(IntPrefixError::NoDigits));
/// assert_eq!(parse_leading_int("99999999999999999999"), Err(IntPrefixError::OutOfRange));
/// ```
pub fn parse_leading_int(raw: &str) -> Result<i64, IntPrefixError> {
    let s = raw.trim_start();
    let sign_len = usize::from(s.starts_with(['-', '+']));
    let digits = s[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return Err(IntPrefixError::NoDigits);
    }
    // Sign and digits parse together so `i64::MIN` fits.
    s[..sign_len + digits]
        .parse()
        .map_err(|_| IntPrefixError::OutOfRange)
}
