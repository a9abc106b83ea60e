//! Lenient parsing of numeric path ids.
//!
//! Ids arrive as raw path segments. Parsing reads an integer prefix the way
//! most HTTP clients of this API expect: surrounding junk after the digits is
//! ignored (`"12abc"` is 12), a `0x` prefix switches to hexadecimal, and a
//! segment that does not start with a number is rejected.

/// A positive id read from a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositiveId {
    /// Fits in the primary key column.
    Value(i64),
    /// Positive but larger than any stored key can be, so it matches no row.
    OutOfRange,
}

/// Parses `raw` as a strictly positive id.
///
/// Leading whitespace is skipped and an optional `+`/`-` sign is accepted.
/// A `0x`/`0X` prefix reads the longest run of hex digits after it;
/// otherwise the longest run of decimal digits is read. Returns `None` when
/// there are no digits or the value is zero or negative.
pub fn parse_positive_id(raw: &str) -> Option<PositiveId> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, body) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let digits_len = body
        .bytes()
        .take_while(|b| (*b as char).is_digit(radix))
        .count();
    if digits_len == 0 {
        return None;
    }
    let digits = &body[..digits_len];

    if digits.bytes().all(|b| b == b'0') || negative {
        return None;
    }

    match i64::from_str_radix(digits, radix) {
        Ok(value) => Some(PositiveId::Value(value)),
        // Only overflow is left: the run is non-empty, valid and non-zero.
        Err(_) => Some(PositiveId::OutOfRange),
    }
}
