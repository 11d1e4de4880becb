//! Fractional-second normalization and exact decimal timestamps.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::{ParseError, ParseErrorKind, PreciseTimestamp};

/// Index of the character that follows `yyyy-MM-ddTHH:mm:ss`.
pub(crate) const TIME_END: usize = 19;

/// Index of the first fractional digit, past the `.` separator.
pub(crate) const FRACTION_START: usize = TIME_END + 1;

/// Time zone designators, in the order they are looked up.
pub(crate) const DESIGNATORS: [u8; 3] = [b'Z', b'+', b'-'];

/// Finds the time zone designator of a date-time with fractional seconds.
///
/// Returns the first candidate whose last occurrence lies past the time of
/// day, together with that position. Occurrences within the date, such as the
/// `-` separators, are ignored. Only ASCII candidates can match, so look-alike
/// characters such as U+2212 MINUS SIGN are never taken for a designator.
pub(crate) fn find_designator(text: &[u8], candidates: &[u8]) -> Option<(u8, usize)> {
    candidates.iter().find_map(|&candidate| {
        let index = text.iter().rposition(|&c| c == candidate)?;

        (index > TIME_END).then_some((candidate, index))
    })
}

/// Truncates or right-pads with `0` a string of fractional digits to exactly
/// `N` digits. Extra digits are dropped, never rounded.
pub(crate) fn fixed_width_fraction<const N: usize>(digits: &[u8]) -> [u8; N] {
    let mut field = [b'0'; N];
    for (slot, &digit) in field.iter_mut().zip(digits) {
        *slot = digit;
    }

    field
}

/// Returns the fractional digits located between the `.` separator and the
/// designator at `designator_idx`, checking that there is at least one and
/// that all are ASCII digits.
fn fraction_digits<'a>(
    text: &'a str,
    designator_idx: usize,
    input: &str,
) -> Result<&'a str, ParseError> {
    let digits = text
        .get(FRACTION_START..designator_idx)
        .filter(|digits| !digits.is_empty())
        .ok_or_else(|| ParseError::at(ParseErrorKind::InvalidFraction, input, FRACTION_START))?;

    match digits.bytes().position(|c| !c.is_ascii_digit()) {
        Some(idx) => Err(ParseError::at(
            ParseErrorKind::InvalidFraction,
            input,
            FRACTION_START + idx,
        )),
        None => Ok(digits),
    }
}

/// Rewrites a date-time so that its fractional seconds have exactly 3 digits.
///
/// Errors refer to `input` rather than to `text`, which may be a normalized
/// copy of it.
pub(crate) fn reduce_to_millis(
    text: &str,
    delimiter: char,
    input: &str,
) -> Result<String, ParseError> {
    let designator_idx = text
        .rfind(delimiter)
        .filter(|&idx| idx > TIME_END)
        .ok_or_else(|| ParseError::at(ParseErrorKind::MissingTimezone, input, TIME_END))?;
    let digits = fraction_digits(text, designator_idx, input)?;
    let millis = fixed_width_fraction::<3>(digits.as_bytes());

    let mut reduced = String::with_capacity(FRACTION_START + 3 + text.len() - designator_idx);
    reduced.push_str(&text[..FRACTION_START]);
    reduced.extend(millis.iter().map(|&c| c as char));
    reduced.push_str(&text[designator_idx..]);

    Ok(reduced)
}

/// Reduces or expands the fractional seconds of a date-time to exactly 3
/// digits (milliseconds).
///
/// The fraction is the text between the `.` that follows `HH:mm:ss` and the
/// last occurrence of `delimiter`. Longer fractions are truncated, not
/// rounded, and shorter ones are right-padded with zeros. An already
/// 3-digit fraction is returned unchanged.
///
/// Returns an error if `delimiter` does not occur past the time of day, or if
/// the fraction is empty or contains a non-digit.
///
/// # Examples
///
/// ```
/// use rfc3339_parser::reduce_precision;
///
/// assert_eq!(
///     reduce_precision("1996-12-19T16:39:57.123456-01:00", '-').unwrap(),
///     "1996-12-19T16:39:57.123-01:00"
/// );
/// assert_eq!(
///     reduce_precision("1985-04-12T23:20:50.1Z", 'Z').unwrap(),
///     "1985-04-12T23:20:50.100Z"
/// );
/// assert!(reduce_precision("1996-12-19T16:39:57.123456-01:00", ' ').is_err());
/// ```
pub fn reduce_precision(text: &str, delimiter: char) -> Result<String, ParseError> {
    reduce_to_millis(text, delimiter, text)
}

/// Returns the nanosecond value of a non-empty string of fractional digits,
/// truncated after the ninth digit.
pub(crate) fn fraction_to_nanos(digits: &[u8]) -> Option<u32> {
    crate::date_time::parse_field(&fixed_width_fraction::<9>(digits))
}

/// Combines the whole seconds obtained by parsing `text` with the fractional
/// digits exactly as written in `text`.
///
/// The time zone designator must lie past the time of day, so a date-time
/// without fractional seconds is rejected.
pub(crate) fn compose_precise(text: &str, secs: i64) -> Result<PreciseTimestamp, ParseError> {
    let upper = text.to_ascii_uppercase();
    let bytes = upper.as_bytes();

    if bytes.len() <= TIME_END {
        return Err(ParseError::new(ParseErrorKind::TooShort, text));
    }
    // Without a fraction the designator sits at `TIME_END`, not past it.
    if bytes[TIME_END] != b'.' {
        return Err(ParseError::at(ParseErrorKind::MissingTimezone, text, TIME_END));
    }

    let (_, designator_idx) = find_designator(bytes, &DESIGNATORS)
        .ok_or_else(|| ParseError::at(ParseErrorKind::MissingTimezone, text, TIME_END))?;
    let digits = fraction_digits(&upper, designator_idx, text)?;
    let fraction = BigDecimal::from_str(&format!("0.{}", digits))
        .map_err(|_| ParseError::at(ParseErrorKind::InvalidFraction, text, FRACTION_START))?;

    Ok(PreciseTimestamp::new(secs, BigDecimal::from(secs) + fraction))
}
