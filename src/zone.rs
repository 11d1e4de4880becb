//! Time zone resolution shared by both parsing tiers.

use crate::date_time::parse_field;
use crate::timestamp::MAX_OFFSET_MINUTES;
use crate::{ParseError, ParseErrorKind, ZoneOffset};

/// Width of a `±hh:mm` numeric offset.
pub(crate) const OFFSET_WIDTH: usize = 6;

/// The kind of time zone designator that terminates a date-time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ZoneKind {
    /// `Z`.
    Zulu,
    /// `+hh:mm` or `-hh:mm`.
    Offset,
}

/// Resolves the time zone of a date-time whose designator kind is already
/// known.
///
/// A numeric offset is read from the trailing 6 characters of the input.
/// Out-of-range components such as in `-01:60` are rejected rather than
/// normalized or replaced by a default zone.
pub(crate) fn resolve(kind: ZoneKind, text: &str) -> Result<ZoneOffset, ParseError> {
    match kind {
        ZoneKind::Zulu => Ok(ZoneOffset::Utc),
        ZoneKind::Offset => {
            let bytes = text.as_bytes();
            let start = bytes
                .len()
                .checked_sub(OFFSET_WIDTH)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidOffset, text))?;

            parse_offset(&bytes[start..])
                .ok_or_else(|| ParseError::at(ParseErrorKind::InvalidOffset, text, start))
        }
    }
}

/// Parses a `±hh:mm` offset.
fn parse_offset(offset: &[u8]) -> Option<ZoneOffset> {
    let negative = match offset {
        [b'+', _, _, b':', _, _] => false,
        [b'-', _, _, b':', _, _] => true,
        _ => return None,
    };
    let hours = parse_field(&offset[1..3])?;
    let minutes = parse_field(&offset[4..6])?;

    offset_from_parts(negative, hours, minutes)
}

/// Builds a zone from the components of a numeric offset.
///
/// Hours must be within 00-23 and minutes within 00-59; each is checked on its
/// own. `-00:00` designates an unknown local offset.
pub(crate) fn offset_from_parts(negative: bool, hours: u32, minutes: u32) -> Option<ZoneOffset> {
    if hours > 23 || minutes > 59 {
        return None;
    }
    if negative && hours == 0 && minutes == 0 {
        return Some(ZoneOffset::Unknown);
    }

    let magnitude = (hours * 60 + minutes) as i16;
    debug_assert!(magnitude <= MAX_OFFSET_MINUTES);

    Some(ZoneOffset::Fixed(if negative { -magnitude } else { magnitude }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zulu() {
        assert_eq!(
            resolve(ZoneKind::Zulu, "1985-04-12T23:20:50Z"),
            Ok(ZoneOffset::Utc)
        );
    }

    #[test]
    fn numeric_offsets() {
        assert_eq!(
            resolve(ZoneKind::Offset, "1996-12-19T16:39:57.123456-01:00"),
            Ok(ZoneOffset::Fixed(-60))
        );
        assert_eq!(
            resolve(ZoneKind::Offset, "1996-12-19T16:39:57+01:30"),
            Ok(ZoneOffset::Fixed(90))
        );
        assert_eq!(
            resolve(ZoneKind::Offset, "1996-12-19T16:39:57+23:59"),
            Ok(ZoneOffset::Fixed(MAX_OFFSET_MINUTES))
        );
        assert_eq!(
            resolve(ZoneKind::Offset, "1996-12-19T16:39:57+00:00"),
            Ok(ZoneOffset::Fixed(0))
        );
    }

    #[test]
    fn unknown_offset() {
        assert_eq!(
            resolve(ZoneKind::Offset, "1996-12-19T16:39:57.123456-00:00"),
            Ok(ZoneOffset::Unknown)
        );
    }

    #[test]
    fn out_of_range_components() {
        for text in [
            "1996-12-19T16:39:57.123456-01:60",
            "1996-12-19T16:39:57+24:00",
            "1996-12-19T16:39:57-99:00",
        ] {
            let err = resolve(ZoneKind::Offset, text).unwrap_err();

            assert_eq!(err.kind(), ParseErrorKind::InvalidOffset);
            assert_eq!(err.input(), text);
            assert_eq!(err.position(), Some(text.len() - OFFSET_WIDTH));
        }
    }

    #[test]
    fn malformed_offsets() {
        for text in [
            "1996-12-19T16:39:57.203GMT0800",
            "1996-12-19T16:39:57 01:00",
            "1996-12-19T16:39:57+0100",
            "1996-12-19T16:39:57+1:00",
            "+01:0",
        ] {
            assert_eq!(
                resolve(ZoneKind::Offset, text).unwrap_err().kind(),
                ParseErrorKind::InvalidOffset
            );
        }
    }
}
