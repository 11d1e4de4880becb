//! Position-based parsing tier.

use std::borrow::Cow;

use crate::precision::{self, DESIGNATORS, TIME_END};
use crate::zone::{self, ZoneKind};
use crate::{ParseError, ParseErrorKind, Rfc3339Parser, Timestamp, ZoneOffset};

/// The layout of a date-time, as told by the character that follows
/// `HH:mm:ss` and, for fractional seconds, by the time zone designator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Shape {
    /// `yyyy-MM-ddTHH:mm:ssZ`
    Zulu,
    /// `yyyy-MM-ddTHH:mm:ss.SSSZ`
    ZuluFractional,
    /// `yyyy-MM-ddTHH:mm:ss±hh:mm`
    Offset,
    /// `yyyy-MM-ddTHH:mm:ss.SSS±hh:mm`
    OffsetFractional,
    Invalid,
}

impl Shape {
    fn classify(designator: u8, fractional: bool) -> Self {
        match (designator, fractional) {
            (b'Z', false) => Self::Zulu,
            (b'Z', true) => Self::ZuluFractional,
            (b'+' | b'-', false) => Self::Offset,
            (b'+' | b'-', true) => Self::OffsetFractional,
            _ => Self::Invalid,
        }
    }

    fn template(self) -> Option<Template> {
        let (fractional, zone) = match self {
            Self::Zulu => (false, ZoneKind::Zulu),
            Self::ZuluFractional => (true, ZoneKind::Zulu),
            Self::Offset => (false, ZoneKind::Offset),
            Self::OffsetFractional => (true, ZoneKind::Offset),
            Self::Invalid => return None,
        };

        Some(Template { fractional, zone })
    }
}

/// A fixed-width date-time layout: `yyyy-MM-ddTHH:mm:ss`, then `.SSS` if
/// `fractional`, then `Z` or `±hh:mm`.
#[derive(Copy, Clone, Debug)]
struct Template {
    fractional: bool,
    zone: ZoneKind,
}

/// Date-time fields read by a [`Template`].
struct Fields {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millis: u32,
}

impl Template {
    fn width(&self) -> usize {
        let fraction = if self.fractional { 4 } else { 0 };
        let zone = match self.zone {
            ZoneKind::Zulu => 1,
            ZoneKind::Offset => zone::OFFSET_WIDTH,
        };

        TIME_END + fraction + zone
    }

    /// Reads the fields of an uppercase date-time laid out exactly as this
    /// template. The offset value itself is left to the zone resolver.
    fn consume(&self, text: &str, input: &str) -> Result<Fields, ParseError> {
        let mut cursor = Cursor {
            bytes: text.as_bytes(),
            pos: 0,
            input,
        };

        let year = cursor.digits(4)? as u16;
        cursor.literal(b'-')?;
        let month = cursor.digits(2)? as u8;
        cursor.literal(b'-')?;
        let day = cursor.digits(2)? as u8;
        cursor.literal(b'T')?;
        let hour = cursor.digits(2)? as u8;
        cursor.literal(b':')?;
        let minute = cursor.digits(2)? as u8;
        cursor.literal(b':')?;
        let second = cursor.digits(2)? as u8;

        let millis = if self.fractional {
            cursor.literal(b'.')?;
            cursor.digits(3)?
        } else {
            0
        };

        match self.zone {
            ZoneKind::Zulu => cursor.literal(b'Z')?,
            ZoneKind::Offset => {
                cursor.one_of(b"+-")?;
                cursor.digits(2)?;
                cursor.literal(b':')?;
                cursor.digits(2)?;
            }
        }

        if text.len() != self.width() {
            return Err(ParseError::at(ParseErrorKind::Malformed, input, self.width()));
        }

        Ok(Fields {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millis,
        })
    }
}

/// Reads a byte string field by field, reporting mismatches against the
/// original input.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    input: &'a str,
}

impl Cursor<'_> {
    fn mismatch(&self) -> ParseError {
        ParseError::at(ParseErrorKind::Malformed, self.input, self.pos)
    }

    fn one_of(&mut self, expected: &[u8]) -> Result<u8, ParseError> {
        match self.bytes.get(self.pos) {
            Some(c) if expected.contains(c) => {
                self.pos += 1;
                Ok(*c)
            }
            _ => Err(self.mismatch()),
        }
    }

    fn literal(&mut self, expected: u8) -> Result<(), ParseError> {
        self.one_of(&[expected]).map(|_| ())
    }

    fn digits(&mut self, width: usize) -> Result<u32, ParseError> {
        let value = self
            .bytes
            .get(self.pos..self.pos + width)
            .and_then(crate::date_time::parse_field)
            .ok_or_else(|| self.mismatch())?;
        self.pos += width;

        Ok(value)
    }
}

/// The permissive parsing tier.
///
/// The input is classified by the character at index 19, right after
/// `yyyy-MM-ddTHH:mm:ss`, and then read against one of four fixed-width
/// layouts. Fractional seconds of any length are first reduced to
/// milliseconds. There is no grammar validation beyond these layouts, but
/// field values must still form a valid date-time and numeric offsets must be
/// within range.
///
/// Prefer [`Strict`](crate::Strict) unless inputs are known to be
/// well-formed.
///
/// # Examples
///
/// ```
/// use rfc3339_parser::{Lenient, Rfc3339Parser};
///
/// let t = Lenient.parse("1985-04-12t23:20:50.52z").unwrap();
/// assert_eq!(t.unix_timestamp_millis(), 482_196_050_520);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Lenient;

impl Lenient {
    /// Returns the designator that terminates the date-time and whether
    /// fractional seconds precede it.
    fn designator(upper: &[u8], input: &str) -> Result<(u8, bool), ParseError> {
        match upper.get(TIME_END) {
            None => Err(ParseError::new(ParseErrorKind::TooShort, input)),
            Some(b'.') => precision::find_designator(upper, &DESIGNATORS)
                .map(|(designator, _)| (designator, true))
                .ok_or_else(|| ParseError::at(ParseErrorKind::MissingTimezone, input, TIME_END)),
            Some(&c) => Ok((c, false)),
        }
    }
}

impl Rfc3339Parser for Lenient {
    fn parse(&self, text: &str) -> Result<Timestamp, ParseError> {
        // Lowercase `t` and `z` are allowed (RFC 3339 §5.6).
        let upper = text.to_ascii_uppercase();
        let (designator, fractional) = Self::designator(upper.as_bytes(), text)?;

        let normalized = if fractional {
            Cow::Owned(precision::reduce_to_millis(&upper, designator as char, text)?)
        } else {
            Cow::Borrowed(upper.as_str())
        };

        let shape = Shape::classify(designator, fractional);
        trace!("lenient parse of {:?} dispatched as {:?}", text, shape);

        let template = shape
            .template()
            .ok_or_else(|| ParseError::at(ParseErrorKind::Malformed, text, TIME_END))?;
        let fields = template.consume(&normalized, text)?;
        // Normalization leaves the trailing offset untouched.
        let offset = zone::resolve(template.zone, text)?;

        Timestamp::new(
            fields.year,
            fields.month,
            fields.day,
            fields.hour,
            fields.minute,
            fields.second,
            fields.millis * 1_000_000,
            offset,
        )
        .map_err(|err| {
            debug!("lenient parse of {:?} rejected: {}", text, err);
            ParseError::new(ParseErrorKind::InvalidDate(err), text)
        })
    }

    fn parse_zone(&self, text: &str) -> Result<ZoneOffset, ParseError> {
        let upper = text.to_ascii_uppercase();
        let (designator, _) = Self::designator(upper.as_bytes(), text)?;

        let kind = match designator {
            b'Z' => ZoneKind::Zulu,
            b'+' | b'-' => ZoneKind::Offset,
            _ => return Err(ParseError::at(ParseErrorKind::Malformed, text, TIME_END)),
        };

        zone::resolve(kind, text)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::DateTimeError;

    fn millis(text: &str) -> i64 {
        Lenient.parse(text).unwrap().unix_timestamp_millis()
    }

    fn error_kind(text: &str) -> ParseErrorKind {
        Lenient.parse(text).unwrap_err().kind()
    }

    #[test]
    fn classification() {
        assert_eq!(Shape::classify(b'Z', false), Shape::Zulu);
        assert_eq!(Shape::classify(b'Z', true), Shape::ZuluFractional);
        assert_eq!(Shape::classify(b'+', false), Shape::Offset);
        assert_eq!(Shape::classify(b'-', true), Shape::OffsetFractional);
        assert_eq!(Shape::classify(b' ', false), Shape::Invalid);
        assert_eq!(Shape::classify(b'U', false), Shape::Invalid);
        assert!(Shape::Invalid.template().is_none());
    }

    #[test]
    fn template_widths() {
        let widths: Vec<usize> = [
            Shape::Zulu,
            Shape::ZuluFractional,
            Shape::Offset,
            Shape::OffsetFractional,
        ]
        .iter()
        .map(|shape| shape.template().unwrap().width())
        .collect();

        assert_eq!(widths, [20, 24, 25, 29]);
    }

    #[test]
    fn parse_zulu() {
        assert_eq!(millis("1985-04-12T23:20:50Z"), 482_196_050_000);
        assert_eq!(millis("1985-04-12t23:20:50z"), 482_196_050_000);
    }

    #[test]
    fn parse_zulu_fractional() {
        assert_eq!(millis("1985-04-12T23:20:50.520000Z"), 482_196_050_520);
        assert_eq!(millis("1985-04-12T23:20:50.1Z"), 482_196_050_100);
        assert_eq!(millis("1985-04-12T23:20:50.12Z"), 482_196_050_120);
        assert_eq!(millis("1985-04-12T23:20:50.123Z"), 482_196_050_123);
        assert_eq!(millis("1985-04-12T23:20:50.1234Z"), 482_196_050_123);
    }

    #[test]
    fn truncation_is_not_rounding() {
        let t = Lenient.parse("1996-12-19T16:39:57.1239Z").unwrap();

        assert_eq!(t.subsec_millis(), 123);
        assert_eq!(t.subsec_nanos(), 123_000_000);
    }

    #[test]
    fn parse_offset() {
        assert_eq!(millis("1996-12-19T16:39:57-08:00"), 851_042_397_000);
        assert_eq!(millis("1996-12-19T16:39:57+01:30"), 851_008_197_000);
    }

    #[test]
    fn parse_offset_fractional() {
        assert_eq!(millis("1996-12-19T16:39:57.123-01:00"), 851_017_197_123);
        assert_eq!(millis("1996-12-19T16:39:57.123456-01:00"), 851_017_197_123);
        assert_eq!(millis("1996-12-19T16:39:57.123+01:30"), 851_008_197_123);
        assert_eq!(millis("1996-12-19T16:39:57.123456+01:30"), 851_008_197_123);
    }

    #[test]
    fn offset_metadata() {
        let t = Lenient.parse("1996-12-19T16:39:57.123+01:30").unwrap();

        assert_eq!(t.offset(), ZoneOffset::Fixed(90));
        assert_eq!((t.hour(), t.minute(), t.second()), (16, 39, 57));
    }

    #[test]
    fn reject_unqualified_time() {
        assert_eq!(
            error_kind("1996-12-19T16:39:57.123"),
            ParseErrorKind::MissingTimezone
        );
    }

    #[test]
    fn reject_unsigned_time_zone() {
        assert!(Lenient.parse("1996-12-19T16:39:57.123 01:00").is_err());
    }

    #[test]
    fn reject_other_notations() {
        assert_eq!(
            error_kind("1996-12-19T16:39:57UTC+01:00"),
            ParseErrorKind::Malformed
        );
        assert!(Lenient.parse("1996-12-19T16:39:57.203GMT0800").is_err());
    }

    #[test]
    fn reject_missing_t() {
        let err = Lenient.parse("1996-12-19 16:39:57.123Z").unwrap_err();

        assert_eq!(err.kind(), ParseErrorKind::Malformed);
        assert_eq!(err.position(), Some(10));
        assert_eq!(err.input(), "1996-12-19 16:39:57.123Z");
    }

    #[test]
    fn reject_too_short() {
        assert_eq!(error_kind("1996-12-19T16:39:57"), ParseErrorKind::TooShort);
        assert_eq!(error_kind(""), ParseErrorKind::TooShort);
    }

    #[test]
    fn reject_trailing_characters() {
        let err = Lenient.parse("1985-04-12T23:20:50Zx").unwrap_err();

        assert_eq!(err.kind(), ParseErrorKind::Malformed);
        assert_eq!(err.position(), Some(20));
        assert_eq!(
            Lenient.parse("1996-12-19T16:39:57.123+01:30:00").unwrap_err().position(),
            Some(29)
        );
    }

    #[test]
    fn reject_invalid_offset() {
        let text = "1996-12-19T16:39:57.123456-01:60";
        let err = Lenient.parse(text).unwrap_err();

        assert_eq!(err.kind(), ParseErrorKind::InvalidOffset);
        assert_eq!(err.input(), text);
    }

    #[test]
    fn reject_look_alike_minus() {
        assert!(Lenient.parse("1996-12-19T16:39:57.123\u{2212}01:30").is_err());
        assert!(Lenient.parse("1996-12-19T16:39:57\u{2212}01:30").is_err());
    }

    #[test]
    fn calendar_checks() {
        assert_eq!(
            error_kind("1996-13-19T16:39:57Z"),
            ParseErrorKind::InvalidDate(DateTimeError::InvalidMonth(13))
        );
        assert_eq!(
            error_kind("2023-02-29T16:39:57Z"),
            ParseErrorKind::InvalidDate(DateTimeError::InvalidDayOfMonth(29))
        );
        assert!(Lenient.parse("2000-02-29T00:00:00Z").is_ok());
        assert_eq!(
            error_kind("0000-01-01T00:00:00Z"),
            ParseErrorKind::InvalidDate(DateTimeError::InvalidYear(0))
        );
    }

    #[test]
    fn parse_zone() {
        assert_eq!(
            Lenient
                .parse_zone("1996-12-19T16:39:57.123456-01:00")
                .unwrap()
                .id(),
            "GMT-01:00"
        );
        assert_eq!(
            Lenient.parse_zone("1985-04-12T23:20:50Z").unwrap().id(),
            "UTC"
        );
        assert_eq!(
            Lenient
                .parse_zone("1996-12-19T16:39:57.123456+13:00")
                .unwrap()
                .id(),
            "GMT+13:00"
        );
        assert_eq!(
            Lenient.parse_zone("1996-12-19T16:39:57.123456-00:00"),
            Ok(ZoneOffset::Unknown)
        );
    }

    #[test]
    fn parse_zone_rejects_invalid_offsets() {
        assert_eq!(
            Lenient
                .parse_zone("1996-12-19T16:39:57.123456-01:60")
                .unwrap_err()
                .kind(),
            ParseErrorKind::InvalidOffset
        );
        assert!(Lenient.parse_zone("1996-12-19T16:39:57.203GMT0800").is_err());
        assert!(Lenient.parse_zone("1996-12-19T16:39:57UTC+01:00").is_err());
    }

    #[test]
    fn parse_precise() {
        let precise = Lenient.parse_precise("1996-12-19T16:39:57.123+01:30").unwrap();

        assert_eq!(
            precise.as_decimal(),
            &BigDecimal::from_str("851008197.123").unwrap()
        );
        assert!(Lenient
            .parse_precise("1996-12-19T16:39:57.123\u{2212}01:30")
            .is_err());
    }

    #[test]
    fn parse_precise_requires_fraction() {
        let err = Lenient
            .parse_precise("1996-12-19T16:39:57-08:00")
            .unwrap_err();

        assert_eq!(err.kind(), ParseErrorKind::MissingTimezone);
        assert!(Lenient.parse_precise("1985-04-12T23:20:50Z").is_err());
    }
}
