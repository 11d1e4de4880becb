//! Grammar-validating parsing tier.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::date_time::parse_field;
use crate::precision::fraction_to_nanos;
use crate::zone::offset_from_parts;
use crate::{ParseError, ParseErrorKind, Rfc3339Parser, Timestamp, ZoneOffset};

/// Length of the shortest valid date-time, `yyyy-MM-ddTHH:mm:ssZ`.
const MIN_LENGTH: usize = 20;

/// The RFC 3339 `date-time` production.
///
/// Month, day, hour, minute, second and offset components are range-checked
/// by the grammar; month lengths are checked afterwards. Second 60 admits
/// leap seconds.
const DATE_TIME_GRAMMAR: &str = concat!(
    r"^(?P<year>[0-9]{4})-(?P<month>0[1-9]|1[0-2])-(?P<day>[0-2][0-9]|3[01])",
    r"[Tt](?P<hour>[01][0-9]|2[0-3]):(?P<minute>[0-5][0-9]):(?P<second>[0-5][0-9]|60)",
    r"(?:\.(?P<fraction>[0-9]+))?",
    r"(?:(?P<zulu>[Zz])|(?P<sign>[+-])(?P<offset_hour>[01][0-9]|2[0-3]):(?P<offset_minute>[0-5][0-9]))$",
);

static GRAMMAR: OnceLock<Regex> = OnceLock::new();

fn grammar() -> &'static Regex {
    GRAMMAR.get_or_init(|| Regex::new(DATE_TIME_GRAMMAR).expect("RFC 3339 grammar must compile"))
}

fn field(captures: &Captures<'_>, name: &str) -> Option<u32> {
    captures
        .name(name)
        .and_then(|m| parse_field(m.as_str().as_bytes()))
}

/// The grammar-validating parsing tier.
///
/// The whole input must match the RFC 3339 `date-time` production, with `T`
/// and `Z` in either case, and the day must exist in its month, accounting
/// for leap years. Fields are then read directly from the match. Fractional
/// seconds are truncated to nanoseconds.
///
/// # Examples
///
/// ```
/// use rfc3339_parser::{ParseErrorKind, Rfc3339Parser, Strict};
///
/// assert!(Strict::is_valid("2000-02-29T00:00:00Z"));
/// assert!(!Strict::is_valid("1900-02-29T00:00:00Z"));
///
/// let t = Strict.parse("1985-04-12T23:20:50.52Z").unwrap();
/// assert_eq!(t.unix_timestamp_millis(), 482_196_050_520);
///
/// let err = Strict.parse("1996-12-19T16:39:57.123").unwrap_err();
/// assert_eq!(err.kind(), ParseErrorKind::Malformed);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Strict;

impl Strict {
    /// Returns whether the input is a valid RFC 3339 date-time.
    ///
    /// This never fails: any syntactic or calendar violation yields `false`.
    pub fn is_valid(text: &str) -> bool {
        Self::decompose(text).is_ok()
    }

    /// Validates the input and reads its fields.
    fn decompose(text: &str) -> Result<Timestamp, ParseError> {
        if text.len() < MIN_LENGTH {
            return Err(ParseError::new(ParseErrorKind::TooShort, text));
        }

        let malformed = || ParseError::new(ParseErrorKind::Malformed, text);
        let captures = grammar().captures(text).ok_or_else(malformed)?;

        let year = field(&captures, "year").ok_or_else(malformed)?;
        let month = field(&captures, "month").ok_or_else(malformed)?;
        let day = field(&captures, "day").ok_or_else(malformed)?;
        let hour = field(&captures, "hour").ok_or_else(malformed)?;
        let minute = field(&captures, "minute").ok_or_else(malformed)?;
        let second = field(&captures, "second").ok_or_else(malformed)?;
        let nanos = match captures.name("fraction") {
            Some(fraction) => fraction_to_nanos(fraction.as_str().as_bytes()).ok_or_else(malformed)?,
            None => 0,
        };

        let offset = if captures.name("zulu").is_some() {
            ZoneOffset::Utc
        } else {
            let negative = captures.name("sign").map(|m| m.as_str()) == Some("-");
            let offset_hour = field(&captures, "offset_hour").ok_or_else(malformed)?;
            let offset_minute = field(&captures, "offset_minute").ok_or_else(malformed)?;

            offset_from_parts(negative, offset_hour, offset_minute)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidOffset, text))?
        };

        Timestamp::new(
            year as u16,
            month as u8,
            day as u8,
            hour as u8,
            minute as u8,
            second as u8,
            nanos,
            offset,
        )
        .map_err(|err| ParseError::new(ParseErrorKind::InvalidDate(err), text))
    }
}

impl Rfc3339Parser for Strict {
    fn parse(&self, text: &str) -> Result<Timestamp, ParseError> {
        Self::decompose(text).map_err(|err| {
            trace!("strict parse rejected {:?}: {}", text, err.kind());
            err
        })
    }

    fn parse_zone(&self, text: &str) -> Result<ZoneOffset, ParseError> {
        self.parse(text).map(|timestamp| timestamp.offset())
    }
}
