//! Error types.

use std::fmt;

/// The error type returned when a [`Timestamp`](crate::Timestamp) cannot be
/// represented by the target calendar type.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutOfRangeError(pub(crate) ());

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str("timestamp out of representable range")
    }
}

impl std::error::Error for OutOfRangeError {}

/// The error type returned when date-time components are out of range or do
/// not form a valid calendar date.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DateTimeError {
    /// The year is not between 1 and 9999.
    InvalidYear(u16),
    /// The month is not between 1 and 12.
    InvalidMonth(u8),
    /// The day of the month is less than 1, or more than the maximum value for
    /// this combination of year and month.
    InvalidDayOfMonth(u8),
    /// The hour field value is not between 0 and 23.
    InvalidHour(u8),
    /// The minute field value is not between 0 and 59.
    InvalidMinute(u8),
    /// The second field value is not between 0 and 60.
    InvalidSecond(u8),
    /// The nanosecond field value is more than 999 999 999.
    InvalidNanosecond(u32),
    /// The offset from UTC is more than 23 hours and 59 minutes, in minutes.
    InvalidOffset(i16),
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidYear(year) => write!(fmt, "year numeral '{}' is not valid", year),
            Self::InvalidMonth(month) => write!(fmt, "month numeral '{}' is not valid", month),
            Self::InvalidDayOfMonth(day) => {
                write!(fmt, "day of month '{}' is not valid for this date", day)
            }
            Self::InvalidHour(hour) => write!(fmt, "hour numeral '{}' is not valid", hour),
            Self::InvalidMinute(min) => write!(fmt, "minute numeral '{}' is not valid", min),
            Self::InvalidSecond(sec) => write!(fmt, "second numeral '{}' is not valid", sec),
            Self::InvalidNanosecond(nanosec) => {
                write!(fmt, "nanosecond value '{}' is not valid", nanosec)
            }
            Self::InvalidOffset(minutes) => {
                write!(fmt, "offset of {} minutes is not valid", minutes)
            }
        }
    }
}

impl std::error::Error for DateTimeError {}

/// The reason an RFC 3339 string was rejected.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// The input is shorter than the 20 characters of the smallest valid
    /// date-time (`yyyy-MM-ddTHH:mm:ssZ`).
    TooShort,
    /// The input does not match the date-time grammar or layout.
    Malformed,
    /// No `Z`, `+` or `-` time zone designator follows the time of day.
    MissingTimezone,
    /// The fractional seconds are empty or contain a non-digit.
    InvalidFraction,
    /// The numeric offset is not a valid `±hh:mm` offset.
    InvalidOffset,
    /// The input is well-formed but one of its fields is out of range, e.g.
    /// the day exceeds the length of the month.
    InvalidDate(DateTimeError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => fmt.write_str("input is too short"),
            Self::Malformed => fmt.write_str("input does not match the date-time format"),
            Self::MissingTimezone => fmt.write_str("the time zone notation is missing or invalid"),
            Self::InvalidFraction => fmt.write_str("the fractional seconds are invalid"),
            Self::InvalidOffset => fmt.write_str("the time zone offset is invalid"),
            Self::InvalidDate(err) => fmt::Display::fmt(err, fmt),
        }
    }
}

/// The error type returned when a string is not a valid RFC 3339 date-time.
///
/// The error keeps a copy of the original input and, when the failure can be
/// pinned down, the byte position at which it was detected.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    kind: ParseErrorKind,
    input: String,
    position: Option<usize>,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, input: &str) -> Self {
        Self {
            kind,
            input: input.to_owned(),
            position: None,
        }
    }

    pub(crate) fn at(kind: ParseErrorKind, input: &str, position: usize) -> Self {
        Self {
            kind,
            input: input.to_owned(),
            position: Some(position),
        }
    }

    /// Returns the reason for the failure.
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the rejected input, unmodified.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the approximate byte position of the failure, if known.
    pub fn position(&self) -> Option<usize> {
        self.position
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "invalid RFC 3339 date-time <{}>: {}", self.input, self.kind)?;
        if let Some(position) = self.position {
            write!(fmt, " (at position {})", position)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::InvalidDate(err) => Some(err),
            _ => None,
        }
    }
}
