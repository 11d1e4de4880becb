//! Parsed date-time values.

use std::fmt;

use bigdecimal::BigDecimal;

use crate::date_time;
use crate::DateTimeError;
#[cfg(feature = "chrono")]
use crate::OutOfRangeError;

const NANOS_PER_MILLI: u32 = 1_000_000;

/// The largest offset magnitude in minutes, i.e. 23:59.
pub(crate) const MAX_OFFSET_MINUTES: i16 = 23 * 60 + 59;

/// The time zone of an RFC 3339 date-time.
///
/// Only fixed offsets exist in RFC 3339: there is no daylight-saving or
/// historical-rule behavior attached to a `ZoneOffset`.
///
/// # Examples
///
/// ```
/// use rfc3339_parser::{Rfc3339Parser, Strict, ZoneOffset};
///
/// let zone = Strict.parse_zone("1996-12-19T16:39:57+01:30").unwrap();
/// assert_eq!(zone, ZoneOffset::Fixed(90));
/// assert_eq!(zone.id(), "GMT+01:30");
///
/// // RFC 3339 §4.3: `-00:00` means the local offset is unknown.
/// let zone = Strict.parse_zone("1996-12-19T16:39:57-00:00").unwrap();
/// assert!(zone.is_unknown());
/// assert_eq!(zone.minutes(), 0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneOffset {
    /// UTC, designated by `Z` or `z`.
    Utc,
    /// A signed offset from UTC in minutes, designated by `±hh:mm`.
    ///
    /// A `+00:00` offset is a genuine zero offset and is distinct from both
    /// [`Utc`](ZoneOffset::Utc) and [`Unknown`](ZoneOffset::Unknown).
    Fixed(i16),
    /// An unknown local offset, designated by `-00:00`.
    ///
    /// The date-time is interpreted as UTC for the computation of the instant.
    Unknown,
}

impl ZoneOffset {
    /// Identifier of the UTC zone.
    pub const UTC_ID: &'static str = "UTC";

    /// Identifier of the unknown local offset.
    pub const UNKNOWN_ID: &'static str = "Etc/Unknown";

    /// Returns the offset from UTC in minutes applied when computing the
    /// instant.
    pub const fn minutes(&self) -> i16 {
        match self {
            Self::Utc | Self::Unknown => 0,
            Self::Fixed(minutes) => *minutes,
        }
    }

    /// Returns `true` for the `-00:00` unknown local offset.
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Returns the display identifier of the zone: `UTC`, `GMT±hh:mm` or
    /// `Etc/Unknown`.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => fmt.write_str(Self::UTC_ID),
            Self::Unknown => fmt.write_str(Self::UNKNOWN_ID),
            Self::Fixed(minutes) => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.unsigned_abs();
                write!(fmt, "GMT{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

/// A date-time parsed from an RFC 3339 string.
///
/// The fields are the local date and time as written in the input, together
/// with the time zone that relates them to UTC. Fractional seconds are kept
/// with nanosecond precision; further digits are truncated.
///
/// # Examples
///
/// ```
/// use rfc3339_parser::{Rfc3339Parser, Strict, ZoneOffset};
///
/// let t = Strict.parse("1996-12-19T16:39:57.123+01:30").unwrap();
///
/// assert_eq!((t.year(), t.month(), t.day()), (1996, 12, 19));
/// assert_eq!((t.hour(), t.minute(), t.second()), (16, 39, 57));
/// assert_eq!(t.subsec_millis(), 123);
/// assert_eq!(t.offset(), ZoneOffset::Fixed(90));
/// assert_eq!(t.unix_timestamp_millis(), 851_008_197_123);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTimestamp")
)]
pub struct Timestamp {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
    offset: ZoneOffset,
}

impl Timestamp {
    /// Creates a timestamp from its local date-time fields and time zone.
    ///
    /// Returns an error if a field is out of range, if the day does not
    /// exist in the given month, or if a fixed offset exceeds 23:59. Second 60
    /// is accepted as a leap second.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3339_parser::{DateTimeError, Timestamp, ZoneOffset};
    ///
    /// assert!(Timestamp::new(2000, 2, 29, 0, 0, 0, 0, ZoneOffset::Utc).is_ok());
    /// assert_eq!(
    ///     Timestamp::new(1900, 2, 29, 0, 0, 0, 0, ZoneOffset::Utc),
    ///     Err(DateTimeError::InvalidDayOfMonth(29))
    /// );
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        nanos: u32,
        offset: ZoneOffset,
    ) -> Result<Self, DateTimeError> {
        date_time::validate(year, month, day, hour, minute, second, nanos)?;
        if offset.minutes().unsigned_abs() > MAX_OFFSET_MINUTES.unsigned_abs() {
            return Err(DateTimeError::InvalidOffset(offset.minutes()));
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            nanos,
            offset,
        })
    }

    /// Returns the year.
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the month, from 1 to 12.
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month, from 1 to 31.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the hour, from 0 to 23.
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute, from 0 to 59.
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the second, from 0 to 60.
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Returns the sub-second fractional part in nanoseconds.
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// Returns the sub-second fractional part in whole milliseconds.
    pub const fn subsec_millis(&self) -> u32 {
        self.nanos / NANOS_PER_MILLI
    }

    /// Returns the time zone.
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    /// Returns the number of whole seconds since 1970-01-01 00:00:00 UTC.
    ///
    /// Seconds are always rounded towards `-∞`: the sub-second part returned
    /// by [`subsec_nanos()`](Self::subsec_nanos) points towards the future
    /// even for dates before 1970.
    pub fn unix_timestamp(&self) -> i64 {
        date_time::local_secs_since_unix_epoch(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        ) - self.offset.minutes() as i64 * 60
    }

    /// Returns the number of milliseconds since 1970-01-01 00:00:00 UTC,
    /// truncating sub-millisecond digits.
    pub fn unix_timestamp_millis(&self) -> i64 {
        self.unix_timestamp() * 1000 + self.subsec_millis() as i64
    }

    /// Returns a `chrono::DateTime` with the fixed offset of the timestamp.
    ///
    /// An unknown local offset maps to a zero offset. A leap second is
    /// expressed the way `chrono` does, as second 59 with a nanosecond value
    /// of one second or more.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfc3339_parser::{Rfc3339Parser, Strict};
    ///
    /// let t = Strict.parse("1996-12-19T16:39:57.123-08:00").unwrap();
    /// let date_time = t.to_chrono_date_time().unwrap();
    ///
    /// assert_eq!(date_time.timestamp_millis(), 851_042_397_123);
    /// assert_eq!(date_time.offset().local_minus_utc(), -8 * 3600);
    /// ```
    #[cfg(feature = "chrono")]
    pub fn to_chrono_date_time(
        &self,
    ) -> Result<chrono::DateTime<chrono::FixedOffset>, OutOfRangeError> {
        use chrono::TimeZone as _;

        let (second, nanos) = if self.second == 60 {
            (59, self.nanos + 1_000_000_000)
        } else {
            (self.second, self.nanos)
        };

        let date = chrono::NaiveDate::from_ymd_opt(
            self.year as i32,
            self.month as u32,
            self.day as u32,
        );
        let time = chrono::NaiveTime::from_hms_nano_opt(
            self.hour as u32,
            self.minute as u32,
            second as u32,
            nanos,
        );
        let offset = chrono::FixedOffset::east_opt(self.offset.minutes() as i32 * 60);

        match (date, time, offset) {
            (Some(date), Some(time), Some(offset)) => offset
                .from_local_datetime(&date.and_time(time))
                .single()
                .ok_or(OutOfRangeError(())),
            _ => Err(OutOfRangeError(())),
        }
    }
}

/// Unchecked fields of a deserialized [`Timestamp`], validated by
/// [`Timestamp::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(rename = "Timestamp")]
struct RawTimestamp {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanos: u32,
    offset: ZoneOffset,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTimestamp> for Timestamp {
    type Error = DateTimeError;

    fn try_from(raw: RawTimestamp) -> Result<Self, Self::Error> {
        Self::new(
            raw.year,
            raw.month,
            raw.day,
            raw.hour,
            raw.minute,
            raw.second,
            raw.nanos,
            raw.offset,
        )
    }
}

/// An exact decimal timestamp in seconds since 1970-01-01 00:00:00 UTC.
///
/// The fractional part keeps every digit written in the input, without the
/// nanosecond truncation applied to [`Timestamp`].
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bigdecimal::BigDecimal;
/// use rfc3339_parser::{Rfc3339Parser, Strict};
///
/// let t = Strict.parse_precise("1985-04-12T23:20:50.123456789012Z").unwrap();
///
/// assert_eq!(t.unix_timestamp(), 482_196_050);
/// assert_eq!(
///     t.as_decimal(),
///     &BigDecimal::from_str("482196050.123456789012").unwrap()
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreciseTimestamp {
    secs: i64,
    value: BigDecimal,
}

impl PreciseTimestamp {
    pub(crate) fn new(secs: i64, value: BigDecimal) -> Self {
        Self { secs, value }
    }

    /// Returns the number of whole seconds, equal to
    /// [`Timestamp::unix_timestamp`] for the same input.
    pub const fn unix_timestamp(&self) -> i64 {
        self.secs
    }

    /// Returns the exact timestamp.
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.value
    }

    /// Consumes the timestamp and returns the exact decimal value.
    pub fn into_decimal(self) -> BigDecimal {
        self.value
    }
}

impl fmt::Display for PreciseTimestamp {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, fmt)
    }
}

impl From<PreciseTimestamp> for BigDecimal {
    fn from(timestamp: PreciseTimestamp) -> Self {
        timestamp.value
    }
}
