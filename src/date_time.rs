//! Calendar arithmetic.

use super::DateTimeError;

const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAYS_IN_MONTH_LEAP: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DOY_AT_MONTH: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const DOY_AT_MONTH_LEAP: [i32; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Number of days between 0000-01-01 and the Unix epoch.
const UNIX_EPOCH_DAYS: i64 = days_from_year_0(1970);

pub(crate) const MAX_YEAR: u16 = 9999;

/// Returns whether the year is a leap year.
///
/// The argument is the proleptic Gregorian year, with the ISO 8601
/// interpretation of year 0 as year 1 BC. Year 0 does not obey the usual rule
/// and is considered a leap year.
pub(crate) const fn is_leap(year: i64) -> bool {
    (year & 0b11) == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Calculates the number of days in a month.
///
/// The month must be in the range 1 to 12.
pub(crate) const fn days_in_month(year: i32, month: u8) -> u8 {
    let month_idx = (month - 1) as usize;

    if is_leap(year as i64) {
        DAYS_IN_MONTH_LEAP[month_idx]
    } else {
        DAYS_IN_MONTH[month_idx]
    }
}

/// Calculates the 0-based day of the year.
const fn day_of_year(year: i32, month: u8, day: u8) -> i32 {
    let month_idx = (month - 1) as usize;
    let table = if is_leap(year as i64) {
        &DOY_AT_MONTH_LEAP
    } else {
        &DOY_AT_MONTH
    };

    (day - 1) as i32 + table[month_idx]
}

/// Returns the number of elapsed days since the first day of year 0 to the
/// first day of the provided year.
///
/// The result is negative for negative years.
const fn days_from_year_0(year: i32) -> i64 {
    let year = year as i64;
    let offset = (year > 0) as i64;
    let y = year - offset;
    let m4 = y / 4 + offset;
    let m100 = y / 100;
    let m400 = m100 / 4;

    year * 365 + m4 - m100 + m400
}

/// Parses a fixed-width field made of ASCII digits only.
///
/// Returns `None` if the field is empty, contains anything other than `0-9`,
/// or is too wide for a `u32`.
pub(crate) fn parse_field(digits: &[u8]) -> Option<u32> {
    if digits.is_empty() || digits.len() > 9 {
        return None;
    }

    digits.iter().try_fold(0u32, |acc, &c| {
        c.is_ascii_digit().then(|| acc * 10 + (c - b'0') as u32)
    })
}

/// Checks that the date-time fields designate an existing calendar date and a
/// valid time of day.
///
/// Second 60 is admitted so that leap seconds can be represented.
pub(crate) fn validate(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    min: u8,
    sec: u8,
    nano: u32,
) -> Result<(), DateTimeError> {
    if year == 0 || year > MAX_YEAR {
        return Err(DateTimeError::InvalidYear(year));
    }
    if !(1..=12).contains(&month) {
        return Err(DateTimeError::InvalidMonth(month));
    }
    if day < 1 || day > days_in_month(year as i32, month) {
        return Err(DateTimeError::InvalidDayOfMonth(day));
    }
    if hour > 23 {
        return Err(DateTimeError::InvalidHour(hour));
    }
    if min > 59 {
        return Err(DateTimeError::InvalidMinute(min));
    }
    if sec > 60 {
        return Err(DateTimeError::InvalidSecond(sec));
    }
    if nano > 999_999_999 {
        return Err(DateTimeError::InvalidNanosecond(nano));
    }

    Ok(())
}

/// Returns the number of seconds elapsed since 1970-01-01 00:00:00 for a
/// validated local date-time, ignoring any time zone offset.
///
/// A leap second (second 60) coincides with second 0 of the following minute.
pub(crate) fn local_secs_since_unix_epoch(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    min: u8,
    sec: u8,
) -> i64 {
    let year = year as i32;
    let days = days_from_year_0(year) + day_of_year(year, month, day) as i64 - UNIX_EPOCH_DAYS;

    days * 86400 + hour as i64 * 3600 + min as i64 * 60 + sec as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap(2000));
        assert!(is_leap(2024));
        assert!(is_leap(0));
        assert!(!is_leap(1900));
        assert!(!is_leap(2023));
    }

    #[test]
    fn february_length() {
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
    }

    #[test]
    fn unix_epoch() {
        assert_eq!(UNIX_EPOCH_DAYS, 719_528);
        assert_eq!(local_secs_since_unix_epoch(1970, 1, 1, 0, 0, 0), 0);
        assert_eq!(local_secs_since_unix_epoch(1969, 12, 31, 23, 59, 59), -1);
    }

    #[test]
    fn known_dates() {
        assert_eq!(
            local_secs_since_unix_epoch(1985, 4, 12, 23, 20, 50),
            482_196_050
        );
        assert_eq!(
            local_secs_since_unix_epoch(2009, 2, 13, 23, 31, 30),
            1_234_567_890
        );
        assert_eq!(
            local_secs_since_unix_epoch(2000, 3, 1, 0, 0, 0),
            951_868_800
        );
    }

    #[test]
    fn leap_second_rolls_over() {
        assert_eq!(
            local_secs_since_unix_epoch(1990, 12, 31, 23, 59, 60),
            local_secs_since_unix_epoch(1991, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn fields() {
        assert_eq!(parse_field(b"1996"), Some(1996));
        assert_eq!(parse_field(b"07"), Some(7));
        assert_eq!(parse_field(b"123456789"), Some(123_456_789));
        assert_eq!(parse_field(b""), None);
        assert_eq!(parse_field(b"1a"), None);
        assert_eq!(parse_field(b"+1"), None);
        assert_eq!(parse_field(b"1234567890"), None);
    }

    #[test]
    fn validation() {
        assert_eq!(validate(2000, 2, 29, 0, 0, 0, 0), Ok(()));
        assert_eq!(validate(1990, 12, 31, 23, 59, 60, 999_999_999), Ok(()));
        assert_eq!(validate(1, 1, 1, 0, 0, 0, 0), Ok(()));
        assert_eq!(
            validate(0, 1, 1, 0, 0, 0, 0),
            Err(DateTimeError::InvalidYear(0))
        );
        assert_eq!(
            validate(10000, 1, 1, 0, 0, 0, 0),
            Err(DateTimeError::InvalidYear(10000))
        );
        assert_eq!(
            validate(1900, 2, 29, 0, 0, 0, 0),
            Err(DateTimeError::InvalidDayOfMonth(29))
        );
        assert_eq!(
            validate(2024, 4, 31, 0, 0, 0, 0),
            Err(DateTimeError::InvalidDayOfMonth(31))
        );
        assert_eq!(
            validate(2024, 1, 0, 0, 0, 0, 0),
            Err(DateTimeError::InvalidDayOfMonth(0))
        );
        assert_eq!(
            validate(2024, 13, 1, 0, 0, 0, 0),
            Err(DateTimeError::InvalidMonth(13))
        );
        assert_eq!(
            validate(2024, 1, 1, 24, 0, 0, 0),
            Err(DateTimeError::InvalidHour(24))
        );
        assert_eq!(
            validate(2024, 1, 1, 0, 60, 0, 0),
            Err(DateTimeError::InvalidMinute(60))
        );
        assert_eq!(
            validate(2024, 1, 1, 0, 0, 61, 0),
            Err(DateTimeError::InvalidSecond(61))
        );
        assert_eq!(
            validate(2024, 1, 1, 0, 0, 0, 1_000_000_000),
            Err(DateTimeError::InvalidNanosecond(1_000_000_000))
        );
    }
}
