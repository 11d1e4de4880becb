//! Parsers for RFC 3339 date-time strings.
//!
//! # Overview
//!
//! [RFC 3339] is the internet profile of ISO 8601 mandated by many protocols,
//! log formats and APIs. This crate turns such strings into a [`Timestamp`]
//! holding the local date-time fields and a fixed-offset [`ZoneOffset`], or
//! into an exact decimal [`PreciseTimestamp`] which keeps every fractional
//! digit of the input.
//!
//! Two parsing tiers are provided, both implementing [`Rfc3339Parser`]:
//!
//! - [`Strict`] matches the whole input against the RFC 3339 `date-time`
//!   grammar and checks month lengths and leap years before reading the
//!   fields. [`Strict::is_valid`] probes an input without producing a value.
//! - [`Lenient`] classifies the input by the character that follows
//!   `HH:mm:ss` and reads it against one of four fixed-width layouts, with
//!   fractional seconds reduced to milliseconds.
//!
//! [`parse`] and [`is_valid`] are shorthands for the strict tier.
//!
//! [RFC 3339]: https://www.rfc-editor.org/rfc/rfc3339
//!
//!
//! # Design choices and limitations
//!
//! Only the `Z`/`z` and `±hh:mm` time zone notations of RFC 3339 are
//! accepted. Named zones such as `GMT` or `UTC+01:00` are invalid input and
//! are rejected, as are offsets with out-of-range components such as
//! `-01:60`: no parser ever falls back to a default zone.
//!
//! The `-00:00` offset is reported as [`ZoneOffset::Unknown`], following
//! RFC 3339 §4.3: the date-time is interpreted as UTC for computations, but
//! the zone is not asserted to be UTC.
//!
//! A leap second (`23:59:60`) is accepted and kept as second 60; since leap
//! seconds are never accounted for, it designates the same instant as second
//! 0 of the following minute.
//!
//! Timestamps are never formatted back to text.
//!
//!
//! # Features flags
//!
//! ### Support for time-related crates
//!
//! Conversion of a [`Timestamp`] to a `chrono::DateTime` with a fixed offset
//! is available with the `chrono` feature.
//!
//! ### Serialization
//!
//! `Timestamp`, `ZoneOffset` and the error types can be (de)serialized with
//! `serde` by activating the `serde` feature.
//!
//! ### Logging
//!
//! The `logging` feature emits `trace` and `debug` records through the `log`
//! crate when an input is dispatched or rejected.
//!
//!
//! # Examples
//!
//! ```
//! use rfc3339_parser::{Lenient, Rfc3339Parser, Strict, ZoneOffset};
//!
//! let t = Strict.parse("1996-12-19T16:39:57.123+01:30").unwrap();
//! assert_eq!(t.unix_timestamp_millis(), 851_008_197_123);
//! assert_eq!(t.offset(), ZoneOffset::Fixed(90));
//!
//! // The lenient tier agrees on well-formed input.
//! assert_eq!(Lenient.parse("1996-12-19T16:39:57.123+01:30").unwrap(), t);
//!
//! // Digits beyond nanoseconds are kept by the precise timestamp.
//! let precise = Strict.parse_precise("1996-12-19T16:39:57.1234567891+01:30").unwrap();
//! assert_eq!(precise.to_string(), "851008197.1234567891");
//!
//! // Calendar-invalid and unqualified date-times are rejected.
//! assert!(Strict.parse("1900-02-29T00:00:00Z").is_err());
//! assert!(Strict.parse("1996-12-19T16:39:57.123").is_err());
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[macro_use]
mod logging;

mod date_time;
mod errors;
mod lenient;
mod precision;
mod strict;
mod timestamp;
mod zone;

pub use errors::{DateTimeError, OutOfRangeError, ParseError, ParseErrorKind};
pub use lenient::Lenient;
pub use precision::reduce_precision;
pub use strict::Strict;
pub use timestamp::{PreciseTimestamp, Timestamp, ZoneOffset};

/// The operations shared by both parsing tiers.
///
/// Implementations are stateless and can be used concurrently from any number
/// of threads.
pub trait Rfc3339Parser {
    /// Parses a date-time into its fields and time zone.
    fn parse(&self, text: &str) -> Result<Timestamp, ParseError>;

    /// Parses a date-time and returns its time zone only.
    ///
    /// `-00:00` yields [`ZoneOffset::Unknown`], which is distinct from both
    /// `Z` and `+00:00`.
    fn parse_zone(&self, text: &str) -> Result<ZoneOffset, ParseError>;

    /// Parses a date-time into an exact decimal number of seconds since
    /// 1970-01-01 00:00:00 UTC.
    ///
    /// The input is first parsed with [`parse`](Self::parse), so it is
    /// subject to the same validation. The whole seconds of the result are
    /// those of the parsed [`Timestamp`]; the fractional part is made of the
    /// fractional digits of the input, neither truncated nor padded.
    ///
    /// The input must have fractional seconds: the time zone designator is
    /// looked up past the time of day, and a date-time such as
    /// `1985-04-12T23:20:50Z` fails with
    /// [`ParseErrorKind::MissingTimezone`].
    fn parse_precise(&self, text: &str) -> Result<PreciseTimestamp, ParseError> {
        let timestamp = self.parse(text)?;

        precision::compose_precise(text, timestamp.unix_timestamp())
    }
}

/// Parses a date-time with the [`Strict`] tier.
///
/// # Examples
///
/// ```
/// let t = rfc3339_parser::parse("1985-04-12T23:20:50Z").unwrap();
/// assert_eq!(t.unix_timestamp(), 482_196_050);
/// ```
pub fn parse(text: &str) -> Result<Timestamp, ParseError> {
    Strict.parse(text)
}

/// Returns whether the input is a valid RFC 3339 date-time.
///
/// See [`Strict::is_valid`].
pub fn is_valid(text: &str) -> bool {
    Strict::is_valid(text)
}
