//! Monotonic timestamp construction.
//!
//! # Overview
//!
//! A timestamp is built up one precision level at a time — year, then
//! month, then day, then minute-and-offset, then second, then fraction —
//! and each step is only legal from the precision immediately below it.
//! [`TimestampBuilder`] enforces that order at runtime (returning
//! [`IonNumericError::InvalidTimestamp`] on a skipped or repeated step)
//! rather than encoding it in the type system, a hand-rolled,
//! runtime-validated builder in the same style as a typical
//! `ClientConfig`/`ClientConfigBuilder` split rather than a type-state
//! pattern.
//!
//! # Invariants
//!
//! - Years are restricted to `0001..=9999` (no years outside this range,
//!   and no leap seconds).
//! - `for_day` validates the day against the actual month/year, including
//!   leap years, via [`chrono::NaiveDate`].
//! - A fractional second's coefficient is always less than `10^-exponent`
//!   (i.e. the fraction is strictly less than one second).

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{IonNumericError, IonNumericResult};
use crate::timestamp::precision::Precision;

/// A timestamp's UTC offset: either known (a signed minute count in
/// `-1439..=1439`) or unknown (`-00:00` in text, negative-zero `VarInt` on
/// the wire).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    known: bool,
    minutes: i16,
}

impl Offset {
    /// The unknown/local offset, `-00:00`.
    #[must_use]
    pub const fn unknown() -> Self {
        Self { known: false, minutes: 0 }
    }

    /// UTC, `Z`/`+00:00`.
    #[must_use]
    pub const fn utc() -> Self {
        Self { known: true, minutes: 0 }
    }

    /// A known offset of `minutes` from UTC.
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if `minutes` is outside
    /// `-1439..=1439`.
    pub fn known(minutes: i16) -> IonNumericResult<Self> {
        if !(-1439..=1439).contains(&minutes) {
            return Err(IonNumericError::invalid_timestamp(format!("offset {minutes} minutes out of range")));
        }
        Ok(Self { known: true, minutes })
    }

    /// Whether the offset is actually known.
    #[must_use]
    pub const fn is_known(self) -> bool {
        self.known
    }

    /// The offset in minutes (`0` if unknown, matching local-time-as-UTC
    /// convention for comparison).
    #[must_use]
    pub const fn minutes(self) -> i16 {
        self.minutes
    }
}

/// A decoded or hand-built Ion timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp {
    precision: Precision,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    fraction_coefficient: BigUint,
    fraction_exponent: i32,
    offset: Offset,
}

impl Timestamp {
    /// This value's precision.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    /// The year (`0001..=9999`).
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// The month (`1..=12`), meaningful at [`Precision::Month`] and finer.
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// The day of month, meaningful at [`Precision::Day`] and finer.
    #[must_use]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// The hour (`0..=23`), meaningful at [`Precision::Minute`] and finer.
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute (`0..=59`), meaningful at [`Precision::Minute`] and finer.
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// The second (`0..=59`), meaningful at [`Precision::Second`] and finer.
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// The fractional second as `coefficient * 10^exponent`, meaningful at
    /// [`Precision::Fraction`].
    #[must_use]
    pub const fn fraction(&self) -> (&BigUint, i32) {
        (&self.fraction_coefficient, self.fraction_exponent)
    }

    /// The UTC offset, meaningful at [`Precision::Minute`] and finer.
    #[must_use]
    pub const fn offset(&self) -> Offset {
        self.offset
    }

    /// Starts building a new timestamp from its year.
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if `year` is `0` (years
    /// run `0001..=9999`; year `0` is out of range).
    pub fn builder(year: u16) -> IonNumericResult<TimestampBuilder> {
        TimestampBuilder::for_year(year)
    }
}

/// Builds a [`Timestamp`] one precision level at a time.
#[derive(Clone, Debug)]
pub struct TimestampBuilder {
    precision: Precision,
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    fraction_coefficient: BigUint,
    fraction_exponent: i32,
    offset: Offset,
}

fn require_precision(actual: Precision, expected: Precision, step: &str) -> IonNumericResult<()> {
    if actual != expected {
        return Err(IonNumericError::invalid_timestamp(format!(
            "{step} requires precision {expected:?}, builder is currently at {actual:?}"
        )));
    }
    Ok(())
}

impl TimestampBuilder {
    /// Starts from a bare year.
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if `year` is `0`.
    pub fn for_year(year: u16) -> IonNumericResult<Self> {
        if year == 0 {
            return Err(IonNumericError::invalid_timestamp("year must be in 0001..=9999"));
        }
        Ok(Self {
            precision: Precision::Year,
            year,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            fraction_coefficient: BigUint::zero(),
            fraction_exponent: 0,
            offset: Offset::unknown(),
        })
    }

    /// Adds the month, advancing from [`Precision::Year`] to
    /// [`Precision::Month`].
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if called out of order
    /// or `month` is outside `1..=12`.
    pub fn for_month(mut self, month: u8) -> IonNumericResult<Self> {
        require_precision(self.precision, Precision::Year, "for_month")?;
        if !(1..=12).contains(&month) {
            return Err(IonNumericError::invalid_timestamp(format!("month {month} out of range")));
        }
        self.month = month;
        self.precision = Precision::Month;
        Ok(self)
    }

    /// Adds the day, advancing from [`Precision::Month`] to
    /// [`Precision::Day`].
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if called out of order
    /// or `day` is not valid for this year/month (leap years included).
    pub fn for_day(mut self, day: u8) -> IonNumericResult<Self> {
        require_precision(self.precision, Precision::Month, "for_day")?;
        let valid = chrono::NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(day)).is_some();
        if !valid {
            return Err(IonNumericError::invalid_timestamp(format!(
                "{day} is not a valid day for {}-{:02}",
                self.year, self.month
            )));
        }
        self.day = day;
        self.precision = Precision::Day;
        Ok(self)
    }

    /// Adds the hour, minute, and UTC offset, advancing from
    /// [`Precision::Day`] to [`Precision::Minute`].
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if called out of order
    /// or `hour`/`minute` are out of range.
    pub fn for_minute(mut self, hour: u8, minute: u8, offset: Offset) -> IonNumericResult<Self> {
        require_precision(self.precision, Precision::Day, "for_minute")?;
        if hour > 23 {
            return Err(IonNumericError::invalid_timestamp(format!("hour {hour} out of range")));
        }
        if minute > 59 {
            return Err(IonNumericError::invalid_timestamp(format!("minute {minute} out of range")));
        }
        self.hour = hour;
        self.minute = minute;
        self.offset = offset;
        self.precision = Precision::Minute;
        Ok(self)
    }

    /// Adds the second, advancing from [`Precision::Minute`] to
    /// [`Precision::Second`].
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if called out of order
    /// or `second` is outside `0..=59` (no leap seconds).
    pub fn for_second(mut self, second: u8) -> IonNumericResult<Self> {
        require_precision(self.precision, Precision::Minute, "for_second")?;
        if second > 59 {
            return Err(IonNumericError::invalid_timestamp(format!("second {second} out of range (no leap seconds)")));
        }
        self.second = second;
        self.precision = Precision::Second;
        Ok(self)
    }

    /// Adds a fractional second (`coefficient * 10^exponent`, `exponent <
    /// 0`), advancing from [`Precision::Second`] to [`Precision::Fraction`].
    ///
    /// # Errors
    ///
    /// Returns [`IonNumericError::InvalidTimestamp`] if called out of order,
    /// `exponent >= 0`, or the fraction is not strictly less than one
    /// second.
    pub fn for_fraction(mut self, coefficient: BigUint, exponent: i32) -> IonNumericResult<Self> {
        require_precision(self.precision, Precision::Second, "for_fraction")?;
        if exponent >= 0 {
            return Err(IonNumericError::invalid_timestamp("fraction exponent must be negative"));
        }
        let bound = BigUint::from(10u32).pow((-exponent) as u32);
        if coefficient >= bound {
            return Err(IonNumericError::invalid_timestamp("fraction must be strictly less than one second"));
        }
        self.fraction_coefficient = coefficient;
        self.fraction_exponent = exponent;
        self.precision = Precision::Fraction;
        Ok(self)
    }

    /// Finishes the timestamp at whatever precision it currently holds.
    #[must_use]
    pub fn build(self) -> Timestamp {
        Timestamp {
            precision: self.precision,
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            fraction_coefficient: self.fraction_coefficient,
            fraction_exponent: self.fraction_exponent,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_full_precision_timestamp() {
        let ts = TimestampBuilder::for_year(2007)
            .unwrap()
            .for_month(2)
            .unwrap()
            .for_day(23)
            .unwrap()
            .for_minute(12, 14, Offset::utc())
            .unwrap()
            .for_second(33)
            .unwrap()
            .for_fraction(BigUint::from(79u32), -3)
            .unwrap()
            .build();
        assert_eq!(ts.precision(), Precision::Fraction);
        assert_eq!(ts.year(), 2007);
        assert_eq!(ts.day(), 23);
        assert_eq!(ts.fraction().0, &BigUint::from(79u32));
    }

    #[test]
    fn rejects_year_zero() {
        assert!(TimestampBuilder::for_year(0).is_err());
    }

    #[test]
    fn rejects_february_29_in_a_non_leap_year() {
        let err = TimestampBuilder::for_year(1900).unwrap().for_month(2).unwrap().for_day(29);
        assert!(err.is_err());
    }

    #[test]
    fn accepts_february_29_in_a_leap_year() {
        assert!(TimestampBuilder::for_year(2000).unwrap().for_month(2).unwrap().for_day(29).is_ok());
        assert!(TimestampBuilder::for_year(2400).unwrap().for_month(2).unwrap().for_day(29).is_ok());
    }

    #[test]
    fn rejects_out_of_order_construction() {
        // for_day before for_month.
        let builder = TimestampBuilder::for_year(2020).unwrap();
        assert!(builder.for_day(1).is_err());
    }

    #[test]
    fn rejects_fraction_not_less_than_one_second() {
        let builder = TimestampBuilder::for_year(2020)
            .unwrap()
            .for_month(1)
            .unwrap()
            .for_day(1)
            .unwrap()
            .for_minute(0, 0, Offset::utc())
            .unwrap()
            .for_second(0)
            .unwrap();
        assert!(builder.for_fraction(BigUint::from(1000u32), -3).is_err());
    }

    #[test]
    fn offset_known_rejects_out_of_range_minutes() {
        assert!(Offset::known(1440).is_err());
        assert!(Offset::known(-1440).is_err());
        assert!(Offset::known(1439).is_ok());
    }
}
