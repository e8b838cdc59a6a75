//! Timestamp equality.
//!
//! # Overview
//!
//! Two distinct notions of "equal" apply to timestamps:
//!
//! - **Data-model equality** — every field matches exactly, including
//!   precision and the offset itself. `2007-02-23T12:14:33Z` and
//!   `2007-02-23T13:14:33+01:00` are data-model-unequal even though they name
//!   the same instant, because their offsets differ. This is [`Timestamp`]'s
//!   derived [`PartialEq`].
//! - **Instant equality** — both timestamps are first normalized to UTC
//!   (offset applied) and compared as the same point in time, ignoring how
//!   each was originally written down. Meaningful only once both values
//!   carry at least [`Precision::Minute`] (anything coarser has no
//!   instant — a bare date is not a point in time).
//!
//! # Design
//!
//! `instant_equal` does not attempt leap-second-aware or calendar-aware
//! comparison: it reduces each timestamp to minutes-since-a-fixed-origin via
//! its own fields (this crate has no notion of leap seconds or
//! timezone-name resolution), so the comparison is exact only up to the
//! fractional-second component, which it compares on its own as a decimal
//! value via [`crate::decimal::arith::numeric_cmp`]-style reasoning — two
//! fractions are equal here only when coefficient and exponent describe the
//! same value, without rescaling, matching how [`Timestamp`] already requires
//! `exponent < 0` uniformly.

use std::cmp::Ordering;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::timestamp::builder::Timestamp;
use crate::timestamp::calendar::days_from_civil;
use crate::timestamp::precision::Precision;

/// Trims trailing zeros from a `(coefficient, exponent)` fraction without
/// changing its value, so that e.g. `79 * 10^-3` and `790 * 10^-4` — both
/// `0.079` — compare equal. Mirrors [`crate::decimal::ops::reduce`] but
/// works on the fraction's raw parts rather than a full `Decimal`.
fn reduced_fraction(coefficient: &BigUint, exponent: i32) -> (BigUint, i32) {
    if coefficient.is_zero() {
        return (BigUint::zero(), 0);
    }
    let ten = BigUint::from(10u32);
    let mut coefficient = coefficient.clone();
    let mut exponent = exponent;
    while (&coefficient % &ten).is_zero() {
        coefficient = &coefficient / &ten;
        exponent += 1;
    }
    (coefficient, exponent)
}

fn minutes_since_epoch(ts: &Timestamp) -> i64 {
    let day = i64::from(ts.day().max(1));
    let days = days_from_civil(i64::from(ts.year()), i64::from(ts.month().max(1)), day);
    let mut minutes = days * 24 * 60 + i64::from(ts.hour()) * 60 + i64::from(ts.minute());
    minutes -= i64::from(ts.offset().minutes());
    minutes
}

/// Whether `a` and `b` name the same instant once offsets are normalized to
/// UTC.
///
/// Returns `false` if either value's precision is coarser than
/// [`Precision::Minute`] — a date-only timestamp has no instant to compare.
#[must_use]
pub fn instant_equal(a: &Timestamp, b: &Timestamp) -> bool {
    if a.precision() < Precision::Minute || b.precision() < Precision::Minute {
        return false;
    }
    if minutes_since_epoch(a) != minutes_since_epoch(b) {
        return false;
    }
    let a_seconds = if a.precision() >= Precision::Second { a.second() } else { 0 };
    let b_seconds = if b.precision() >= Precision::Second { b.second() } else { 0 };
    if a_seconds != b_seconds {
        return false;
    }
    let a_fraction = if a.precision() == Precision::Fraction {
        let (coeff, exp) = a.fraction();
        Some(reduced_fraction(coeff, exp))
    } else {
        None
    };
    let b_fraction = if b.precision() == Precision::Fraction {
        let (coeff, exp) = b.fraction();
        Some(reduced_fraction(coeff, exp))
    } else {
        None
    };
    a_fraction == b_fraction
}

/// Orders two instants by their UTC-normalized minute, falling back to
/// second and fraction. Only meaningful when both carry at least
/// [`Precision::Minute`]; callers should check that themselves, as
/// [`instant_equal`] does.
#[must_use]
pub fn instant_cmp(a: &Timestamp, b: &Timestamp) -> Ordering {
    minutes_since_epoch(a)
        .cmp(&minutes_since_epoch(b))
        .then_with(|| {
            let a_seconds = if a.precision() >= Precision::Second { a.second() } else { 0 };
            let b_seconds = if b.precision() >= Precision::Second { b.second() } else { 0 };
            a_seconds.cmp(&b_seconds)
        })
        .then_with(|| {
            let a_fraction = if a.precision() == Precision::Fraction { Some(a.fraction()) } else { None };
            let b_fraction = if b.precision() == Precision::Fraction { Some(b.fraction()) } else { None };
            match (a_fraction, b_fraction) {
                (Some((ac, ae)), Some((bc, be))) if ae == be => ac.cmp(bc),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                _ => Ordering::Equal,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::text::parse_timestamp;

    #[test]
    fn data_model_equality_distinguishes_differing_offsets() {
        let utc = parse_timestamp("2007-02-23T12:14:33Z").unwrap();
        let plus_one = parse_timestamp("2007-02-23T13:14:33+01:00").unwrap();
        assert_ne!(utc, plus_one);
    }

    #[test]
    fn instant_equality_normalizes_offsets() {
        let utc = parse_timestamp("2007-02-23T12:14:33Z").unwrap();
        let plus_one = parse_timestamp("2007-02-23T13:14:33+01:00").unwrap();
        assert!(instant_equal(&utc, &plus_one));
    }

    #[test]
    fn instant_equality_is_false_for_date_only_values() {
        let a = parse_timestamp("2007-02-23T").unwrap();
        let b = parse_timestamp("2007-02-23T").unwrap();
        assert!(!instant_equal(&a, &b));
    }

    #[test]
    fn instant_equality_respects_fraction() {
        let a = parse_timestamp("2007-02-23T12:14:33.079Z").unwrap();
        let b = parse_timestamp("2007-02-23T13:14:33.079+01:00").unwrap();
        let c = parse_timestamp("2007-02-23T13:14:33.08+01:00").unwrap();
        assert!(instant_equal(&a, &b));
        assert!(!instant_equal(&a, &c));
    }

    #[test]
    fn instant_equality_trims_trailing_zeros_before_comparing_fractions() {
        // 79 * 10^-3 and 790 * 10^-4 both name 0.079 seconds.
        let a = parse_timestamp("2007-02-23T12:14:33.079Z").unwrap();
        let b = parse_timestamp("2007-02-23T12:14:33.0790Z").unwrap();
        assert!(instant_equal(&a, &b));
    }

    #[test]
    fn instant_cmp_orders_across_offsets() {
        let earlier = parse_timestamp("2007-02-23T12:14:33Z").unwrap();
        let later = parse_timestamp("2007-02-23T12:15:00Z").unwrap();
        assert_eq!(instant_cmp(&earlier, &later), Ordering::Less);
    }

    #[test]
    fn crosses_a_day_boundary_correctly() {
        let before_midnight = parse_timestamp("2007-02-23T23:50:00Z").unwrap();
        let after_midnight_local = parse_timestamp("2007-02-24T00:50:00+01:00").unwrap();
        assert!(instant_equal(&before_midnight, &after_midnight_local));
    }
}
