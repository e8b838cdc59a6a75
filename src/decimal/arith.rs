//! Shared arithmetic kernel for decimal coefficients.
//!
//! # Overview
//!
//! Both [`crate::decimal::Quad`] and [`crate::decimal::Number`] are, at their
//! numeric core, a sign, an arbitrary-precision coefficient, and a base-10
//! exponent. The "try Quad, detect inexactness, retry as Number" upgrade
//! pattern needs a single code path rather than two independent
//! implementations — every arithmetic operator in [`super::ops`] computes
//! its exact result here at `BigUint` precision and only afterward decides
//! whether the outcome still fits in a 34-digit Quad (see
//! `super::quad::Quad::try_pack`).
//!
//! # Design
//!
//! Grounded in the same `Sign` + magnitude split as [`crate::bigint::BigInt`],
//! plus `num-integer`'s `div_rem` for the combined quotient/remainder
//! rounding step.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::bigint::{BigInt, Sign};
use crate::decimal::context::RoundingMode;

/// A finite decimal value: `sign * coefficient * 10^exponent`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triple {
    pub sign: Sign,
    pub coefficient: BigUint,
    pub exponent: i64,
}

impl Triple {
    /// `0 * 10^0`, signed positive.
    pub fn zero() -> Self {
        Self {
            sign: Sign::Plus,
            coefficient: BigUint::zero(),
            exponent: 0,
        }
    }

    /// Whether the coefficient is exactly zero (the stored sign may still be
    /// negative — a "negative zero" decimal).
    pub fn is_zero_magnitude(&self) -> bool {
        self.coefficient.is_zero()
    }

    /// Number of significant decimal digits in the coefficient (`1` for
    /// zero, matching `BigInt::estimate_decimal_digits`'s convention).
    pub fn digit_count(&self) -> u32 {
        BigInt::new(Sign::Plus, self.coefficient.clone()).estimate_decimal_digits()
    }

    /// Flips the sign in place.
    pub fn negate(&self) -> Self {
        Self {
            sign: self.sign.negate(),
            coefficient: self.coefficient.clone(),
            exponent: self.exponent,
        }
    }
}

/// Scales `coeff` up by `10^by` (used to align two operands to a common
/// exponent before addition/comparison).
fn scale_up(coeff: &BigUint, by: u64) -> BigUint {
    if by == 0 {
        coeff.clone()
    } else {
        coeff * BigUint::from(10u32).pow(by.min(u32::MAX as u64) as u32)
    }
}

/// Aligns `a` and `b` to the lesser of their two exponents, returning
/// `(a_coeff, b_coeff, common_exponent)`.
pub fn align(a: &Triple, b: &Triple) -> (BigUint, BigUint, i64) {
    if a.exponent == b.exponent {
        (a.coefficient.clone(), b.coefficient.clone(), a.exponent)
    } else if a.exponent > b.exponent {
        let shift = (a.exponent - b.exponent) as u64;
        (scale_up(&a.coefficient, shift), b.coefficient.clone(), b.exponent)
    } else {
        let shift = (b.exponent - a.exponent) as u64;
        (a.coefficient.clone(), scale_up(&b.coefficient, shift), a.exponent)
    }
}

/// Rounds `coeff` (with the given `sign` and `exponent`) down to at most
/// `target_digits` significant digits, reporting whether any non-zero digit
/// was discarded. Mirrors the General Decimal Arithmetic rounding-then-renormalize
/// step: if rounding carries into an extra digit (`999 -> 1000`), the result
/// is divided down again and the exponent bumped to compensate.
pub fn round_to_digits(
    sign: Sign,
    coeff: &BigUint,
    exponent: i64,
    target_digits: u32,
    mode: RoundingMode,
) -> (BigUint, i64, bool) {
    let mut quotient = coeff.clone();
    let mut new_exponent = exponent;
    let current_digits = BigInt::new(Sign::Plus, quotient.clone()).estimate_decimal_digits();
    let mut inexact = false;

    if current_digits > target_digits {
        let drop = current_digits - target_digits;
        let divisor = BigUint::from(10u32).pow(drop);
        let (q, r) = quotient.div_rem(&divisor);
        inexact = !r.is_zero();
        let round_up = should_round_up(mode, sign, &q, &r, &divisor);
        quotient = if round_up { q + BigUint::one() } else { q };
        new_exponent += i64::from(drop);
    }

    // A carry (e.g. 999 -> 1000 at 3 target digits) can push one digit over;
    // renormalize rather than silently keeping an oversized coefficient.
    loop {
        let digits = BigInt::new(Sign::Plus, quotient.clone()).estimate_decimal_digits();
        if digits <= target_digits || quotient.is_zero() {
            break;
        }
        let (q, r) = quotient.div_rem(&BigUint::from(10u32));
        inexact = inexact || !r.is_zero();
        quotient = q;
        new_exponent += 1;
    }

    (quotient, new_exponent, inexact)
}

/// Rescales `coeff` (at `exponent`) to exactly `target_exponent`, rounding
/// if that requires dropping digits. Unlike [`round_to_digits`], the caller
/// picks the exponent directly rather than a digit budget — this is what
/// `quantize` needs, since its target is "match this pattern's exponent",
/// not "fit in N digits".
pub fn round_to_exponent(sign: Sign, coeff: &BigUint, exponent: i64, target_exponent: i64, mode: RoundingMode) -> (BigUint, bool) {
    if target_exponent <= exponent {
        let by = (exponent - target_exponent) as u64;
        (scale_up(coeff, by), false)
    } else {
        let drop = (target_exponent - exponent) as u32;
        let divisor = BigUint::from(10u32).pow(drop);
        let (q, r) = coeff.div_rem(&divisor);
        let inexact = !r.is_zero();
        let round_up = should_round_up(mode, sign, &q, &r, &divisor);
        let quotient = if round_up { q + BigUint::one() } else { q };
        (quotient, inexact)
    }
}

fn should_round_up(mode: RoundingMode, sign: Sign, quotient: &BigUint, remainder: &BigUint, divisor: &BigUint) -> bool {
    if remainder.is_zero() {
        return false;
    }
    let twice = remainder * BigUint::from(2u32);
    match mode {
        RoundingMode::Down => false,
        RoundingMode::Up => true,
        RoundingMode::HalfUp => twice >= *divisor,
        RoundingMode::HalfEven => {
            if twice > *divisor {
                true
            } else if twice < *divisor {
                false
            } else {
                quotient.is_odd()
            }
        }
        RoundingMode::Ceiling => !sign.is_negative(),
        RoundingMode::Floor => sign.is_negative(),
    }
}

/// Adds two aligned triples, returning the exact sum and its common
/// exponent (no rounding is performed here — callers round afterward against
/// their own target precision).
pub fn add_exact(a: &Triple, b: &Triple) -> Triple {
    let (ac, bc, exponent) = align(a, b);
    let a_signed = signed(&a.sign, &ac);
    let b_signed = signed(&b.sign, &bc);
    let sum = a_signed + b_signed;
    let (sign, magnitude) = unsigned(&sum);
    Triple { sign, coefficient: magnitude, exponent }
}

/// Exact product of `a` and `b` (coefficients multiply, exponents add).
pub fn multiply_exact(a: &Triple, b: &Triple) -> Triple {
    let sign = if a.sign.is_negative() == b.sign.is_negative() { Sign::Plus } else { Sign::Minus };
    Triple {
        sign,
        coefficient: &a.coefficient * &b.coefficient,
        exponent: a.exponent + b.exponent,
    }
}

/// Divides `a` by `b` to `target_digits` significant digits, returning the
/// quotient and whether the division was inexact. `b` must be non-zero.
pub fn divide_to_digits(a: &Triple, b: &Triple, target_digits: u32, mode: RoundingMode) -> (Triple, bool) {
    let sign = if a.sign.is_negative() == b.sign.is_negative() { Sign::Plus } else { Sign::Minus };
    if a.coefficient.is_zero() {
        return (Triple { sign, coefficient: BigUint::zero(), exponent: a.exponent - b.exponent }, false);
    }
    // Scale the dividend up so the quotient carries `target_digits + guard`
    // significant digits before rounding down, matching how decNumber avoids
    // doing fixed-point division digit by digit.
    let guard = target_digits + 2;
    let a_digits = BigInt::new(Sign::Plus, a.coefficient.clone()).estimate_decimal_digits();
    let b_digits = BigInt::new(Sign::Plus, b.coefficient.clone()).estimate_decimal_digits();
    let scale = i64::from(guard) + i64::from(b_digits) - i64::from(a_digits);
    let scale = scale.max(0);
    let scaled_dividend = scale_up(&a.coefficient, scale as u64);
    let (q, r) = scaled_dividend.div_rem(&b.coefficient);
    let exact_remainder_zero = r.is_zero();
    let exponent = a.exponent - b.exponent - scale;
    let (rounded, rounded_exponent, rounding_inexact) = round_to_digits(sign, &q, exponent, target_digits, mode);
    (
        Triple { sign, coefficient: rounded, exponent: rounded_exponent },
        rounding_inexact || !exact_remainder_zero,
    )
}

/// `a - (a / b truncated toward zero) * b`, General Decimal Arithmetic's
/// `remainder` operator.
pub fn remainder(a: &Triple, b: &Triple) -> Triple {
    let (ac, bc, exponent) = align(a, b);
    if bc.is_zero() {
        return Triple { sign: a.sign, coefficient: BigUint::zero(), exponent };
    }
    let (_, r) = ac.div_rem(&bc);
    Triple { sign: a.sign, coefficient: r, exponent }
}

/// The IEEE `remainder-near` operator: like `remainder`, but rounds the
/// integer quotient to nearest-even rather than truncating, so the result's
/// magnitude never exceeds half of `|b|`.
pub fn remainder_near(a: &Triple, b: &Triple) -> Triple {
    let (ac, bc, exponent) = align(a, b);
    if bc.is_zero() {
        return Triple { sign: a.sign, coefficient: BigUint::zero(), exponent };
    }
    let (q, r) = ac.div_rem(&bc);
    let twice = &r * BigUint::from(2u32);
    let (quotient, remainder) = if twice > bc || (twice == bc && q.is_odd()) {
        (q + BigUint::one(), &bc - &r)
    } else {
        (q, r)
    };
    let same_sign = a.sign.is_negative() == b.sign.is_negative();
    let result_sign = if remainder.is_zero() {
        Sign::Plus
    } else if quotient.is_zero() {
        a.sign
    } else if same_sign {
        a.sign
    } else {
        a.sign
    };
    Triple { sign: result_sign, coefficient: remainder, exponent }
}

/// Numeric (value) comparison, ignoring trailing-zero/exponent differences:
/// `3` and `3.0` compare equal.
pub fn numeric_cmp(a: &Triple, b: &Triple) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    let a_zero = a.coefficient.is_zero();
    let b_zero = b.coefficient.is_zero();
    if a_zero && b_zero {
        return Ordering::Equal;
    }
    if a_zero {
        return if b.sign.is_negative() { Ordering::Greater } else { Ordering::Less };
    }
    if b_zero {
        return if a.sign.is_negative() { Ordering::Less } else { Ordering::Greater };
    }
    match (a.sign.is_negative(), b.sign.is_negative()) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (neg_a, _) => {
            let (ac, bc, _) = align(a, b);
            let mag_order = ac.cmp(&bc);
            if neg_a { mag_order.reverse() } else { mag_order }
        }
    }
}

/// General Decimal Arithmetic's `compare-total`: a total order that, unlike
/// [`numeric_cmp`], distinguishes differently-exponented representations of
/// the same value (`3` sorts before `3.0`) and treats `Minus` as strictly
/// less than `Plus` at equal magnitude (so negative zero sorts below zero).
pub fn compare_total(a: &Triple, b: &Triple) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a.sign.is_negative(), b.sign.is_negative()) {
        (false, true) => return Ordering::Greater,
        (true, false) => return Ordering::Less,
        _ => {}
    }
    let numeric = numeric_cmp(a, b);
    let ordering = if numeric == Ordering::Equal {
        // Same value: fewer digits (larger exponent) sorts first.
        a.exponent.cmp(&b.exponent).reverse()
    } else {
        numeric
    };
    if a.sign.is_negative() { ordering.reverse() } else { ordering }
}

fn signed(sign: &Sign, magnitude: &BigUint) -> num_bigint::BigInt {
    let s = if sign.is_negative() { num_bigint::Sign::Minus } else { num_bigint::Sign::Plus };
    num_bigint::BigInt::from_biguint(s, magnitude.clone())
}

fn unsigned(value: &num_bigint::BigInt) -> (Sign, BigUint) {
    let (sign, magnitude) = value.clone().into_parts();
    let sign = if sign == num_bigint::Sign::Minus { Sign::Minus } else { Sign::Plus };
    (sign, magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(sign: Sign, coeff: u64, exponent: i64) -> Triple {
        Triple { sign, coefficient: BigUint::from(coeff), exponent }
    }

    #[test]
    fn add_aligns_exponents() {
        let a = t(Sign::Plus, 125, -2); // 1.25
        let b = t(Sign::Plus, 5, -1); // 0.5
        let sum = add_exact(&a, &b);
        assert_eq!(sum.exponent, -2);
        assert_eq!(sum.coefficient, BigUint::from(175u32)); // 1.75
    }

    #[test]
    fn multiply_adds_exponents() {
        let a = t(Sign::Plus, 12, -1); // 1.2
        let b = t(Sign::Minus, 3, 0); // -3
        let product = multiply_exact(&a, &b);
        assert_eq!(product.sign, Sign::Minus);
        assert_eq!(product.coefficient, BigUint::from(36u32));
        assert_eq!(product.exponent, -1); // -3.6
    }

    #[test]
    fn round_half_even_ties_to_even() {
        let (q, e, inexact) = round_to_digits(Sign::Plus, &BigUint::from(125u32), 0, 2, RoundingMode::HalfEven);
        assert!(inexact);
        assert_eq!(q, BigUint::from(12u32));
        assert_eq!(e, 1); // 125 -> 12 * 10^1 = 120, nearest even of {12,13} tie -> 12
    }

    #[test]
    fn round_carries_into_extra_digit() {
        let (q, e, inexact) = round_to_digits(Sign::Plus, &BigUint::from(996u32), 0, 2, RoundingMode::HalfUp);
        assert!(inexact);
        assert_eq!(q, BigUint::from(10u32));
        assert_eq!(e, 2); // 996 -> 100 * 10^? -> renormalized to 10 * 10^2 = 1000
    }

    #[test]
    fn numeric_cmp_ignores_trailing_zero_representation() {
        let a = t(Sign::Plus, 3, 0);
        let b = t(Sign::Plus, 30, -1);
        assert_eq!(numeric_cmp(&a, &b), std::cmp::Ordering::Equal);
    }

    #[test]
    fn compare_total_distinguishes_representation() {
        let a = t(Sign::Plus, 3, 0);
        let b = t(Sign::Plus, 30, -1);
        assert_eq!(compare_total(&a, &b), std::cmp::Ordering::Less);
    }

    #[test]
    fn divide_reports_inexact_on_nonterminating_quotient() {
        let a = t(Sign::Plus, 1, 0);
        let b = t(Sign::Plus, 3, 0);
        let (q, inexact) = divide_to_digits(&a, &b, 5, RoundingMode::HalfEven);
        assert!(inexact);
        assert_eq!(q.coefficient, BigUint::from(33333u32));
    }
}
