//! Shared arbitrary-precision signed magnitude.
//!
//! # Overview
//!
//! `BigInt` wraps [`num_bigint::BigUint`] with an explicit sign, rather than
//! using [`num_bigint::BigInt`] directly, because signum `0` must imply
//! magnitude `0` and vice versa with no other coupling — and because the
//! decimal engine needs to distinguish a negative-signed zero magnitude
//! from a positive one, which `num_bigint::BigInt` cannot represent (its
//! zero is always unsigned). This mirrors the `ion-rust` decimal
//! implementation's own `Sign` + `Magnitude` split.
//!
//! # Invariants
//!
//! - `signum() == 0` if and only if `magnitude().is_zero()`.
//! - The underlying `BigUint` never carries leading zero digits (guaranteed
//!   by `num_bigint` itself).

use num_bigint::BigUint;
use num_traits::Zero;

/// Sign of a [`BigInt`] or decimal coefficient. Unlike `num_bigint::Sign`,
/// this keeps `Minus` distinct from `NoSign` even at zero magnitude, so a
/// negative-zero coefficient can be represented upstream in
/// [`crate::decimal::Number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Non-negative (including positive zero).
    Plus,
    /// Negative (including negative zero).
    Minus,
}

impl Sign {
    /// Flips the sign.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }

    /// Whether this sign is [`Sign::Minus`].
    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(self, Self::Minus)
    }
}

/// An arbitrary-precision signed integer, stored as a [`Sign`] plus an
/// unsigned magnitude.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BigInt {
    sign: Sign,
    magnitude: BigUint,
}

impl BigInt {
    /// Builds a `BigInt` from an explicit sign and magnitude.
    #[must_use]
    pub fn new(sign: Sign, magnitude: BigUint) -> Self {
        Self { sign, magnitude }
    }

    /// Zero (signum `0`).
    #[must_use]
    pub fn zero() -> Self {
        Self {
            sign: Sign::Plus,
            magnitude: BigUint::zero(),
        }
    }

    /// Builds a `BigInt` from a big-endian magnitude and a sign.
    #[must_use]
    pub fn from_be_bytes(sign: Sign, bytes: &[u8]) -> Self {
        Self::new(sign, BigUint::from_bytes_be(bytes))
    }

    /// `-1`, `0`, or `+1`. Zero magnitude always reports `0` regardless of
    /// the stored [`Sign`].
    #[must_use]
    pub fn signum(&self) -> i32 {
        if self.magnitude.is_zero() {
            0
        } else if self.sign.is_negative() {
            -1
        } else {
            1
        }
    }

    /// The unsigned magnitude.
    #[must_use]
    pub const fn magnitude(&self) -> &BigUint {
        &self.magnitude
    }

    /// The stored sign (independent of whether the magnitude is zero).
    #[must_use]
    pub const fn sign(&self) -> Sign {
        self.sign
    }

    /// Number of bits needed to represent the magnitude (`0` for zero).
    #[must_use]
    pub fn bit_length(&self) -> u64 {
        self.magnitude.bits()
    }

    /// Estimates the number of decimal digits in the magnitude from its bit
    /// length: a `leading_zeros`-style estimate (here, `bits() *
    /// log10(2)`) followed by an exact correction against the true
    /// power-of-ten boundary, rather than a table-driven shift approach.
    #[must_use]
    pub fn estimate_decimal_digits(&self) -> u32 {
        if self.magnitude.is_zero() {
            return 1;
        }
        let bits = self.magnitude.bits();
        // log10(2) ~= 0.30103; an upper bound on digit count is
        // floor(bits * log10(2)) + 1, which this correction step then
        // verifies (and decrements if it overshot) against the real value.
        let mut estimate = ((bits as f64) * std::f64::consts::LOG10_2).floor() as u32 + 1;
        loop {
            let boundary = BigUint::from(10u32).pow(estimate - 1);
            if self.magnitude >= boundary {
                return estimate;
            }
            estimate -= 1;
        }
    }

    /// Big-endian magnitude bytes (no sign bit; see [`crate::varint`] for the
    /// `Int` wire form that reserves one).
    #[must_use]
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.magnitude.to_bytes_be()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_has_signum_zero_regardless_of_sign_field() {
        assert_eq!(BigInt::zero().signum(), 0);
        assert_eq!(BigInt::new(Sign::Minus, BigUint::zero()).signum(), 0);
    }

    #[test]
    fn nonzero_signum_matches_sign() {
        assert_eq!(BigInt::new(Sign::Plus, BigUint::from(5u32)).signum(), 1);
        assert_eq!(BigInt::new(Sign::Minus, BigUint::from(5u32)).signum(), -1);
    }

    #[test]
    fn digit_estimate_matches_true_digit_count_across_powers_of_ten() {
        for exp in 0u32..40 {
            let value = BigUint::from(10u32).pow(exp);
            let big = BigInt::new(Sign::Plus, value.clone());
            assert_eq!(big.estimate_decimal_digits(), exp + 1, "10^{exp}");
            if exp > 0 {
                let just_below = BigInt::new(Sign::Plus, value - 1u32);
                assert_eq!(just_below.estimate_decimal_digits(), exp, "10^{exp} - 1");
            }
        }
    }
}
