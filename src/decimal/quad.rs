//! The fixed-width 34-digit decimal representation.
//!
//! # Overview
//!
//! `Quad` is the fast path: a 128-bit coefficient (enough to hold the 34
//! significant digits IEEE-754-2008 decimal128 allows) plus a 32-bit
//! exponent, with no heap allocation. Every arithmetic operator first
//! attempts its computation here; [`super::ops`] falls back to
//! [`super::number::Number`] only when the exact result does not fit.
//!
//! # Invariants
//!
//! - A finite `Quad`'s coefficient never exceeds [`MAX_COEFFICIENT`] (34
//!   nines).
//! - `exponent` is only meaningful for [`QuadKind::Finite`]; it is ignored
//!   (but preserved as `0`) for `Infinity`/`NaN`.
//! - Negative zero (`sign` negative, coefficient `0`) is representable and
//!   distinct from positive zero.

use num_bigint::BigUint;

use crate::bigint::Sign;
use crate::decimal::arith::Triple;

/// Maximum significant digits a `Quad` coefficient can hold.
pub const MAX_DIGITS: u32 = 34;

/// Minimum representable (unbiased, adjusted) exponent, matching
/// IEEE-754-2008 decimal128.
pub const EMIN: i32 = -6176;

/// Maximum representable (unbiased, adjusted) exponent, matching
/// IEEE-754-2008 decimal128.
pub const EMAX: i32 = 6111;

/// The non-finite or finite classification of a [`Quad`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuadKind {
    /// `sign * coefficient * 10^exponent`.
    Finite { sign: Sign, coefficient: u128, exponent: i32 },
    /// Signed infinity.
    Infinity { sign: Sign },
    /// Not-a-number (sign is not meaningful but retained for round-tripping
    /// a signaling/quiet distinction is out of scope here).
    NaN,
}

/// A fixed-width 34-digit decimal value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quad {
    kind: QuadKind,
}

impl Quad {
    /// The value zero (positive sign, exponent `0`).
    #[must_use]
    pub const fn zero() -> Self {
        Self { kind: QuadKind::Finite { sign: Sign::Plus, coefficient: 0, exponent: 0 } }
    }

    /// Builds a finite `Quad`, rejecting coefficients or exponents outside
    /// the representable range.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::IonNumericError::NumericOverflow`] if
    /// `coefficient` exceeds 34 digits or `exponent` falls outside
    /// `EMIN..=EMAX`.
    pub fn finite(sign: Sign, coefficient: u128, exponent: i32) -> crate::error::IonNumericResult<Self> {
        if digit_count_u128(coefficient) > MAX_DIGITS {
            return Err(crate::error::IonNumericError::overflow(format!(
                "quad coefficient {coefficient} exceeds {MAX_DIGITS} digits"
            )));
        }
        if !(EMIN..=EMAX).contains(&exponent) {
            return Err(crate::error::IonNumericError::overflow(format!(
                "quad exponent {exponent} outside {EMIN}..={EMAX}"
            )));
        }
        Ok(Self { kind: QuadKind::Finite { sign, coefficient, exponent } })
    }

    /// Signed infinity.
    #[must_use]
    pub const fn infinity(sign: Sign) -> Self {
        Self { kind: QuadKind::Infinity { sign } }
    }

    /// Not-a-number.
    #[must_use]
    pub const fn nan() -> Self {
        Self { kind: QuadKind::NaN }
    }

    /// This value's classification.
    #[must_use]
    pub const fn kind(&self) -> QuadKind {
        self.kind
    }

    /// Whether this value is finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self.kind, QuadKind::Finite { .. })
    }

    /// Whether this value is a (quiet) NaN.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self.kind, QuadKind::NaN)
    }

    /// Whether this value is infinite.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self.kind, QuadKind::Infinity { .. })
    }

    /// Converts to the shared arithmetic `Triple`, for finite values only.
    #[must_use]
    pub fn to_triple(&self) -> Option<Triple> {
        match self.kind {
            QuadKind::Finite { sign, coefficient, exponent } => Some(Triple {
                sign,
                coefficient: BigUint::from(coefficient),
                exponent: i64::from(exponent),
            }),
            _ => None,
        }
    }

    /// Attempts to pack a `Triple` back into a `Quad`, returning `None` if
    /// its coefficient exceeds 34 digits or its exponent falls outside the
    /// representable range — the signal [`super::ops`] uses to keep the
    /// result a [`super::number::Number`] instead.
    #[must_use]
    pub fn try_pack(triple: &Triple) -> Option<Self> {
        if triple.digit_count() > MAX_DIGITS {
            return None;
        }
        let exponent = i32::try_from(triple.exponent).ok()?;
        if !(EMIN..=EMAX).contains(&exponent) {
            return None;
        }
        let mut digits = [0u8; 16];
        let bytes = triple.coefficient.to_bytes_be();
        if bytes.len() > 16 {
            return None;
        }
        digits[16 - bytes.len()..].copy_from_slice(&bytes);
        let coefficient = u128::from_be_bytes(digits);
        Some(Self { kind: QuadKind::Finite { sign: triple.sign, coefficient, exponent } })
    }
}

fn digit_count_u128(mut value: u128) -> u32 {
    if value == 0 {
        return 1;
    }
    let mut count = 0;
    while value > 0 {
        count += 1;
        value /= 10;
    }
    count
}
