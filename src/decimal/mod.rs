//! The arbitrary-precision decimal engine.
//!
//! # Overview
//!
//! An Ion `decimal` value is represented here as one of two storage forms —
//! [`Quad`] (fixed 34-digit, no allocation) or [`Number`] (arbitrary
//! precision, owned or arena-borrowed) — unified behind the [`Decimal`]
//! enum. [`ops`] implements the operator dispatch table; [`text`] and
//! [`binary`] implement the two wire encodings.
//!
//! # Design
//!
//! [`arith::Triple`] is the shared `sign * coefficient * 10^exponent` kernel
//! both storage forms convert to and from, so every operator has exactly one
//! implementation regardless of which form its operands arrive in.

mod arith;
pub mod binary;
pub mod context;
pub mod number;
pub mod ops;
pub mod quad;
pub mod text;

pub use arith::Triple;
pub use context::{ContextStatus, DecimalContext, DecimalContextBuilder, RoundingMode};
pub use number::{Number, NumberKind};
pub use quad::{Quad, QuadKind};

use crate::bigint::Sign;

/// An Ion decimal value: either the fast fixed-width [`Quad`] form or the
/// arbitrary-precision [`Number`] form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decimal<'a> {
    /// The fixed 34-digit representation.
    Quad(Quad),
    /// The arbitrary-precision representation (owned or arena-borrowed).
    Number(Number<'a>),
}

impl<'a> Decimal<'a> {
    /// Positive zero, represented as a `Quad`.
    #[must_use]
    pub const fn zero() -> Self {
        Self::Quad(Quad::zero())
    }

    /// Converts to the shared arithmetic triple, for finite values.
    #[must_use]
    pub fn to_triple(&self) -> Option<Triple> {
        match self {
            Self::Quad(q) => q.to_triple(),
            Self::Number(n) => n.kind().as_triple().cloned(),
        }
    }

    /// Whether this value is finite (neither infinite nor NaN).
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Quad(q) => q.is_finite(),
            Self::Number(n) => matches!(n.kind(), NumberKind::Finite(_)),
        }
    }

    /// Whether this value is NaN.
    #[must_use]
    pub fn is_nan(&self) -> bool {
        match self {
            Self::Quad(q) => q.is_nan(),
            Self::Number(n) => matches!(n.kind(), NumberKind::NaN),
        }
    }

    /// Whether this value is infinite.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        match self {
            Self::Quad(q) => q.is_infinite(),
            Self::Number(n) => matches!(n.kind(), NumberKind::Infinity { .. }),
        }
    }

    /// The sign of this value (meaningful even for zero and for NaN/infinity).
    #[must_use]
    pub fn sign(&self) -> Sign {
        match self {
            Self::Quad(q) => match q.kind() {
                QuadKind::Finite { sign, .. } | QuadKind::Infinity { sign } => sign,
                QuadKind::NaN => Sign::Plus,
            },
            Self::Number(n) => match n.kind() {
                NumberKind::Finite(t) => t.sign,
                NumberKind::Infinity { sign } => *sign,
                NumberKind::NaN => Sign::Plus,
            },
        }
    }

    /// Builds a `Decimal` from a [`Triple`], choosing the `Quad` form when it
    /// fits and falling back to an owned [`Number`] otherwise. This is the
    /// concrete "retry as Number" half of the upgrade pattern.
    #[must_use]
    pub fn from_triple(triple: Triple) -> Self {
        match Quad::try_pack(&triple) {
            Some(quad) => Self::Quad(quad),
            None => {
                #[cfg(feature = "tracing")]
                tracing::trace!(exponent = triple.exponent, "triple exceeds Quad precision, retrying as Number");
                Self::Number(Number::owned(NumberKind::Finite(triple)))
            }
        }
    }

    /// Claims this value onto the process heap, detaching it from any arena.
    /// `Quad` values are always independent of arena storage and are
    /// returned unchanged.
    #[must_use]
    pub fn claim(&self) -> Decimal<'static> {
        match self {
            Self::Quad(q) => Decimal::Quad(*q),
            Self::Number(n) => Decimal::Number(n.claim()),
        }
    }
}
