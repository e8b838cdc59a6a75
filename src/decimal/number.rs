//! The arbitrary-precision decimal representation.
//!
//! # Overview
//!
//! `Number` comes in two storage forms: an owned, heap-allocated value and
//! a value borrowed from an external arena. The borrowed form exists so a
//! reader that decodes many short-lived decimals out of one input buffer
//! can avoid a heap allocation per value; [`Number::claim`] is the escape
//! hatch — a deep copy onto the process heap for a value that must outlive
//! its arena.
//!
//! # Design
//!
//! The arena-borrowed form here is simplified relative to a production
//! arena-allocator integration (no raw-pointer arithmetic into the
//! `Arena` trait's `alloc_with_owner` buffer) — it borrows a `NumberData`
//! by reference instead, which is the safe, idiomatic-Rust rendition of
//! "the data outlives the decoded value but not necessarily the decoder."
//! A real zero-copy integration would place `NumberData` directly in arena
//! memory; that plumbing belongs to the reader façade this crate does not
//! implement.

use crate::bigint::Sign;
use crate::decimal::arith::Triple;

/// The finite-or-special payload shared by both `Number` storage forms.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberKind {
    /// `sign * coefficient * 10^exponent`.
    Finite(Triple),
    /// Signed infinity.
    Infinity { sign: Sign },
    /// Not-a-number.
    NaN,
}

impl NumberKind {
    /// Borrows the finite triple, if this is a finite value.
    #[must_use]
    pub const fn as_triple(&self) -> Option<&Triple> {
        match self {
            Self::Finite(t) => Some(t),
            _ => None,
        }
    }
}

/// An arbitrary-precision decimal value, either owned on the heap or
/// borrowed from an external arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Number<'a> {
    /// Heap-allocated, independent of any arena lifetime.
    Owned(Box<NumberKind>),
    /// Borrowed from data an external arena owns.
    Borrowed(&'a NumberKind),
}

impl<'a> Number<'a> {
    /// Wraps an owned value.
    #[must_use]
    pub fn owned(kind: NumberKind) -> Self {
        Self::Owned(Box::new(kind))
    }

    /// Wraps a value borrowed from arena-owned storage.
    #[must_use]
    pub const fn borrowed(kind: &'a NumberKind) -> Self {
        Self::Borrowed(kind)
    }

    /// Borrows the payload regardless of storage form.
    #[must_use]
    pub fn kind(&self) -> &NumberKind {
        match self {
            Self::Owned(b) => b,
            Self::Borrowed(r) => r,
        }
    }

    /// Deep-copies this value onto the process heap, returning a `'static`
    /// owned `Number` independent of any arena. This is the "claim"
    /// operation: a borrowed value that must outlive the arena it was
    /// decoded against is claimed before the arena is freed.
    #[must_use]
    pub fn claim(&self) -> Number<'static> {
        Number::Owned(Box::new(self.kind().clone()))
    }

    /// Whether this `Number` currently borrows from an arena rather than
    /// owning its data.
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }
}
