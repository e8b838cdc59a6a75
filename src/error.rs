//! # Overview
//!
//! Every fallible operation in this crate returns [`IonNumericError`] rather
//! than panicking. The variants cover every failure kind the codecs in this
//! crate can produce;
//! [`InvalidBinary`](IonNumericError::InvalidBinary) and
//! [`UnexpectedEof`](IonNumericError::UnexpectedEof) additionally carry the
//! byte offset that was current when the failure occurred, so a reader can
//! surface that position to the user without threading it through a second
//! channel.
//!
//! # Design
//!
//! No variant borrows from the input: every payload is owned so errors can
//! freely cross the codec boundary. `#[source]`/`#[from]` are only used where
//! a lower-level error type genuinely exists (there are none in this crate
//! today, since it sits at the bottom of the stack).

use thiserror::Error;

/// Result alias used throughout the crate.
pub type IonNumericResult<T> = Result<T, IonNumericError>;

/// Failure kinds produced by the numeric and temporal codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IonNumericError {
    /// The byte source was exhausted before a value could be fully decoded.
    #[error("unexpected end of input at offset {at}")]
    UnexpectedEof {
        /// Byte offset at which the cursor ran out of input.
        at: u64,
    },

    /// The binary encoding was structurally invalid (bad length, malformed
    /// coefficient, stray continuation bit, and so on).
    #[error("invalid binary encoding at offset {at}: {reason}")]
    InvalidBinary {
        /// Byte offset at which the failure was detected.
        at: u64,
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// A caller-supplied argument violated a precondition (out-of-range
    /// precision, negative length, and so on).
    #[error("invalid argument: {reason}")]
    InvalidArg {
        /// Human-readable description of the violated precondition.
        reason: String,
    },

    /// A timestamp value or its text form violated the grammar or a
    /// calendar invariant.
    #[error("invalid timestamp: {reason}")]
    InvalidTimestamp {
        /// Human-readable description of the problem.
        reason: String,
    },

    /// A numeric operation could not produce an exact result even after
    /// retrying in the arbitrary-precision representation.
    #[error("numeric overflow: {reason}")]
    NumericOverflow {
        /// Human-readable description of the overflow.
        reason: String,
    },

    /// A [`crate::io::ByteSink`] could not accept the full payload.
    #[error("buffer too small: needed {needed} bytes, {available} available")]
    BufferTooSmall {
        /// Number of bytes the write required.
        needed: usize,
        /// Number of bytes the sink was able to accept.
        available: usize,
    },

    /// An allocation against an [`crate::io::Arena`] failed.
    #[error("allocation failed")]
    NoMemory,
}

impl IonNumericError {
    /// Builds an [`IonNumericError::InvalidBinary`] with a formatted reason.
    pub(crate) fn invalid_binary(at: u64, reason: impl Into<String>) -> Self {
        Self::InvalidBinary {
            at,
            reason: reason.into(),
        }
    }

    /// Builds an [`IonNumericError::InvalidTimestamp`] with a formatted reason.
    pub(crate) fn invalid_timestamp(reason: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            reason: reason.into(),
        }
    }

    /// Builds an [`IonNumericError::InvalidArg`] with a formatted reason.
    pub(crate) fn invalid_arg(reason: impl Into<String>) -> Self {
        Self::InvalidArg {
            reason: reason.into(),
        }
    }

    /// Builds an [`IonNumericError::NumericOverflow`] with a formatted reason.
    pub(crate) fn overflow(reason: impl Into<String>) -> Self {
        Self::NumericOverflow {
            reason: reason.into(),
        }
    }
}
