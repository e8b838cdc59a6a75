//! Timestamp precision.
//!
//! # Overview
//!
//! An Ion timestamp carries exactly as much precision as its text literal
//! spelled out — a bare year, a year and month, a full date, a date and
//! time to the minute, to the second, or to a fractional second. Each level
//! is a strict superset of the fields below it: there is no "month and
//! second but no day" timestamp. [`Precision`] models this as a simple
//! ordered enum rather than a bitset: this is "a strict prefix" relation —
//! every coarser precision's fields are a subset of every finer one's, so
//! an enum ordering captures the invariant more directly than independent
//! flag bits would.

/// How much of a timestamp's value is actually known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// Year only (`2007T`).
    Year,
    /// Year and month (`2007-02T`).
    Month,
    /// Full date (`2007-02-23T`).
    Day,
    /// Date and time to the minute (`2007-02-23T12:14Z`).
    Minute,
    /// Date and time to the second (`2007-02-23T12:14:33Z`).
    Second,
    /// Date and time with a fractional second (`2007-02-23T12:14:33.079Z`).
    Fraction,
}

impl Precision {
    /// Whether an offset (`Z` or `+HH:MM`) is meaningful at this precision.
    /// Date-only timestamps (`Year`/`Month`/`Day`) have no time-of-day
    /// component and thus no offset.
    #[must_use]
    pub const fn has_offset(self) -> bool {
        matches!(self, Self::Minute | Self::Second | Self::Fraction)
    }

    /// Whether this precision includes an hour/minute field.
    #[must_use]
    pub const fn has_time(self) -> bool {
        self.has_offset()
    }

    /// Whether this precision includes a seconds field.
    #[must_use]
    pub const fn has_seconds(self) -> bool {
        matches!(self, Self::Second | Self::Fraction)
    }
}
