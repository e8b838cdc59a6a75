//! # Overview
//!
//! A numeric and temporal codec for Amazon Ion's binary and text formats:
//! self-delimiting integers ([`varint`]), the binary64 float wire form
//! ([`float`]), an arbitrary-precision signed-magnitude integer shared by the
//! decimal engine ([`bigint`]), a three-variant arbitrary-precision decimal
//! engine with a full operator dispatch table ([`decimal`]), and a
//! precision-aware timestamp engine ([`timestamp`]). [`io`] supplies the
//! byte-source/byte-sink/arena traits every codec in this crate reads from
//! and writes to; [`error`] supplies the single [`error::IonNumericError`]
//! every fallible operation here returns.
//!
//! # Design
//!
//! This crate sits at the bottom of an Ion implementation's stack: it has no
//! notion of a symbol table, container nesting, or the wire's outer type
//! descriptor octet. Those belong to a reader/writer façade built on top of
//! [`io::ByteSource`]/[`io::ByteSink`]; this crate only encodes and decodes
//! the numeric and temporal *payloads* those containers carry.
//!
//! # Non-goals
//!
//! - No general arbitrary-precision arithmetic library beyond the operators
//!   [`decimal::ops`] implements.
//! - No leap seconds, and no timestamp years outside `0001..=9999`.
//! - No timezone name resolution — [`timestamp::Offset`] is a signed minute
//!   count, never an IANA zone identifier.
//!
//! # Feature flags
//!
//! - `tracing` — emits `tracing::debug!` on decode failures and
//!   `tracing::trace!` on a `Quad`-to-`Number` upgrade retry. Nothing is
//!   emitted, and `tracing` is not linked, when this is off.
//! - `serde` — `Serialize`/`Deserialize` for the lifetime-free public data
//!   types ([`BigInt`], [`Quad`], [`Timestamp`], [`Precision`], and the
//!   others listed in `DESIGN.md`). [`Decimal`] and [`Number`] carry an
//!   arena-borrow lifetime and are not `(De)serialize`-able as a result.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::pedantic, clippy::nursery)]

pub mod bigint;
pub mod decimal;
pub mod error;
pub mod float;
pub mod io;
pub mod timestamp;
pub mod varint;

pub use bigint::{BigInt, Sign};
pub use decimal::{Decimal, DecimalContext, Number, Quad};
pub use error::{IonNumericError, IonNumericResult};
pub use timestamp::{Offset, Precision, Timestamp, TimestampBuilder};
