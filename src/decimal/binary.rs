//! The Ion binary decimal wire form.
//!
//! # Overview
//!
//! A decimal value's binary body is a `VarInt` exponent immediately
//! followed by an `Int` coefficient that consumes the rest of the value's
//! already-known body length — there is no separate length prefix for the
//! coefficient, unlike a standalone `Int` field. Two all-zero-length special
//! cases exist: an empty body means `0d0` (positive zero, exponent zero),
//! and a body containing only the `Int` negative-zero sign octet (`0x80`,
//! with a zero-length `VarInt` exponent of `0`) means negative zero.
//!
//! # Design
//!
//! The exponent reuses [`crate::varint`]'s `VarInt` directly, but the
//! coefficient does not reuse `varint::write_int`/`read_int`: those are
//! explicitly scoped to this codec's 64-bit fixed-width path, while a
//! [`super::Number`] coefficient is arbitrary precision. This module
//! re-implements the same sign-bit-reservation `Int` convention
//! (`write_big_int`/`read_big_int`) directly over [`num_bigint::BigUint`]
//! so a decimal with more than 19 significant digits still round-trips.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::bigint::Sign as BigSign;
use crate::decimal::arith::Triple;
use crate::decimal::{Decimal, DecimalContext};
use crate::error::{IonNumericError, IonNumericResult};
use crate::io::{ByteSink, SliceCursor};
use crate::varint::{self, SignedMagnitude};

/// Encodes `value`'s binary body to `sink`, returning the number of octets
/// written.
///
/// # Errors
///
/// Returns [`IonNumericError::InvalidArg`] if `value` is not finite — Ion's
/// decimal wire form has no representation for NaN or infinity.
pub fn write_decimal(sink: &mut impl ByteSink, value: &Decimal<'_>) -> IonNumericResult<usize> {
    let triple = value
        .to_triple()
        .ok_or_else(|| IonNumericError::invalid_arg("decimal binary encoding requires a finite value"))?;

    if triple.is_zero_magnitude() && triple.exponent == 0 && !triple.sign.is_negative() {
        return Ok(0);
    }

    let exponent_sm = SignedMagnitude::from_i64(triple.exponent);
    let written = varint::write_var_int(sink, exponent_sm);
    let coeff_written = write_big_int(sink, triple.sign, &triple.coefficient);
    Ok(written + coeff_written)
}

/// Decodes a decimal binary body of `len` octets from `cursor`.
///
/// # Errors
///
/// Returns [`IonNumericError::InvalidBinary`] if the exponent `VarInt`
/// consumes more than `len` octets.
pub fn read_decimal(cursor: &mut SliceCursor<'_>, len: usize, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let result = read_decimal_inner(cursor, len, ctx);
    #[cfg(feature = "tracing")]
    if let Err(err) = &result {
        tracing::debug!(len, %err, "decimal binary decode failed");
    }
    result
}

fn read_decimal_inner(cursor: &mut SliceCursor<'_>, len: usize, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let _ = ctx;
    if len == 0 {
        return Ok(Decimal::zero());
    }
    let start = cursor.position();
    let exponent = varint::read_var_int(cursor)?;
    let consumed = (cursor.position() - start) as usize;
    if consumed > len {
        return Err(IonNumericError::invalid_binary(cursor.position(), "decimal exponent VarInt overruns body length"));
    }
    let coeff_len = len - consumed;
    let (sign, coefficient) = read_big_int(cursor, coeff_len)?;
    Ok(Decimal::from_triple(Triple { sign, coefficient, exponent: exponent.to_i64()? }))
}

/// Minimal octet count for a big-endian `Int` holding `sign`/`magnitude`,
/// reserving a leading zero octet if the magnitude's own top bit would
/// otherwise collide with the sign bit.
fn big_int_len(sign: BigSign, magnitude: &BigUint) -> usize {
    if magnitude.is_zero() {
        return usize::from(sign.is_negative());
    }
    let bytes = magnitude.to_bytes_be();
    bytes.len() + usize::from(bytes[0] & 0x80 != 0)
}

fn write_big_int(sink: &mut impl ByteSink, sign: BigSign, magnitude: &BigUint) -> usize {
    let expected_len = big_int_len(sign, magnitude);
    if magnitude.is_zero() {
        return if sign.is_negative() { sink.write_bytes(&[0x80]) } else { 0 };
    }
    let mut bytes = magnitude.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0);
    }
    if sign.is_negative() {
        bytes[0] |= 0x80;
    }
    debug_assert_eq!(bytes.len(), expected_len);
    sink.write_bytes(&bytes)
}

fn read_big_int(cursor: &mut SliceCursor<'_>, len: usize) -> IonNumericResult<(BigSign, BigUint)> {
    if len == 0 {
        return Ok((BigSign::Plus, BigUint::zero()));
    }
    let mut bytes = vec![0u8; len];
    for b in &mut bytes {
        *b = cursor.read_byte()?;
    }
    let negative = bytes[0] & 0x80 != 0;
    bytes[0] &= 0x7F;
    let magnitude = BigUint::from_bytes_be(&bytes);
    Ok((if negative { BigSign::Minus } else { BigSign::Plus }, magnitude))
}
