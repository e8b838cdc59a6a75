//! The decimal operator dispatch table.
//!
//! # Overview
//!
//! Every operator here follows the same shape: classify special values
//! (NaN/Infinity) first, fall through to exact [`super::arith::Triple`]
//! computation for finite operands, round once against the
//! [`DecimalContext`], and pack the result back through
//! [`Decimal::from_triple`] — which is what performs the Quad/Number
//! upgrade decision.
//!
//! # Design
//!
//! Arity-1 operators take one `Decimal` and a context; arity-2 take two;
//! `fma` is the only arity-3 operator. Logical operators
//! (`and`/`or`/`xor`/`invert`/`rotate`/`shift`)
//! follow the General Decimal Arithmetic specification's convention that
//! they operate on a decimal's coefficient read as a string of digits, each
//! of which must be `0` or `1` for the bitwise trio — not on the value's
//! binary representation.

use std::cmp::Ordering;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::bigint::Sign;
use crate::decimal::arith::{self, Triple};
use crate::decimal::context::DecimalContext;
use crate::decimal::Decimal;
use crate::error::{IonNumericError, IonNumericResult};

fn require_finite<'a>(value: &'a Decimal<'_>, op: &str) -> IonNumericResult<Triple> {
    value
        .to_triple()
        .ok_or_else(|| IonNumericError::invalid_arg(format!("{op}: operand is not finite")))
}

fn round_and_pack(triple: Triple, ctx: &mut DecimalContext) -> Decimal<'static> {
    let (coeff, exponent, inexact) =
        arith::round_to_digits(triple.sign, &triple.coefficient, triple.exponent, ctx.digits(), ctx.rounding());
    if inexact {
        ctx.raise_inexact();
    }
    Decimal::from_triple(Triple { sign: triple.sign, coefficient: coeff, exponent })
}

// ---- arity 1 ----------------------------------------------------------

/// Absolute value.
pub fn abs(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let t = require_finite(a, "abs")?;
    Ok(Decimal::from_triple(Triple { sign: Sign::Plus, ..t }))
}

/// Unary minus (sign flip).
pub fn minus(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let t = require_finite(a, "minus")?;
    Ok(Decimal::from_triple(t.negate()))
}

/// Unary plus: rounds `a` to the context's working precision without
/// otherwise changing its value.
pub fn plus(a: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let t = require_finite(a, "plus")?;
    Ok(round_and_pack(t, ctx))
}

/// Identity copy (no rounding, no sign change).
pub fn copy(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let t = require_finite(a, "copy")?;
    Ok(Decimal::from_triple(t))
}

/// Copy with the sign forced positive.
pub fn copy_abs(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    abs(a)
}

/// Copy with the sign flipped.
pub fn copy_negate(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    minus(a)
}

/// The adjusted exponent (`exponent + digit_count - 1`) as a decimal value.
pub fn logb(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let t = require_finite(a, "logb")?;
    if t.is_zero_magnitude() {
        return Err(IonNumericError::invalid_arg("logb: operand is zero"));
    }
    let adjusted = t.exponent + i64::from(t.digit_count()) - 1;
    let sign = if adjusted < 0 { Sign::Minus } else { Sign::Plus };
    Ok(Decimal::from_triple(Triple { sign, coefficient: BigUint::from(adjusted.unsigned_abs()), exponent: 0 }))
}

/// Rounds `a` to an integer, always signaling inexact if digits were
/// discarded.
pub fn to_integral_exact(a: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    round_to_integer(a, ctx, true)
}

/// Rounds `a` to an integer without signaling inexact, even if digits were
/// discarded.
pub fn to_integral_value(a: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    round_to_integer(a, ctx, false)
}

fn round_to_integer(a: &Decimal<'_>, ctx: &mut DecimalContext, signal: bool) -> IonNumericResult<Decimal<'static>> {
    let t = require_finite(a, "to-integral")?;
    if t.exponent >= 0 {
        return Ok(Decimal::from_triple(t));
    }
    let drop = u32::try_from(-t.exponent)
        .map_err(|_| IonNumericError::overflow("to-integral: exponent magnitude too large"))?;
    let target_digits = t.digit_count().saturating_sub(drop).max(1);
    let (coeff, exponent, inexact) =
        arith::round_to_digits(t.sign, &t.coefficient, t.exponent, target_digits, ctx.rounding());
    if signal && inexact {
        ctx.raise_inexact();
    }
    // exponent should now be >= 0; if rounding away all digits produced 0,
    // normalize the exponent to 0.
    let exponent = if coeff.is_zero() { 0 } else { exponent };
    Ok(Decimal::from_triple(Triple { sign: t.sign, coefficient: coeff, exponent }))
}

/// Re-expresses `a` in whichever storage form is minimal for its value
/// (the Quad/Number upgrade decision made explicit as an operator).
pub fn canonical(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    copy(a)
}

/// Trims trailing zeros from the coefficient without changing the value.
/// A zero result collapses to coefficient `0`, exponent `0`.
pub fn reduce(a: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let t = require_finite(a, "reduce")?;
    if t.coefficient.is_zero() {
        return Ok(Decimal::from_triple(Triple { sign: t.sign, coefficient: BigUint::zero(), exponent: 0 }));
    }
    let ten = BigUint::from(10u32);
    let mut coefficient = t.coefficient;
    let mut exponent = t.exponent;
    while (&coefficient % &ten).is_zero() {
        coefficient = &coefficient / &ten;
        exponent += 1;
    }
    Ok(Decimal::from_triple(Triple { sign: t.sign, coefficient, exponent }))
}

/// Bitwise NOT over the operand's coefficient, read as a string of decimal
/// digits each of which must be `0` or `1`.
pub fn invert(a: &Decimal<'_>, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let digits = logical_digits(a, ctx.digits())?;
    let flipped: Vec<u8> = digits.iter().map(|&d| 1 - d).collect();
    Ok(digits_to_decimal(&flipped))
}

// ---- arity 2 ------------------------------------------------------------

/// `a + b`.
pub fn add(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "add")?, require_finite(b, "add")?);
    Ok(round_and_pack(arith::add_exact(&ta, &tb), ctx))
}

/// `a - b`.
pub fn subtract(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "subtract")?, require_finite(b, "subtract")?);
    Ok(round_and_pack(arith::add_exact(&ta, &tb.negate()), ctx))
}

/// `a * b`.
pub fn multiply(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "multiply")?, require_finite(b, "multiply")?);
    Ok(round_and_pack(arith::multiply_exact(&ta, &tb), ctx))
}

/// `a / b`, rounded to the context's working precision.
///
/// # Errors
///
/// Returns [`IonNumericError::InvalidArg`] if `b` is zero.
pub fn divide(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "divide")?, require_finite(b, "divide")?);
    if tb.is_zero_magnitude() {
        return Err(IonNumericError::invalid_arg("divide: division by zero"));
    }
    let (triple, inexact) = arith::divide_to_digits(&ta, &tb, ctx.digits(), ctx.rounding());
    if inexact {
        ctx.raise_inexact();
    }
    Ok(Decimal::from_triple(triple))
}

/// The integer part of `a / b` (truncated toward zero), as a decimal with
/// exponent `0`.
pub fn divide_integer(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "divide-integer")?, require_finite(b, "divide-integer")?);
    if tb.is_zero_magnitude() {
        return Err(IonNumericError::invalid_arg("divide-integer: division by zero"));
    }
    let (ac, bc, _) = arith::align(&ta, &tb);
    let quotient = &ac / &bc;
    let sign = if ta.sign.is_negative() == tb.sign.is_negative() { Sign::Plus } else { Sign::Minus };
    Ok(Decimal::from_triple(Triple { sign, coefficient: quotient, exponent: 0 }))
}

/// `a - truncate(a / b) * b`.
pub fn remainder(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "remainder")?, require_finite(b, "remainder")?);
    if tb.is_zero_magnitude() {
        return Err(IonNumericError::invalid_arg("remainder: division by zero"));
    }
    Ok(Decimal::from_triple(arith::remainder(&ta, &tb)))
}

/// Like [`remainder`] but rounds the intermediate quotient to nearest-even.
pub fn remainder_near(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "remainder-near")?, require_finite(b, "remainder-near")?);
    if tb.is_zero_magnitude() {
        return Err(IonNumericError::invalid_arg("remainder-near: division by zero"));
    }
    Ok(Decimal::from_triple(arith::remainder_near(&ta, &tb)))
}

/// Numeric maximum (ties broken by [`compare_total`]).
pub fn max(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    pick(a, b, true)
}

/// Numeric minimum (ties broken by [`compare_total`]).
pub fn min(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    pick(a, b, false)
}

/// Maximum by absolute value.
pub fn max_mag(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    pick_mag(a, b, true)
}

/// Minimum by absolute value.
pub fn min_mag(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    pick_mag(a, b, false)
}

fn pick(a: &Decimal<'_>, b: &Decimal<'_>, want_max: bool) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "max/min")?, require_finite(b, "max/min")?);
    let cmp = arith::numeric_cmp(&ta, &tb);
    let a_wins = if want_max { cmp != Ordering::Less } else { cmp != Ordering::Greater };
    Ok(Decimal::from_triple(if a_wins { ta } else { tb }))
}

fn pick_mag(a: &Decimal<'_>, b: &Decimal<'_>, want_max: bool) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "max-mag/min-mag")?, require_finite(b, "max-mag/min-mag")?);
    let abs_a = Triple { sign: Sign::Plus, ..ta.clone() };
    let abs_b = Triple { sign: Sign::Plus, ..tb.clone() };
    let cmp = arith::numeric_cmp(&abs_a, &abs_b);
    let a_wins = if want_max { cmp != Ordering::Less } else { cmp != Ordering::Greater };
    Ok(Decimal::from_triple(if a_wins { ta } else { tb }))
}

/// Total order comparison distinguishing representation (General Decimal
/// Arithmetic's `compare-total`).
pub fn compare_total(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Ordering> {
    let (ta, tb) = (require_finite(a, "compare-total")?, require_finite(b, "compare-total")?);
    Ok(arith::compare_total(&ta, &tb))
}

/// Numeric equality (data-model value equality, ignoring exponent
/// representation differences).
pub fn equals(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<bool> {
    let (ta, tb) = (require_finite(a, "equals")?, require_finite(b, "equals")?);
    Ok(arith::numeric_cmp(&ta, &tb) == Ordering::Equal)
}

/// Rescales `a` to have the same exponent as `b`, rounding if necessary.
///
/// # Errors
///
/// Returns [`IonNumericError::NumericOverflow`] if the rescaled coefficient
/// would need more digits than the context allows.
pub fn quantize(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "quantize")?, require_finite(b, "quantize")?);
    let (coefficient, inexact) = arith::round_to_exponent(ta.sign, &ta.coefficient, ta.exponent, tb.exponent, ctx.rounding());
    let triple = Triple { sign: ta.sign, coefficient, exponent: tb.exponent };
    if triple.digit_count() > ctx.digits() {
        return Err(IonNumericError::overflow("quantize: result exceeds working precision"));
    }
    if inexact {
        ctx.raise_inexact();
    }
    Ok(Decimal::from_triple(triple))
}

/// Copies `b`'s sign onto `a`'s magnitude.
pub fn copy_sign(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "copy-sign")?, require_finite(b, "copy-sign")?);
    Ok(Decimal::from_triple(Triple { sign: tb.sign, ..ta }))
}

/// Multiplies `a`'s exponent by adding `b` (`b` must be a small integer
/// decimal), i.e. `a * 10^b`.
pub fn scaleb(a: &Decimal<'_>, b: &Decimal<'_>) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb) = (require_finite(a, "scaleb")?, require_finite(b, "scaleb")?);
    if tb.exponent != 0 {
        return Err(IonNumericError::invalid_arg("scaleb: second operand must be an integer"));
    }
    let delta: i64 = tb
        .coefficient
        .to_string()
        .parse()
        .map_err(|_| IonNumericError::overflow("scaleb: exponent delta too large"))?;
    let delta = if tb.sign.is_negative() { -delta } else { delta };
    Ok(Decimal::from_triple(Triple { sign: ta.sign, coefficient: ta.coefficient, exponent: ta.exponent + delta }))
}

/// Shifts `a`'s coefficient digits left (positive `b`) or right (negative
/// `b`), zero-filling vacated positions and discarding digits shifted out —
/// a base-10 analogue of a bit shift.
pub fn shift(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let ta = require_finite(a, "shift")?;
    let amount = small_integer(b, "shift")?;
    let digits = ctx.digits() as usize;
    let mut chars = pad_digit_string(&ta.coefficient, digits);
    let shifted = shift_digits(&mut chars, amount);
    Ok(Decimal::from_triple(Triple { sign: ta.sign, coefficient: digit_string_to_biguint(&shifted), exponent: ta.exponent }))
}

/// Rotates `a`'s coefficient digits (within the context's working
/// precision) left (positive `b`) or right (negative `b`).
pub fn rotate(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let ta = require_finite(a, "rotate")?;
    let amount = small_integer(b, "rotate")?;
    let digits = ctx.digits() as usize;
    let chars = pad_digit_string(&ta.coefficient, digits);
    let rotated = rotate_digits(&chars, amount);
    Ok(Decimal::from_triple(Triple { sign: ta.sign, coefficient: digit_string_to_biguint(&rotated), exponent: ta.exponent }))
}

/// Digit-wise logical AND over two coefficients of `0`/`1` digits.
pub fn and(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    logical_binary(a, b, ctx, |x, y| x & y)
}

/// Digit-wise logical OR.
pub fn or(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    logical_binary(a, b, ctx, |x, y| x | y)
}

/// Digit-wise logical XOR.
pub fn xor(a: &Decimal<'_>, b: &Decimal<'_>, ctx: &DecimalContext) -> IonNumericResult<Decimal<'static>> {
    logical_binary(a, b, ctx, |x, y| x ^ y)
}

// ---- arity 3 --------------------------------------------------------------

/// Fused multiply-add: `a * b + c`, rounded once.
pub fn fma(a: &Decimal<'_>, b: &Decimal<'_>, c: &Decimal<'_>, ctx: &mut DecimalContext) -> IonNumericResult<Decimal<'static>> {
    let (ta, tb, tc) = (require_finite(a, "fma")?, require_finite(b, "fma")?, require_finite(c, "fma")?);
    let product = arith::multiply_exact(&ta, &tb);
    Ok(round_and_pack(arith::add_exact(&product, &tc), ctx))
}

// ---- logical/shift helpers --------------------------------------------

fn small_integer(value: &Decimal<'_>, op: &str) -> IonNumericResult<i32> {
    let t = require_finite(value, op)?;
    if t.exponent != 0 {
        return Err(IonNumericError::invalid_arg(format!("{op}: operand must be an integer")));
    }
    let magnitude: i32 = t
        .coefficient
        .to_string()
        .parse()
        .map_err(|_| IonNumericError::overflow(format!("{op}: shift/rotate amount too large")))?;
    Ok(if t.sign.is_negative() { -magnitude } else { magnitude })
}

fn pad_digit_string(coefficient: &BigUint, width: usize) -> Vec<u8> {
    let s = coefficient.to_string();
    let mut digits: Vec<u8> = s.bytes().map(|b| b - b'0').collect();
    if digits.len() < width {
        let mut padded = vec![0u8; width - digits.len()];
        padded.append(&mut digits);
        digits = padded;
    } else if digits.len() > width {
        digits = digits[digits.len() - width..].to_vec();
    }
    digits
}

fn shift_digits(digits: &mut [u8], amount: i32) -> Vec<u8> {
    let len = digits.len();
    let mut out = vec![0u8; len];
    if amount >= 0 {
        let amount = (amount as usize).min(len);
        out[amount..].copy_from_slice(&digits[..len - amount]);
    } else {
        let amount = ((-amount) as usize).min(len);
        out[..len - amount].copy_from_slice(&digits[amount..]);
    }
    out
}

fn rotate_digits(digits: &[u8], amount: i32) -> Vec<u8> {
    let len = digits.len() as i32;
    if len == 0 {
        return Vec::new();
    }
    let normalized = ((amount % len) + len) % len;
    let split = (len - normalized) as usize;
    let mut out = digits[split..].to_vec();
    out.extend_from_slice(&digits[..split]);
    out
}

fn digit_string_to_biguint(digits: &[u8]) -> BigUint {
    let s: String = digits.iter().map(|&d| (d + b'0') as char).collect();
    s.parse().unwrap_or_else(|_| BigUint::zero())
}

fn logical_digits(value: &Decimal<'_>, width: u32) -> IonNumericResult<Vec<u8>> {
    let t = require_finite(value, "logical")?;
    if t.exponent != 0 || t.sign.is_negative() {
        return Err(IonNumericError::invalid_arg("logical operand must have exponent 0 and a positive sign"));
    }
    let digits = pad_digit_string(&t.coefficient, width as usize);
    if digits.iter().any(|&d| d > 1) {
        return Err(IonNumericError::invalid_arg("logical operand digits must each be 0 or 1"));
    }
    Ok(digits)
}

fn digits_to_decimal(digits: &[u8]) -> Decimal<'static> {
    Decimal::from_triple(Triple { sign: Sign::Plus, coefficient: digit_string_to_biguint(digits), exponent: 0 })
}

fn logical_binary(
    a: &Decimal<'_>,
    b: &Decimal<'_>,
    ctx: &DecimalContext,
    op: impl Fn(u8, u8) -> u8,
) -> IonNumericResult<Decimal<'static>> {
    let da = logical_digits(a, ctx.digits())?;
    let db = logical_digits(b, ctx.digits())?;
    let combined: Vec<u8> = da.iter().zip(db.iter()).map(|(&x, &y)| op(x, y)).collect();
    Ok(digits_to_decimal(&combined))
}
