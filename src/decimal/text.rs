//! The Ion text decimal grammar.
//!
//! # Overview
//!
//! Text decimals are `[sign] digits ['.' digits] [('d'|'D'|'e'|'E') [sign] digits]`,
//! plus the three non-finite spellings `nan`, `+inf`, `-inf` the underlying
//! decNumber-family arithmetic can produce (though Ion's data model itself
//! has no decimal NaN/infinity — those only arise as intermediate
//! [`super::Number`] results from [`super::ops`]).
//!
//! # Design
//!
//! Hand-rolled recursive-descent-style scanning over the input bytes rather
//! than a parser-combinator or regex crate, matching [`crate::varint`]'s own
//! hand-rolled approach to the binary grammars.

use num_bigint::BigUint;

use crate::bigint::Sign;
use crate::decimal::arith::Triple;
use crate::decimal::{Decimal, Number, NumberKind};
use crate::error::{IonNumericError, IonNumericResult};

/// Parses a decimal text literal.
///
/// # Errors
///
/// Returns [`IonNumericError::InvalidArg`] if `input` does not match the
/// decimal grammar.
pub fn parse_decimal(input: &str) -> IonNumericResult<Decimal<'static>> {
    let s = input.trim();
    match s {
        "nan" => return Ok(Decimal::Number(Number::owned(NumberKind::NaN))),
        "+inf" => return Ok(Decimal::Number(Number::owned(NumberKind::Infinity { sign: Sign::Plus }))),
        "-inf" => return Ok(Decimal::Number(Number::owned(NumberKind::Infinity { sign: Sign::Minus }))),
        _ => {}
    }

    let bytes = s.as_bytes();
    let mut i = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = &s[frac_start..i];
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(IonNumericError::invalid_arg(format!("decimal literal {input:?} has no digits")));
    }

    let mut exponent: i64 = 0;
    if matches!(bytes.get(i), Some(b'd' | b'D' | b'e' | b'E')) {
        i += 1;
        let exp_negative = match bytes.get(i) {
            Some(b'-') => {
                i += 1;
                true
            }
            Some(b'+') => {
                i += 1;
                false
            }
            _ => false,
        };
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if exp_start == i {
            return Err(IonNumericError::invalid_arg(format!("decimal literal {input:?} is missing exponent digits")));
        }
        let magnitude: i64 = s[exp_start..i]
            .parse()
            .map_err(|_| IonNumericError::overflow(format!("decimal literal {input:?} has an unrepresentable exponent")))?;
        exponent = if exp_negative { -magnitude } else { magnitude };
    }

    if i != bytes.len() {
        return Err(IonNumericError::invalid_arg(format!("decimal literal {input:?} has trailing characters")));
    }

    let combined = format!("{int_digits}{frac_digits}");
    let combined = if combined.is_empty() { "0" } else { combined.as_str() };
    let coefficient: BigUint = combined
        .parse()
        .map_err(|_| IonNumericError::invalid_arg(format!("decimal literal {input:?} has an invalid coefficient")))?;
    let final_exponent = exponent - frac_digits.len() as i64;
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    Ok(Decimal::from_triple(Triple { sign, coefficient, exponent: final_exponent }))
}

/// Formats `value` per the decimal text grammar, following the General
/// Decimal Arithmetic to-scientific-string algorithm: plain (pointed)
/// notation is used when the exponent is non-positive and the adjusted
/// exponent (`exponent + digit_count - 1`) is no smaller than `-6`;
/// otherwise the value is rendered in scientific notation with the `d`
/// exponent marker.
#[must_use]
pub fn format_decimal(value: &Decimal<'_>) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.sign().is_negative() { "-inf".to_string() } else { "+inf".to_string() };
    }
    let triple = value.to_triple().expect("finite and non-special values always convert to a Triple");
    let sign = if triple.sign.is_negative() { "-" } else { "" };
    let digits = triple.coefficient.to_string();
    let digit_count = digits.len() as i64;
    let adjusted_exponent = triple.exponent + digit_count - 1;

    if triple.exponent <= 0 && adjusted_exponent >= -6 {
        if triple.exponent == 0 {
            // No `.` or `d` would otherwise appear in this branch's output,
            // which would parse back as an integer rather than a decimal;
            // append `d0` (this also covers the canonical `0d0` zero case,
            // since zero's coefficient string is always the single digit
            // `0`).
            return format!("{sign}{digits}d0");
        }
        let point_pos = digit_count + triple.exponent;
        return if point_pos <= 0 {
            let zeros = "0".repeat((-point_pos) as usize);
            format!("{sign}0.{zeros}{digits}")
        } else {
            let (int_part, frac_part) = digits.split_at(point_pos as usize);
            format!("{sign}{int_part}.{frac_part}")
        };
    }

    let (lead, rest) = digits.split_at(1);
    let mantissa = if rest.is_empty() { lead.to_string() } else { format!("{lead}.{rest}") };
    let exp_sign = if adjusted_exponent < 0 { "-" } else { "+" };
    format!("{sign}{mantissa}d{exp_sign}{}", adjusted_exponent.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", Sign::Plus, "0", 0)]
    #[case("-0", Sign::Minus, "0", 0)]
    #[case("123", Sign::Plus, "123", 0)]
    #[case("-123.45", Sign::Minus, "12345", -2)]
    #[case("0d-5", Sign::Plus, "0", -5)]
    #[case("1.2d3", Sign::Plus, "12", 2)]
    fn parses_expected_triple(#[case] input: &str, #[case] sign: Sign, #[case] digits: &str, #[case] exponent: i64) {
        let decimal = parse_decimal(input).unwrap();
        let triple = decimal.to_triple().unwrap();
        assert_eq!(triple.sign, sign);
        assert_eq!(triple.coefficient, digits.parse::<BigUint>().unwrap());
        assert_eq!(triple.exponent, exponent);
    }

    #[test]
    fn parses_special_values() {
        assert!(parse_decimal("nan").unwrap().is_nan());
        assert!(parse_decimal("+inf").unwrap().is_infinite());
        assert!(parse_decimal("-inf").unwrap().is_infinite());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("1.2.3").is_err());
        assert!(parse_decimal("1d").is_err());
    }

    #[test]
    fn formats_exponent_zero_with_d0_suffix() {
        let decimal = parse_decimal("100d0").unwrap();
        assert_eq!(format_decimal(&decimal), "100d0");
    }

    #[test]
    fn formats_canonical_positive_zero_as_0d0() {
        let decimal = parse_decimal("0").unwrap();
        assert_eq!(format_decimal(&decimal), "0d0");
    }

    #[test]
    fn formats_canonical_zero_from_0d0_roundtrips() {
        let decimal = parse_decimal("0d0").unwrap();
        assert_eq!(format_decimal(&decimal), "0d0");
    }

    #[test]
    fn formats_negative_exponent_with_decimal_point() {
        let decimal = parse_decimal("-123.45").unwrap();
        assert_eq!(format_decimal(&decimal), "-123.45");
    }

    #[test]
    fn formats_fraction_needing_leading_zeros() {
        let decimal = parse_decimal("5d-4").unwrap();
        assert_eq!(format_decimal(&decimal), "0.0005");
    }

    #[test]
    fn formats_positive_exponent_in_scientific_notation() {
        // coefficient "12", exponent 5 -> adjusted exponent 5 + 2 - 1 = 6.
        let decimal = parse_decimal("12d5").unwrap();
        assert_eq!(format_decimal(&decimal), "1.2d+6");
    }

    #[test]
    fn formats_single_digit_positive_exponent_with_no_mantissa_point() {
        let decimal = parse_decimal("1d5").unwrap();
        assert_eq!(format_decimal(&decimal), "1d+5");
    }

    #[test]
    fn formats_very_negative_adjusted_exponent_in_scientific_notation() {
        let decimal = parse_decimal("0.0000000001").unwrap();
        assert_eq!(format_decimal(&decimal), "1d-10");
    }

    #[test]
    fn formats_special_values() {
        assert_eq!(format_decimal(&parse_decimal("nan").unwrap()), "nan");
        assert_eq!(format_decimal(&parse_decimal("+inf").unwrap()), "+inf");
        assert_eq!(format_decimal(&parse_decimal("-inf").unwrap()), "-inf");
    }
}
