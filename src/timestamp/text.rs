//! The Ion text timestamp grammar.
//!
//! # Overview
//!
//! Six literal shapes, one per [`Precision`] level: `yyyyT`, `yyyy-MMT`,
//! `yyyy-MM-ddT`, `yyyy-MM-ddTHH:mmZZZ`, `...HH:mm:ssZZZ`, and
//! `...HH:mm:ss.fffZZZ`, where `ZZZ` is `Z` or a signed `HH:MM` offset. The
//! sentinel offset `-00:00` means "local time, offset unknown".
//!
//! # Design
//!
//! Every slice into the input is length-checked before indexing — a
//! malformed or truncated literal must return
//! [`IonNumericError::InvalidTimestamp`], never panic.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{IonNumericError, IonNumericResult};
use crate::timestamp::builder::{Offset, Timestamp, TimestampBuilder};

fn split_at_checked(s: &str, n: usize) -> IonNumericResult<(&str, &str)> {
    if s.len() < n {
        return Err(IonNumericError::invalid_timestamp(format!("{s:?} is too short")));
    }
    Ok(s.split_at(n))
}

fn parse_u16(s: &str, field: &str) -> IonNumericResult<u16> {
    s.parse().map_err(|_| IonNumericError::invalid_timestamp(format!("invalid {field} {s:?}")))
}

fn parse_u8(s: &str, field: &str) -> IonNumericResult<u8> {
    s.parse().map_err(|_| IonNumericError::invalid_timestamp(format!("invalid {field} {s:?}")))
}

/// Characters at which an Ion text literal may end without the value's own
/// grammar saying so — anything else trailing the literal is an error.
const BOUNDARY_CHARS: [char; 15] =
    [' ', '\t', '\n', '\r', ',', '"', '\'', '(', ')', '[', ']', '{', '}', '/', '\0'];

fn check_boundary(rest: &str) -> IonNumericResult<()> {
    match rest.chars().next() {
        None => Ok(()),
        Some(c) if BOUNDARY_CHARS.contains(&c) => Ok(()),
        Some(_) => Err(IonNumericError::invalid_timestamp(format!("unexpected trailing character(s) {rest:?}"))),
    }
}

/// Parses the offset grammar from the front of `s`, returning the offset and
/// whatever follows it (checked against [`BOUNDARY_CHARS`] by the caller).
fn parse_offset(s: &str) -> IonNumericResult<(Offset, &str)> {
    if let Some(rest) = s.strip_prefix('Z') {
        return Ok((Offset::utc(), rest));
    }
    let (head, rest) = split_at_checked(s, 6)?;
    let bytes = head.as_bytes();
    let negative = match bytes[0] {
        b'+' => false,
        b'-' => true,
        _ => return Err(IonNumericError::invalid_timestamp(format!("invalid offset sign in {head:?}"))),
    };
    if &head[3..4] != ":" {
        return Err(IonNumericError::invalid_timestamp(format!("invalid offset separator in {head:?}")));
    }
    let hh: i16 = parse_u16(&head[1..3], "offset hour")? as i16;
    let mm: i16 = parse_u16(&head[4..6], "offset minute")? as i16;
    if hh > 23 || mm > 59 {
        return Err(IonNumericError::invalid_timestamp(format!("offset out of range in {head:?}")));
    }
    let total = hh * 60 + mm;
    let offset = if negative && total == 0 {
        Offset::unknown()
    } else {
        Offset::known(if negative { -total } else { total })?
    };
    Ok((offset, rest))
}

fn format_offset(offset: Offset) -> String {
    if !offset.is_known() {
        return "-00:00".to_string();
    }
    if offset.minutes() == 0 {
        return "Z".to_string();
    }
    let minutes = offset.minutes();
    let sign = if minutes < 0 { "-" } else { "+" };
    let abs = minutes.unsigned_abs();
    format!("{sign}{:02}:{:02}", abs / 60, abs % 60)
}

/// Parses a timestamp text literal.
///
/// # Errors
///
/// Returns [`IonNumericError::InvalidTimestamp`] if `input` does not match
/// any of the six timestamp shapes.
pub fn parse_timestamp(input: &str) -> IonNumericResult<Timestamp> {
    let (year_str, rest) = split_at_checked(input, 4)?;
    let year = parse_u16(year_str, "year")?;
    let mut builder = TimestampBuilder::for_year(year)?;

    if let Some(after_t) = rest.strip_prefix('T') {
        check_boundary(after_t)?;
        return Ok(builder.build());
    }
    let (dash, rest) = split_at_checked(rest, 1)?;
    if dash != "-" {
        return Err(IonNumericError::invalid_timestamp(format!("expected '-' after year in {input:?}")));
    }
    let (month_str, rest) = split_at_checked(rest, 2)?;
    builder = builder.for_month(parse_u8(month_str, "month")?)?;

    if let Some(after_t) = rest.strip_prefix('T') {
        check_boundary(after_t)?;
        return Ok(builder.build());
    }
    let (dash, rest) = split_at_checked(rest, 1)?;
    if dash != "-" {
        return Err(IonNumericError::invalid_timestamp(format!("expected '-' after month in {input:?}")));
    }
    let (day_str, rest) = split_at_checked(rest, 2)?;
    builder = builder.for_day(parse_u8(day_str, "day")?)?;

    let (t, rest) = split_at_checked(rest, 1)?;
    if t != "T" {
        return Err(IonNumericError::invalid_timestamp(format!("expected 'T' after day in {input:?}")));
    }
    if rest.is_empty() || rest.chars().next().is_some_and(|c| BOUNDARY_CHARS.contains(&c)) {
        return Ok(builder.build());
    }

    let (hour_str, rest) = split_at_checked(rest, 2)?;
    let (colon, rest) = split_at_checked(rest, 1)?;
    if colon != ":" {
        return Err(IonNumericError::invalid_timestamp(format!("expected ':' after hour in {input:?}")));
    }
    let (minute_str, rest) = split_at_checked(rest, 2)?;
    let hour = parse_u8(hour_str, "hour")?;
    let minute = parse_u8(minute_str, "minute")?;

    if let Some(seconds_rest) = rest.strip_prefix(':') {
        let (second_str, rest) = split_at_checked(seconds_rest, 2)?;
        let second = parse_u8(second_str, "second")?;

        let (has_fraction, fraction_coefficient, fraction_exponent, rest) = if let Some(frac_rest) = rest.strip_prefix('.') {
            let digit_end = frac_rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac_rest.len());
            if digit_end == 0 {
                return Err(IonNumericError::invalid_timestamp(format!("missing fraction digits in {input:?}")));
            }
            let (frac_digits, rest) = frac_rest.split_at(digit_end);
            let coefficient: BigUint = frac_digits
                .parse()
                .map_err(|_| IonNumericError::invalid_timestamp(format!("invalid fraction digits in {input:?}")))?;
            (true, coefficient, -(digit_end as i32), rest)
        } else {
            (false, BigUint::zero(), 0, rest)
        };

        let (offset, rest) = parse_offset(rest)?;
        check_boundary(rest)?;
        builder = builder.for_minute(hour, minute, offset)?.for_second(second)?;
        if has_fraction {
            builder = builder.for_fraction(fraction_coefficient, fraction_exponent)?;
        }
        Ok(builder.build())
    } else {
        let (offset, rest) = parse_offset(rest)?;
        check_boundary(rest)?;
        builder = builder.for_minute(hour, minute, offset)?;
        Ok(builder.build())
    }
}

/// Formats `ts` per the text grammar, at exactly its own precision.
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    use crate::timestamp::precision::Precision;
    let mut out = format!("{:04}", ts.year());
    if ts.precision() == Precision::Year {
        out.push('T');
        return out;
    }
    out.push_str(&format!("-{:02}", ts.month()));
    if ts.precision() == Precision::Month {
        out.push('T');
        return out;
    }
    out.push_str(&format!("-{:02}", ts.day()));
    out.push('T');
    if ts.precision() == Precision::Day {
        return out;
    }
    out.push_str(&format!("{:02}:{:02}", ts.hour(), ts.minute()));
    if ts.precision() == Precision::Minute {
        out.push_str(&format_offset(ts.offset()));
        return out;
    }
    out.push_str(&format!(":{:02}", ts.second()));
    if ts.precision() == Precision::Second {
        out.push_str(&format_offset(ts.offset()));
        return out;
    }
    let (coefficient, exponent) = ts.fraction();
    let width = (-exponent) as usize;
    let raw = coefficient.to_string();
    let digits = if raw.len() < width { format!("{}{raw}", "0".repeat(width - raw.len())) } else { raw };
    out.push('.');
    out.push_str(&digits);
    out.push_str(&format_offset(ts.offset()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::precision::Precision;
    use rstest::rstest;

    #[rstest]
    #[case("2007T", Precision::Year)]
    #[case("2007-02T", Precision::Month)]
    #[case("2007-02-23T", Precision::Day)]
    #[case("2007-02-23T12:14Z", Precision::Minute)]
    #[case("2007-02-23T12:14:33Z", Precision::Second)]
    #[case("2007-02-23T12:14:33.079Z", Precision::Fraction)]
    fn parses_each_precision(#[case] input: &str, #[case] precision: Precision) {
        let ts = parse_timestamp(input).unwrap();
        assert_eq!(ts.precision(), precision);
    }

    #[test]
    fn roundtrips_through_format() {
        for input in [
            "2007T",
            "2007-02T",
            "2007-02-23T",
            "2007-02-23T12:14Z",
            "2007-02-23T12:14:33Z",
            "2007-02-23T12:14:33.079Z",
            "2007-02-23T12:14:33.0000000001Z",
            "0001-01-01T",
            "9999-12-31T23:59:59.9Z",
            "2007-02-23T12:14:33+14:00",
            "2007-02-23T12:14:33-00:00",
        ] {
            let ts = parse_timestamp(input).unwrap();
            assert_eq!(format_timestamp(&ts), input, "roundtrip of {input}");
        }
    }

    #[test]
    fn unknown_offset_parses_distinctly_from_utc() {
        let unknown = parse_timestamp("2007-02-23T12:14:33-00:00").unwrap();
        let utc = parse_timestamp("2007-02-23T12:14:33Z").unwrap();
        assert!(!unknown.offset().is_known());
        assert!(utc.offset().is_known());
    }

    #[test]
    fn rejects_truncated_literal() {
        assert!(parse_timestamp("2007-0").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn rejects_invalid_offset() {
        assert!(parse_timestamp("2007-02-23T12:14:33+25:00").is_err());
    }

    #[rstest]
    #[case("2007T,", "2007T")]
    #[case("2007-02T)", "2007-02T")]
    #[case("2007-02-23T ", "2007-02-23T")]
    #[case("2007-02-23T12:14Z\n", "2007-02-23T12:14Z")]
    #[case("2007-02-23T12:14:33Z]", "2007-02-23T12:14:33Z")]
    #[case("2007-02-23T12:14:33.079Z}", "2007-02-23T12:14:33.079Z")]
    fn parsing_stops_at_ion_token_boundary_characters(#[case] input: &str, #[case] expected_literal: &str) {
        let ts = parse_timestamp(input).unwrap();
        assert_eq!(format_timestamp(&ts), expected_literal);
    }

    #[test]
    fn trailing_non_boundary_character_is_an_error() {
        assert!(parse_timestamp("2007Tx").is_err());
        assert!(parse_timestamp("2007-02-23T12:14Zx").is_err());
        assert!(parse_timestamp("2007-02-23T12:14:33+14:00x").is_err());
    }
}
