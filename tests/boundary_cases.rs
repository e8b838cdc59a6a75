//! Table-driven boundary cases and concrete scenarios exercised
//! end-to-end across module boundaries (unlike the unit tests alongside
//! each module, which check one function in isolation).

use ion_numerics::bigint::Sign;
use ion_numerics::decimal::{binary as decimal_binary, text as decimal_text, Triple};
use ion_numerics::io::{BufferSink, SliceCursor};
use ion_numerics::timestamp::{binary as timestamp_binary, text as timestamp_text};
use ion_numerics::varint::{self, SignedMagnitude};
use ion_numerics::{Decimal, DecimalContext};
use num_bigint::BigUint;
use rstest::rstest;

#[test]
fn scenario_var_uint_zero_is_0x80() {
    let mut sink = BufferSink::new();
    varint::write_var_uint(&mut sink, 0);
    assert_eq!(sink.as_slice(), &[0x80]);
}

#[test]
fn scenario_var_uint_128_is_two_octets() {
    let mut sink = BufferSink::new();
    varint::write_var_uint(&mut sink, 128);
    assert_eq!(sink.as_slice(), &[0x01, 0x80]);
}

#[test]
fn scenario_var_int_minus_one_zero_and_negative_zero() {
    let mut sink = BufferSink::new();
    varint::write_var_int(&mut sink, SignedMagnitude::from_i64(-1));
    assert_eq!(sink.as_slice(), &[0xC1]);

    let mut sink = BufferSink::new();
    varint::write_var_int(&mut sink, SignedMagnitude::zero());
    assert_eq!(sink.as_slice(), &[0x80]);

    let mut sink = BufferSink::new();
    varint::write_var_int(&mut sink, SignedMagnitude::negative_zero());
    assert_eq!(sink.as_slice(), &[0xC0]);
}

#[test]
fn scenario_decimal_body_c1_03_decodes_to_zero_point_three() {
    let bytes = [0xC1u8, 0x03];
    let mut cursor = SliceCursor::new(&bytes);
    let ctx = DecimalContext::builder().build();
    let decoded = decimal_binary::read_decimal(&mut cursor, bytes.len(), &ctx).unwrap();
    let triple = decoded.to_triple().unwrap();
    assert_eq!(triple.sign, Sign::Plus);
    assert_eq!(triple.coefficient, BigUint::from(3u32));
    assert_eq!(triple.exponent, -1);
    assert_eq!(decimal_text::format_decimal(&decoded), "0.3");
}

#[test]
fn scenario_full_precision_utc_timestamp_reemits_byte_identical() {
    let input = "2000-01-01T00:00:00.000Z";
    let ts = timestamp_text::parse_timestamp(input).unwrap();
    assert_eq!(timestamp_text::format_timestamp(&ts), input);
}

#[test]
fn scenario_year_only_unknown_offset_reemits_as_bare_year_t() {
    let ts = timestamp_text::parse_timestamp("2000T").unwrap();
    assert_eq!(timestamp_text::format_timestamp(&ts), "2000T");
}

#[test]
fn scenario_trailing_zeros_are_preserved_through_text_and_binary() {
    let ts = decimal_text::parse_decimal("1.00").unwrap();
    let triple = ts.to_triple().unwrap();
    assert_eq!(triple.coefficient, BigUint::from(100u32));
    assert_eq!(triple.exponent, -2);

    let mut sink = BufferSink::new();
    decimal_binary::write_decimal(&mut sink, &ts).unwrap();
    let bytes = sink.into_inner();
    let mut cursor = SliceCursor::new(&bytes);
    let ctx = DecimalContext::builder().build();
    let decoded = decimal_binary::read_decimal(&mut cursor, bytes.len(), &ctx).unwrap();
    assert_eq!(decimal_text::format_decimal(&decoded), "1.00");
}

#[rstest]
#[case("0d-5")]
#[case("0.0000000001")]
fn boundary_zero_and_tiny_fraction_roundtrip_text(#[case] input: &str) {
    let decoded = decimal_text::parse_decimal(input).unwrap();
    let mut sink = BufferSink::new();
    decimal_binary::write_decimal(&mut sink, &decoded).unwrap();
    let bytes = sink.into_inner();
    let mut cursor = SliceCursor::new(&bytes);
    let ctx = DecimalContext::builder().build();
    let redecoded = decimal_binary::read_decimal(&mut cursor, bytes.len(), &ctx).unwrap();
    assert_eq!(redecoded.to_triple(), decoded.to_triple());
}

#[rstest]
#[case(34, false)] // 34 nines fits in a Quad
#[case(35, true)] // 35 nines forces Number
fn boundary_quad_digit_limit(#[case] nines: u32, #[case] expect_number: bool) {
    let coefficient = BigUint::from(10u32).pow(nines) - 1u32;
    let value = Decimal::from_triple(Triple { sign: Sign::Plus, coefficient, exponent: 0 });
    assert_eq!(matches!(value, Decimal::Number(_)), expect_number);
}

#[rstest]
#[case("0001-01-01T")]
#[case("9999-12-31T")]
fn boundary_year_extremes_roundtrip(#[case] input: &str) {
    let ts = timestamp_text::parse_timestamp(input).unwrap();
    assert_eq!(timestamp_text::format_timestamp(&ts), input);
}

#[rstest]
#[case(2000, true)] // divisible by 400
#[case(1900, false)] // divisible by 100 but not 400
#[case(2400, true)]
#[case(2004, true)]
#[case(2023, false)]
fn boundary_leap_year_feb_29(#[case] year: u16, #[case] is_leap: bool) {
    let result = ion_numerics::TimestampBuilder::for_year(year)
        .unwrap()
        .for_month(2)
        .unwrap()
        .for_day(29);
    assert_eq!(result.is_ok(), is_leap, "year {year}");
}

#[rstest]
#[case("2007-02-23T12:14:33+14:00")]
#[case("2007-02-23T12:14:33-14:00")]
fn boundary_offset_extremes_roundtrip(#[case] input: &str) {
    let ts = timestamp_text::parse_timestamp(input).unwrap();
    assert_eq!(timestamp_text::format_timestamp(&ts), input);
}

#[rstest]
#[case("2007-02-23T12:14:33.079Z")]
#[case("2007-02-23T12:14:33-00:00")]
#[case("2007T")]
fn text_to_binary_to_text_roundtrips(#[case] input: &str) {
    let from_text = timestamp_text::parse_timestamp(input).unwrap();
    let mut sink = BufferSink::new();
    timestamp_binary::write_timestamp(&mut sink, &from_text).unwrap();
    let bytes = sink.into_inner();
    let mut cursor = SliceCursor::new(&bytes);
    let from_binary = timestamp_binary::read_timestamp(&mut cursor, bytes.len()).unwrap();
    assert_eq!(timestamp_text::format_timestamp(&from_binary), input);
}

#[test]
fn negative_zero_var_int_survives_roundtrip_distinct_from_positive() {
    let mut sink = BufferSink::new();
    varint::write_var_int(&mut sink, SignedMagnitude::negative_zero());
    let bytes = sink.into_inner();
    let mut cursor = SliceCursor::new(&bytes);
    let decoded = varint::read_var_int(&mut cursor).unwrap();
    assert!(decoded.is_negative_zero());
    assert_ne!(decoded, SignedMagnitude::zero());
}
