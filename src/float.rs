//! The binary64 float wire form.
//!
//! # Overview
//!
//! Ion's binary floats occupy either zero octets (positive zero) or exactly
//! eight octets (the big-endian IEEE-754 `binary64` bit pattern, including
//! negative zero). There is no 4-octet `binary32` form in this codec.
//!
//! # Invariants
//!
//! - `write_float(+0.0)` emits nothing; every other value, including
//!   negative zero, NaN, and both infinities, emits 8 octets.
//! - `read_float` only accepts body lengths of 0 or 8; anything else is
//!   [`IonNumericError::InvalidBinary`].

use crate::error::{IonNumericError, IonNumericResult};
use crate::io::ByteSink;

/// Encodes `value` as an Ion binary float and writes it to `sink`, returning
/// the number of octets written (0 or 8).
pub fn write_float(sink: &mut impl ByteSink, value: f64) -> usize {
    if value == 0.0 && !value.is_sign_negative() {
        return 0;
    }
    sink.write_bytes(&value.to_bits().to_be_bytes())
}

/// Decodes an Ion binary float body of `len` octets from `cursor`.
///
/// # Errors
///
/// Returns [`IonNumericError::InvalidBinary`] if `len` is neither 0 nor 8.
pub fn read_float(cursor: &mut crate::io::SliceCursor<'_>, len: usize) -> IonNumericResult<f64> {
    match len {
        0 => Ok(0.0),
        8 => {
            let mut bytes = [0u8; 8];
            for b in &mut bytes {
                *b = cursor.read_byte()?;
            }
            Ok(f64::from_bits(u64::from_be_bytes(bytes)))
        }
        other => Err(IonNumericError::invalid_binary(
            cursor.position(),
            format!("float body must be 0 or 8 octets, got {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{BufferSink, SliceCursor};

    #[test]
    fn positive_zero_emits_nothing() {
        let mut sink = BufferSink::new();
        assert_eq!(write_float(&mut sink, 0.0), 0);
        assert!(sink.as_slice().is_empty());
    }

    #[test]
    fn negative_zero_emits_eight_octets_and_roundtrips_distinctly() {
        let mut sink = BufferSink::new();
        assert_eq!(write_float(&mut sink, -0.0), 8);
        let bytes = sink.into_inner();
        let mut cursor = SliceCursor::new(&bytes);
        let decoded = read_float(&mut cursor, 8).unwrap();
        assert!(decoded.is_sign_negative());
        assert_eq!(decoded, 0.0);
    }

    #[test]
    fn finite_values_roundtrip() {
        for v in [1.0_f64, -1.5, f64::MIN_POSITIVE, 12345.6789, -0.000_001] {
            let mut sink = BufferSink::new();
            write_float(&mut sink, v);
            let bytes = sink.into_inner();
            let mut cursor = SliceCursor::new(&bytes);
            assert_eq!(read_float(&mut cursor, bytes.len()).unwrap(), v);
        }
    }

    #[test]
    fn nan_and_infinities_roundtrip_bitwise() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut sink = BufferSink::new();
            write_float(&mut sink, v);
            let bytes = sink.into_inner();
            let mut cursor = SliceCursor::new(&bytes);
            let decoded = read_float(&mut cursor, bytes.len()).unwrap();
            assert_eq!(decoded.to_bits(), v.to_bits());
        }
    }

    #[test]
    fn invalid_length_is_rejected() {
        let bytes = [0u8; 4];
        let mut cursor = SliceCursor::new(&bytes);
        assert!(read_float(&mut cursor, 4).is_err());
    }
}
