#![doc = r#"
The 80-bit IEEE extended-precision float codec.

AIFF stores the sample rate of its `COMM` chunk as a 10-byte big-endian
extended-precision float: 1 sign bit, a 15-bit exponent biased by
16383, and 64 explicit mantissa bits with no implicit leading bit.

[`encode`] derives the exponent/mantissa pair straight from the `f64`
bit pattern, and [`decode`] rebuilds the `f64` the same way, so the
round trip is exact for every finite `f64` (the mantissa has 11 spare
bits over `f64`'s 53). Values with more than 53 significant mantissa
bits, which no real sample rate has, decode with round-half-even.
"#]

use thiserror::Error;

/// The error produced when asked to encode a NaN sample rate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot encode NaN as an 80-bit extended float")]
pub struct NanError;

const EXP_BIAS: i32 = 16383;
const F64_FRAC_BITS: u64 = (1 << 52) - 1;

/// Convert a native double to its 10-byte extended-precision
/// representation.
///
/// Zero keeps its sign; infinities map to the extended infinity
/// encoding; NaN is reported rather than silently coerced.
pub fn encode(value: f64) -> Result<[u8; 10], NanError> {
    if value.is_nan() {
        return Err(NanError);
    }

    let bits = value.to_bits();
    let sign = (bits >> 63) as u8;
    let e = ((bits >> 52) & 0x7FF) as i32;
    let frac = bits & F64_FRAC_BITS;

    let (exponent, mantissa): (u16, u64) = match (e, frac) {
        (0, 0) => (0, 0),
        (0x7FF, _) => (0x7FFF, 1 << 63),
        (0, _) => {
            // f64 subnormal: value = frac * 2^-1074. Normalizing the
            // fraction to an explicit leading bit gives
            // mantissa * 2^(-1074 - shift), i.e. a biased exponent of
            // 16383 + 63 - 1074 - shift.
            let shift = frac.leading_zeros();
            ((15372 - shift) as u16, frac << shift)
        }
        _ => ((e - 1023 + EXP_BIAS) as u16, (1 << 63) | (frac << 11)),
    };

    let mut out = [0u8; 10];
    out[0] = (sign << 7) | (exponent >> 8) as u8;
    out[1] = exponent as u8;
    out[2..].copy_from_slice(&mantissa.to_be_bytes());
    Ok(out)
}

/// Convert a 10-byte extended-precision representation to a native
/// double.
///
/// Zero, denormal, infinity, and NaN encodings follow the standard
/// biased-exponent rules; values below `f64`'s subnormal range flush
/// to zero and values above its range saturate to infinity.
pub fn decode(bytes: [u8; 10]) -> f64 {
    let sign = bytes[0] & 0x80 != 0;
    let exponent = u16::from_be_bytes([bytes[0] & 0x7F, bytes[1]]);
    let mut mantissa = u64::from_be_bytes([
        bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7], bytes[8], bytes[9],
    ]);

    if exponent == 0x7FFF {
        // infinity when the fraction (integer bit excluded) is zero
        let value = if mantissa << 1 == 0 {
            f64::INFINITY
        } else {
            f64::NAN
        };
        return if sign { -value } else { value };
    }

    if mantissa == 0 {
        return if sign { -0.0 } else { 0.0 };
    }

    // denormals scale like exponent 1; pseudo-denormals (unset integer
    // bit under a nonzero exponent) normalize to the same value
    let mut exp = if exponent == 0 { 1 } else { exponent as i32 };
    while mantissa & (1 << 63) == 0 {
        mantissa <<= 1;
        exp -= 1;
    }

    // value = mantissa * 2^(exp - 16383 - 63); as 1.f * 2^n that is an
    // f64 biased exponent of exp - 16383 + 1023
    let mut e64 = exp - 15360;

    if e64 >= 2047 {
        return if sign { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let frac = if e64 >= 1 {
        // normal: round the 64-bit significand to 53 bits
        let mut sig = mantissa >> 11;
        let rem = mantissa & 0x7FF;
        if rem > 0x400 || (rem == 0x400 && sig & 1 == 1) {
            sig += 1;
            if sig == 1 << 53 {
                sig >>= 1;
                e64 += 1;
                if e64 >= 2047 {
                    return if sign { f64::NEG_INFINITY } else { f64::INFINITY };
                }
            }
        }
        sig & F64_FRAC_BITS
    } else {
        // f64 subnormal: shift down to the fixed 2^-1074 scale
        let shift = 12 - e64;
        if shift >= 65 {
            return if sign { -0.0 } else { 0.0 };
        }
        let (mut sig, rem, half) = if shift >= 64 {
            (0, mantissa, 1 << 63)
        } else {
            (mantissa >> shift, mantissa & ((1 << shift) - 1), 1 << (shift - 1))
        };
        if rem > half || (rem == half && sig & 1 == 1) {
            sig += 1;
        }
        // a carry out of the subnormal range lands exactly on the
        // smallest normal's bit pattern
        e64 = 0;
        sig
    };

    f64::from_bits(((sign as u64) << 63) | ((e64 as u64) << 52) | frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RATE_44100: [u8; 10] = [0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0];
    const RATE_22050: [u8; 10] = [0x40, 0x0D, 0xAC, 0x44, 0, 0, 0, 0, 0, 0];
    const RATE_8000: [u8; 10] = [0x40, 0x0B, 0xFA, 0x00, 0, 0, 0, 0, 0, 0];
    const RATE_48000: [u8; 10] = [0x40, 0x0E, 0xBB, 0x80, 0, 0, 0, 0, 0, 0];
    const RATE_96000: [u8; 10] = [0x40, 0x0F, 0xBB, 0x80, 0, 0, 0, 0, 0, 0];

    #[test]
    fn decode_known_sample_rates() {
        assert_eq!(decode(RATE_44100), 44100.0);
        assert_eq!(decode(RATE_22050), 22050.0);
        assert_eq!(decode(RATE_8000), 8000.0);
        assert_eq!(decode(RATE_48000), 48000.0);
        assert_eq!(decode(RATE_96000), 96000.0);
    }

    #[test]
    fn encode_known_sample_rates() {
        assert_eq!(encode(44100.0).unwrap(), RATE_44100);
        assert_eq!(encode(22050.0).unwrap(), RATE_22050);
        assert_eq!(encode(8000.0).unwrap(), RATE_8000);
        assert_eq!(encode(48000.0).unwrap(), RATE_48000);
        assert_eq!(encode(96000.0).unwrap(), RATE_96000);
    }

    #[test]
    fn round_trip_is_exact() {
        for rate in [
            8000.0,
            11025.0,
            22050.0,
            44100.0,
            48000.0,
            96000.0,
            192000.0,
            44100.5,
            0.125,
            1.0,
            -44100.0,
            f64::MAX,
            f64::MIN_POSITIVE,
            5e-324, // smallest subnormal
            1e-310, // mid subnormal
        ] {
            assert_eq!(decode(encode(rate).unwrap()), rate, "rate {rate}");
        }
    }

    #[test]
    fn zero_keeps_its_sign() {
        assert_eq!(encode(0.0).unwrap(), [0u8; 10]);
        let neg = encode(-0.0).unwrap();
        assert_eq!(neg[0], 0x80);
        assert!(decode(neg) == 0.0);
        assert!(decode(neg).is_sign_negative());
    }

    #[test]
    fn infinities() {
        let inf = encode(f64::INFINITY).unwrap();
        assert_eq!(inf[0], 0x7F);
        assert_eq!(inf[1], 0xFF);
        assert_eq!(inf[2], 0x80);
        assert_eq!(decode(inf), f64::INFINITY);
        assert_eq!(decode(encode(f64::NEG_INFINITY).unwrap()), f64::NEG_INFINITY);
    }

    #[test]
    fn nan_is_reported_not_coerced() {
        assert_eq!(encode(f64::NAN).unwrap_err(), NanError);
    }

    #[test]
    fn nan_bytes_decode_to_nan() {
        let mut bytes = [0u8; 10];
        bytes[0] = 0x7F;
        bytes[1] = 0xFF;
        bytes[9] = 0x01;
        assert!(decode(bytes).is_nan());
    }

    #[test]
    fn denormal_bytes_flush_to_zero() {
        // exponent 0 with a tiny mantissa is far below f64 range
        let mut bytes = [0u8; 10];
        bytes[9] = 0x01;
        assert_eq!(decode(bytes), 0.0);
    }

    #[test]
    fn negative_sign_round_trips() {
        let bytes = encode(-22050.0).unwrap();
        assert_eq!(bytes[0], 0x80 | 0x40);
        assert_eq!(decode(bytes), -22050.0);
    }
}
