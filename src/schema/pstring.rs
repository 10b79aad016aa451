use super::{Context, FieldCodec, Value, aligned_size, take};
use crate::SchemaError;

/// The pascal-string codec: one unsigned length byte, that many bytes
/// of UTF-8 text, padded to an even total length.
///
/// AIFF uses this for marker names and AIFF-C compression names. The
/// pad byte's value is ignored on read and written as zero; it is only
/// present when `1 + length` is odd.
#[derive(Debug, Clone, Copy, Default)]
pub struct PString;

/// The codec instance referenced by schemas.
pub static P_STRING: PString = PString;

impl PString {
    /// Parse a pascal string at `offset`, returning the text and the
    /// (even-aligned) offset after it.
    pub fn parse(buffer: &[u8], offset: usize) -> Result<(String, usize), SchemaError> {
        let len = take(buffer, offset, 1)?[0] as usize;
        let bytes = take(buffer, offset + 1, len)?;
        let text = core::str::from_utf8(bytes)
            .map_err(|_| SchemaError::InvalidText { field: "pstring" })?;
        Ok((text.to_owned(), offset + aligned_size(1 + len, 2)))
    }

    /// Serialize a pascal string, pad byte included.
    pub fn serialize(text: &str) -> Result<Vec<u8>, SchemaError> {
        let len = text.len();
        if len > u8::MAX as usize {
            return Err(SchemaError::StringTooLong(len));
        }
        let mut out = Vec::with_capacity(aligned_size(1 + len, 2));
        out.push(len as u8);
        out.extend_from_slice(text.as_bytes());
        if (1 + len) % 2 == 1 {
            out.push(0);
        }
        Ok(out)
    }
}

impl FieldCodec for PString {
    fn decode(
        &self,
        buffer: &[u8],
        offset: usize,
        _ctx: &Context,
    ) -> Result<(Value, usize), SchemaError> {
        let (text, end) = Self::parse(buffer, offset)?;
        Ok((Value::Text(text), end))
    }

    fn encode(&self, value: &Value, _ctx: &Context) -> Result<Vec<u8>, SchemaError> {
        match value {
            Value::Text(text) => Self::serialize(text),
            _ => Err(SchemaError::WrongType {
                field: "pstring",
                expected: "text",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn even_text_gets_a_pad_byte() {
        // 1 length byte + 4 text bytes is odd, so one pad follows
        let out = PString::serialize("NONE").unwrap();
        assert_eq!(out, [4, b'N', b'O', b'N', b'E', 0]);

        let (text, end) = PString::parse(&out, 0).unwrap();
        assert_eq!(text, "NONE");
        assert_eq!(end, 6);
    }

    #[test]
    fn odd_text_needs_no_pad() {
        let out = PString::serialize("abc").unwrap();
        assert_eq!(out, [3, b'a', b'b', b'c']);

        let (text, end) = PString::parse(&out, 0).unwrap();
        assert_eq!(text, "abc");
        assert_eq!(end, 4);
    }

    #[test]
    fn empty_string() {
        let out = PString::serialize("").unwrap();
        assert_eq!(out, [0, 0]);

        let (text, end) = PString::parse(&out, 0).unwrap();
        assert_eq!(text, "");
        assert_eq!(end, 2);
    }

    #[test]
    fn round_trip_every_length() {
        for len in 0..=255usize {
            let text: String = "x".repeat(len);
            let out = PString::serialize(&text).unwrap();
            assert_eq!(out.len(), aligned_size(1 + len, 2));
            let (parsed, end) = PString::parse(&out, 0).unwrap();
            assert_eq!(parsed, text);
            assert_eq!(end, out.len());
        }
    }

    #[test]
    fn over_255_bytes_is_an_error() {
        let text = "x".repeat(256);
        assert_eq!(
            PString::serialize(&text).unwrap_err(),
            SchemaError::StringTooLong(256)
        );
    }

    #[test]
    fn pad_byte_value_is_ignored_on_read() {
        let bytes = [4, b'N', b'O', b'N', b'E', 0xFF];
        let (text, end) = PString::parse(&bytes, 0).unwrap();
        assert_eq!(text, "NONE");
        assert_eq!(end, 6);
    }

    #[test]
    fn truncated_text_is_out_of_range() {
        let err = PString::parse(&[5, b'a', b'b'], 0).unwrap_err();
        assert_eq!(
            err,
            SchemaError::OutOfRange {
                offset: 1,
                len: 5,
                available: 3,
            }
        );
    }
}
