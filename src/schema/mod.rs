#![doc = r#"
A declarative structure-description engine for big-endian binary
records.

# Overview

A [`StructDef`] names an ordered set of fields, each governed by a
[`FieldRule`]: a fixed-width scalar, a variable-length run of bytes or
text, a nested structure, an array of nested structures, or a custom
[`FieldCodec`]. The two operations, [`StructDef::parse`] and
[`StructDef::serialize`], are mutual inverses for well-formed input:
serializing a parsed [`Record`] under the same [`Context`] reproduces
the bytes the parse consumed.

Variable-length fields resolve their size through an explicit
[`SizeRule`] rather than an open-ended closure: either a fixed byte
count, the value of a previously parsed sibling field, or a size
supplied by the caller through [`Context`] (used for payload sizes that
depend on the enclosing chunk's declared size).

# Example

```
use aiffix::schema::{Context, Field, FieldRule, SizeRule, StructDef};

let def = StructDef::new(
    "Tagged",
    vec![
        Field::new("len", FieldRule::Uint(2)),
        Field::new("body", FieldRule::Bytes {
            size: SizeRule::Sibling("len"),
            align: 2,
        }),
    ],
);

let bytes = [0x00, 0x03, b'a', b'b', b'c', 0x00];
let (record, end) = def.parse(&bytes, 0, &Context::default()).unwrap();
assert_eq!(record.bytes("body").unwrap(), b"abc");
assert_eq!(end, 6); // odd body length consumed an extra pad byte

let out = def.serialize(&record, &Context::default()).unwrap();
assert_eq!(out, bytes);
```
"#]

mod pstring;
pub use pstring::*;

mod record;
pub use record::*;

use crate::SchemaError;
use core::fmt;

/// Caller-supplied sizing information for context-derived fields.
///
/// The walker uses this to push the enclosing chunk's declared size
/// down into a schema (e.g. the sample-data run of an `SSND` chunk,
/// whose length is the chunk size minus the fixed-size fields).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    /// Byte count for fields sized with [`SizeRule::Context`].
    pub data_size: Option<usize>,
}

impl Context {
    /// A context carrying a data size.
    pub const fn with_data_size(data_size: usize) -> Self {
        Self {
            data_size: Some(data_size),
        }
    }
}

/// How a variable-width field resolves its byte count (or an array its
/// element count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRule {
    /// A fixed byte count.
    Fixed(usize),
    /// The value of a previously parsed integer field in the same record.
    Sibling(&'static str),
    /// The caller-supplied [`Context::data_size`].
    Context,
}

impl SizeRule {
    /// Resolve the rule against the fields parsed so far and the
    /// caller's context.
    ///
    /// On the serialize side `record` holds the full record, so sibling
    /// lookups behave identically in both directions.
    pub fn resolve(
        &self,
        field: &'static str,
        record: &Record,
        ctx: &Context,
    ) -> Result<usize, SchemaError> {
        match self {
            Self::Fixed(n) => Ok(*n),
            Self::Sibling(name) => {
                let size = record.int_like(name)?;
                usize::try_from(size).map_err(|_| SchemaError::NegativeSize { field, size })
            }
            Self::Context => ctx
                .data_size
                .ok_or(SchemaError::MissingContext(field)),
        }
    }
}

/// A polymorphic field handler for encodings that do not fit the
/// scalar/nested model.
///
/// The only codec this format needs is the pascal string
/// ([`PString`]); further codecs are a matter of implementing this
/// trait and referencing it from a [`FieldRule::Codec`].
pub trait FieldCodec: fmt::Debug + Sync {
    /// Parse one value starting at `offset`, returning the value and
    /// the offset of the first byte after it (padding included).
    fn decode(
        &self,
        buffer: &[u8],
        offset: usize,
        ctx: &Context,
    ) -> Result<(Value, usize), SchemaError>;

    /// Serialize one value to bytes, padding included.
    fn encode(&self, value: &Value, ctx: &Context) -> Result<Vec<u8>, SchemaError>;
}

/// The rule governing a single named field.
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// Signed big-endian integer of the given byte width (1..=8).
    Int(usize),
    /// Unsigned big-endian integer of the given byte width (1..=8).
    Uint(usize),
    /// UTF-8 text of a declared or derived byte width.
    Text(SizeRule),
    /// A raw byte run; consumption is rounded up to `align`.
    Bytes {
        /// How the run's length is determined.
        size: SizeRule,
        /// Alignment the consumed length is rounded up to (1 = none).
        align: usize,
    },
    /// A nested structure; consumes whatever its descriptor consumes.
    Struct(StructDef),
    /// A repeated nested structure.
    Array {
        /// Descriptor for each element.
        elem: StructDef,
        /// How many elements to parse.
        count: SizeRule,
    },
    /// A custom codec (see [`FieldCodec`]).
    Codec(&'static dyn FieldCodec),
}

/// One named field of a [`StructDef`].
#[derive(Debug, Clone)]
pub struct Field {
    /// The key this field contributes to the parsed record.
    pub name: &'static str,
    /// The rule that parses and serializes it.
    pub rule: FieldRule,
}

impl Field {
    /// Create a named field.
    pub const fn new(name: &'static str, rule: FieldRule) -> Self {
        Self { name, rule }
    }
}

/// An ordered mapping from field name to field rule.
#[derive(Debug, Clone)]
pub struct StructDef {
    name: &'static str,
    fields: Vec<Field>,
}

/// Round `size` up to the next multiple of `alignment`.
pub(crate) const fn aligned_size(size: usize, alignment: usize) -> usize {
    size.div_ceil(alignment) * alignment
}

/// Slice `len` bytes at `offset`, or fail with the offset and requested
/// length.
pub(crate) fn take(buffer: &[u8], offset: usize, len: usize) -> Result<&[u8], SchemaError> {
    buffer
        .get(offset..offset.saturating_add(len))
        .ok_or(SchemaError::OutOfRange {
            offset,
            len,
            available: buffer.len(),
        })
}

const fn check_width(field: &'static str, width: usize) -> Result<(), SchemaError> {
    if width == 0 || width > 8 {
        return Err(SchemaError::InvalidWidth { field, width });
    }
    Ok(())
}

fn parse_int(bytes: &[u8]) -> i64 {
    let mut value: u64 = 0;
    for &b in bytes {
        value = (value << 8) | b as u64;
    }
    let shift = 64 - 8 * bytes.len() as u32;
    ((value << shift) as i64) >> shift
}

fn parse_uint(bytes: &[u8]) -> u64 {
    let mut value: u64 = 0;
    for &b in bytes {
        value = (value << 8) | b as u64;
    }
    value
}

fn int_to_bytes(field: &'static str, value: i64, width: usize) -> Result<Vec<u8>, SchemaError> {
    check_width(field, width)?;
    let min = if width == 8 { i64::MIN } else { -(1 << (8 * width - 1)) };
    let max = if width == 8 { i64::MAX } else { (1 << (8 * width - 1)) - 1 };
    if value < min || value > max {
        return Err(SchemaError::IntOutOfRange { field, value, width });
    }
    Ok(value.to_be_bytes()[8 - width..].to_vec())
}

fn uint_to_bytes(field: &'static str, value: u64, width: usize) -> Result<Vec<u8>, SchemaError> {
    check_width(field, width)?;
    if width < 8 && value >= 1 << (8 * width) {
        return Err(SchemaError::IntOutOfRange {
            field,
            value: value as i64,
            width,
        });
    }
    Ok(value.to_be_bytes()[8 - width..].to_vec())
}

impl StructDef {
    /// Create a descriptor from an ordered list of fields.
    pub const fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }

    /// The descriptor's name, used in diagnostics.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Parse one record starting at `start_offset`.
    ///
    /// Fields are consumed in declaration order; the returned offset is
    /// the first byte after the record (alignment padding included), so
    /// callers can resume scanning there. Any read past `buffer`'s end
    /// fails with [`SchemaError::OutOfRange`] carrying the offset and
    /// requested length.
    pub fn parse(
        &self,
        buffer: &[u8],
        start_offset: usize,
        ctx: &Context,
    ) -> Result<(Record, usize), SchemaError> {
        let mut record = Record::new();
        let mut offset = start_offset;

        for field in &self.fields {
            let value = match &field.rule {
                FieldRule::Int(width) => {
                    check_width(field.name, *width)?;
                    let bytes = take(buffer, offset, *width)?;
                    offset += width;
                    Value::Int(parse_int(bytes))
                }
                FieldRule::Uint(width) => {
                    check_width(field.name, *width)?;
                    let bytes = take(buffer, offset, *width)?;
                    offset += width;
                    Value::Uint(parse_uint(bytes))
                }
                FieldRule::Text(size) => {
                    let len = size.resolve(field.name, &record, ctx)?;
                    let bytes = take(buffer, offset, len)?;
                    offset += len;
                    let text = core::str::from_utf8(bytes)
                        .map_err(|_| SchemaError::InvalidText { field: field.name })?;
                    Value::Text(text.to_owned())
                }
                FieldRule::Bytes { size, align } => {
                    let len = size.resolve(field.name, &record, ctx)?;
                    let bytes = take(buffer, offset, len)?;
                    // may step past the end when a trailing pad byte is
                    // missing; the next read reports the overrun
                    offset += aligned_size(len, *align);
                    Value::Bytes(bytes.to_vec())
                }
                FieldRule::Struct(def) => {
                    let (nested, end) = def.parse(buffer, offset, ctx)?;
                    offset = end;
                    Value::Record(nested)
                }
                FieldRule::Array { elem, count } => {
                    let n = count.resolve(field.name, &record, ctx)?;
                    let mut elems = Vec::with_capacity(n);
                    for _ in 0..n {
                        let (nested, end) = elem.parse(buffer, offset, ctx)?;
                        offset = end;
                        elems.push(nested);
                    }
                    Value::Array(elems)
                }
                FieldRule::Codec(codec) => {
                    let (value, end) = codec.decode(buffer, offset, ctx)?;
                    offset = end;
                    value
                }
            };
            record.set(field.name, value);
        }

        Ok((record, offset))
    }

    /// Serialize a record to bytes.
    ///
    /// Fields are emitted in declaration order with the same alignment
    /// padding the parse direction consumes, so the output is
    /// byte-equal to what [`StructDef::parse`] would read to reproduce
    /// `record` under the same context. A key absent from `record`
    /// fails with [`SchemaError::MissingField`].
    pub fn serialize(&self, record: &Record, ctx: &Context) -> Result<Vec<u8>, SchemaError> {
        let mut out = Vec::new();

        for field in &self.fields {
            match &field.rule {
                FieldRule::Int(width) => {
                    let value = record.int(field.name)?;
                    out.extend_from_slice(&int_to_bytes(field.name, value, *width)?);
                }
                FieldRule::Uint(width) => {
                    let value = record.uint(field.name)?;
                    out.extend_from_slice(&uint_to_bytes(field.name, value, *width)?);
                }
                FieldRule::Text(size) => {
                    let text = record.text(field.name)?;
                    if let SizeRule::Fixed(expected) = size
                        && text.len() != *expected
                    {
                        return Err(SchemaError::TextLength {
                            field: field.name,
                            expected: *expected,
                            actual: text.len(),
                        });
                    }
                    out.extend_from_slice(text.as_bytes());
                }
                FieldRule::Bytes { size, align } => {
                    let bytes = record.bytes(field.name)?;
                    if let SizeRule::Fixed(expected) = size
                        && bytes.len() != *expected
                    {
                        return Err(SchemaError::TextLength {
                            field: field.name,
                            expected: *expected,
                            actual: bytes.len(),
                        });
                    }
                    out.extend_from_slice(bytes);
                    let padded = aligned_size(bytes.len(), *align);
                    out.resize(out.len() + (padded - bytes.len()), 0);
                }
                FieldRule::Struct(def) => {
                    let nested = record.record(field.name)?;
                    out.extend_from_slice(&def.serialize(nested, ctx)?);
                }
                FieldRule::Array { elem, .. } => {
                    let elems = record.array(field.name)?;
                    for nested in elems {
                        out.extend_from_slice(&elem.serialize(nested, ctx)?);
                    }
                }
                FieldRule::Codec(codec) => {
                    let value = record.require(field.name)?;
                    out.extend_from_slice(&codec.encode(value, ctx)?);
                }
            }
        }

        Ok(out)
    }
}
