use crate::chunks::ChunkId;
use thiserror::Error;

#[doc = r#"
An error encountered while parsing or serializing AIFF structures
"#]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Structure-level errors from the descriptor engine
    #[error("{0}")]
    Schema(#[from] SchemaError),
    /// Chunk-level errors from the tree walker
    #[error("{0}")]
    Chunk(#[from] ChunkError),
}

/// A kind of error produced while walking the chunk tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChunkError {
    /// A recognized chunk's payload failed to parse.
    #[error("`{id}` chunk at offset {offset}: {source}")]
    Malformed {
        /// Identifier of the offending chunk
        id: ChunkId,
        /// Offset of the chunk header within its containing chunk list
        offset: usize,
        /// The underlying structure error
        source: SchemaError,
    },
    /// A FORM payload began with something other than `AIFF` or `AIFC`.
    #[error("form type `{form}` at offset {offset} is not `AIFF` or `AIFC`")]
    InvalidFormType {
        /// The 4-byte tag that was found
        form: ChunkId,
        /// Offset of the tag within the FORM chunk's payload
        offset: usize,
    },
}

/// A kind of error produced by the structure descriptor engine.
///
/// These cover the three failure classes of the codec: reads past the
/// end of the supplied buffer, values that violate a format constraint,
/// and records missing a field required for serialization.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    /// A field rule attempted to read beyond the available bytes.
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {available} bytes")]
    OutOfRange {
        /// Offset the read started at
        offset: usize,
        /// Number of bytes requested
        len: usize,
        /// Total length of the buffer
        available: usize,
    },
    /// A text field held bytes that are not valid UTF-8.
    #[error("field `{field}` is not valid UTF-8")]
    InvalidText {
        /// Name of the offending field
        field: &'static str,
    },
    /// A size read from a sibling field or context came out negative.
    #[error("field `{field}` has a negative declared size ({size})")]
    NegativeSize {
        /// Name of the field whose size was being resolved
        field: &'static str,
        /// The resolved size
        size: i64,
    },
    /// A pascal string's text cannot be length-prefixed in one byte.
    #[error("pascal string of {0} bytes exceeds the 255-byte limit")]
    StringTooLong(usize),
    /// An instrument loop carried a play mode outside 0..=2.
    #[error("invalid loop play mode {0}")]
    InvalidPlayMode(i16),
    /// A field's size is context-derived but no context size was supplied.
    #[error("no context size supplied for field `{0}`")]
    MissingContext(&'static str),
    /// Serialization was invoked without a required field.
    #[error("missing field `{0}` when serializing")]
    MissingField(&'static str),
    /// A record value did not match the field rule's expected shape.
    #[error("field `{field}` has the wrong type, expected {expected}")]
    WrongType {
        /// Name of the offending field
        field: &'static str,
        /// The shape the field rule expected
        expected: &'static str,
    },
    /// A field rule declared an unsupported integer width.
    #[error("field `{field}` declares an integer width of {width} bytes, supported widths are 1..=8")]
    InvalidWidth {
        /// Name of the offending field
        field: &'static str,
        /// The declared byte width
        width: usize,
    },
    /// An integer value does not fit the field's declared width.
    #[error("value {value} does not fit field `{field}` of {width} bytes")]
    IntOutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// The value that was supplied
        value: i64,
        /// Declared byte width of the field
        width: usize,
    },
    /// A fixed-width field was given a value of a different length.
    #[error("field `{field}` expects exactly {expected} bytes, got {actual}")]
    TextLength {
        /// Name of the offending field
        field: &'static str,
        /// Declared byte width
        expected: usize,
        /// Length of the supplied value
        actual: usize,
    },
}

impl SchemaError {
    /// True if the error is a read past the end of the buffer.
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
