use crate::{ChunkError, ParseError, SchemaError, chunks::ChunkId};
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading a byte buffer into the
AIFF representation
"#]
#[derive(Debug, Error)]
#[error("Reading at position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
}

impl ReaderErrorKind {
    pub(crate) const fn chunk(chunk_err: ChunkError) -> Self {
        Self::ParseError(ParseError::Chunk(chunk_err))
    }
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    /// True if the error is a read past the end of the buffer
    pub const fn is_out_of_bounds(&self) -> bool {
        match &self.kind {
            ReaderErrorKind::ParseError(ParseError::Schema(s)) => s.is_out_of_range(),
            ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::Malformed {
                source, ..
            })) => source.is_out_of_range(),
            _ => false,
        }
    }

    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new parse error at a position
    pub const fn parse_error(position: usize, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ParseError(error),
        }
    }

    /// Annotate a structure error with the chunk it occurred in.
    ///
    /// `position` is the absolute offset of the chunk header in the
    /// original buffer; `offset` is the header's offset within its
    /// containing chunk list.
    pub(crate) const fn in_chunk(
        position: usize,
        id: ChunkId,
        offset: usize,
        source: SchemaError,
    ) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::chunk(ChunkError::Malformed { id, offset, source }),
        }
    }
}

/// The read result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
