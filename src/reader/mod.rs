#![doc = r#"
A cursor over an in-memory byte buffer with absolute-position
bookkeeping.

The [`Reader`] does no I/O; the caller hands it a fully buffered file
and it tracks how far the chunk walker has consumed. Structure parsing
itself is delegated to [`StructDef`](crate::schema::StructDef), which
reports the offset it consumed up to so the reader can resume scanning
after each chunk.
"#]

mod error;
pub use error::*;

use crate::{
    SchemaError,
    schema::{Context, Record, StructDef},
};

/// A positioned view over a byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a byte slice, positioned at offset 0.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the current absolute offset into the buffer.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes left to read.
    pub const fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// True if the reader has consumed the whole buffer.
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the underlying buffer.
    pub const fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Peek at the next `n` bytes without consuming them.
    ///
    /// Returns `None` if fewer than `n` bytes remain.
    pub fn peek(&self, n: usize) -> Option<&'a [u8]> {
        self.bytes.get(self.position..self.position + n)
    }

    /// Skip `n` bytes without reading them.
    pub(crate) const fn advance(&mut self, n: usize) {
        self.position += n;
    }

    /// Parse one structure at the current position and advance past it.
    ///
    /// On failure the position is left where the structure started, so
    /// the error can be annotated with the offset of the offending
    /// chunk header.
    pub fn read_struct(
        &mut self,
        def: &StructDef,
        ctx: &Context,
    ) -> Result<(Record, usize), SchemaError> {
        let start = self.position;
        let (record, end) = def.parse(self.bytes, start, ctx)?;
        self.position = end;
        Ok((record, start))
    }
}
