use core::fmt;

/// A 4-byte chunk identifier.
///
/// Identifiers are ASCII in every chunk this crate recognizes, but the
/// type carries raw bytes so files with arbitrary identifiers still
/// parse losslessly.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkId([u8; 4]);

impl ChunkId {
    /// Create an identifier from its 4 bytes.
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The identifier's bytes.
    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }

    /// Create an identifier from the first 4 bytes of a slice.
    ///
    /// Returns `None` if the slice is shorter than 4 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        Some(Self([
            *bytes.first()?,
            *bytes.get(1)?,
            *bytes.get(2)?,
            *bytes.get(3)?,
        ]))
    }

    /// The identifier as text, when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }
}

impl From<[u8; 4]> for ChunkId {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

impl From<&[u8; 4]> for ChunkId {
    fn from(bytes: &[u8; 4]) -> Self {
        Self(*bytes)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkId(b\"{}\")", self.0.escape_ascii())
    }
}

/// The chunk identifiers AIFF and AIFF-C define.
pub mod id {
    use super::ChunkId;

    /// The top-level container chunk.
    pub const FORM: ChunkId = ChunkId::new(*b"FORM");
    /// Form-type tag for plain AIFF.
    pub const AIFF: ChunkId = ChunkId::new(*b"AIFF");
    /// Form-type tag for AIFF-C; also accepted as a chunk identifier
    /// aliasing [`FVER`].
    pub const AIFF_C: ChunkId = ChunkId::new(*b"AIFC");
    /// The common chunk (channels, frames, sample size and rate).
    pub const COMMON: ChunkId = ChunkId::new(*b"COMM");
    /// The sound-data chunk.
    pub const SOUND: ChunkId = ChunkId::new(*b"SSND");
    /// The marker chunk.
    pub const MARKER: ChunkId = ChunkId::new(*b"MARK");
    /// The comment chunk.
    pub const COMMENT: ChunkId = ChunkId::new(*b"COMT");
    /// The instrument chunk.
    pub const INSTRUMENT: ChunkId = ChunkId::new(*b"INST");
    /// The application-specific chunk.
    pub const APPLICATION: ChunkId = ChunkId::new(*b"APPL");
    /// The name text chunk.
    pub const NAME: ChunkId = ChunkId::new(*b"NAME");
    /// The author text chunk.
    pub const AUTHOR: ChunkId = ChunkId::new(*b"AUTH");
    /// The copyright text chunk.
    pub const COPYRIGHT: ChunkId = ChunkId::new(*b"(c) ");
    /// The AIFF-C format-version chunk.
    pub const FVER: ChunkId = ChunkId::new(*b"FVER");
    /// The annotation text chunk.
    pub const ANNOTATION: ChunkId = ChunkId::new(*b"ANNO");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_escapes_non_ascii() {
        assert_eq!(id::COPYRIGHT.to_string(), "(c) ");
        assert_eq!(ChunkId::new([0xFF, b'a', b'b', b'c']).to_string(), "\\xffabc");
    }

    #[test]
    fn from_slice_needs_four_bytes() {
        assert_eq!(ChunkId::from_slice(b"FORMxyz"), Some(id::FORM));
        assert_eq!(ChunkId::from_slice(b"FO"), None);
    }
}
