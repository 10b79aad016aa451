#![doc = r#"
Types for AIFF and AIFF-C file chunks

# Overview

AIFF files are organized into chunks, each identified by a 4-character
ASCII identifier followed by a 32-bit big-endian size field and then
the chunk data, padded to an even length. A file is one `FORM`
container chunk whose payload begins with a form-type tag (`AIFF` or
`AIFC`) and continues with the local chunks: the audio parameters
(`COMM`), the sample bytes (`SSND`), and optional markers, comments,
instrument data, text and application-specific chunks.

Any chunk with an identifier this crate does not recognize is kept as
an [`ChunkData::Unrecognized`] value carrying its raw payload, so files
using proprietary chunks still parse losslessly.
"#]

mod chunk_id;
pub use chunk_id::*;

mod parsed;
pub use parsed::*;

pub mod schemas;

/// The form-type tag of a `FORM` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormType {
    /// Plain AIFF.
    Aiff,
    /// AIFF-C, which adds compression fields and the `FVER` chunk.
    Aifc,
}

impl FormType {
    /// The 4-byte tag this form type is written as.
    pub const fn id(&self) -> ChunkId {
        match self {
            Self::Aiff => id::AIFF,
            Self::Aifc => id::AIFF_C,
        }
    }

    /// Interpret a 4-byte tag, if it names a known form type.
    pub fn from_id(tag: ChunkId) -> Option<Self> {
        if tag == id::AIFF {
            Some(Self::Aiff)
        } else if tag == id::AIFF_C {
            Some(Self::Aifc)
        } else {
            None
        }
    }
}

/// One chunk of a parsed file.
///
/// Every chunk records its identifier, declared size, and the byte
/// offsets it occupied: absolute offsets for top-level chunks, offsets
/// within the enclosing `FORM` payload for local chunks. The span
/// `end_offset - start_offset` is always `8 + size` rounded up to the
/// next even number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chunk {
    /// The 4-byte chunk identifier.
    pub id: ChunkId,
    /// The declared payload size (pad byte excluded).
    pub size: u32,
    /// Offset of the chunk header within its containing chunk list.
    pub start_offset: usize,
    /// Offset of the first byte after the chunk, pad byte included.
    pub end_offset: usize,
    /// The raw payload, retained when
    /// [`ParseOptions::keep_raw`](crate::file::ParseOptions) is set.
    pub raw: Option<Vec<u8>>,
    /// The parsed representation.
    pub data: ChunkData,
}

impl Chunk {
    /// The number of bytes the chunk occupies, pad byte included.
    pub const fn span(&self) -> usize {
        self.end_offset - self.start_offset
    }
}

/// The parsed representation of a chunk, dispatched by identifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChunkData {
    /// A `FORM` container.
    Form(FormChunk),
    /// A `COMM` chunk.
    Common(CommonChunk),
    /// An `SSND` chunk.
    SoundData(SoundDataChunk),
    /// A `MARK` chunk.
    Markers(MarkerChunk),
    /// A `COMT` chunk.
    Comment(CommentChunk),
    /// An `INST` chunk.
    Instrument(InstrumentChunk),
    /// A `NAME`, `AUTH`, `(c) ` or `ANNO` chunk.
    Text(TextChunk),
    /// An `APPL` chunk.
    Application(ApplicationChunk),
    /// An `FVER` chunk (or the `AIFC` chunk-id alias).
    FormatVersion(FormatVersionChunk),
    /// Any other identifier; the payload is kept verbatim.
    Unrecognized(Vec<u8>),
}

/// A `FORM` container chunk's payload: the form-type tag and the local
/// chunks behind it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormChunk {
    /// Whether the file is plain AIFF or AIFF-C.
    pub form_type: FormType,
    /// The local chunks, in file order. Offsets are relative to the
    /// `FORM` payload (the form-type tag occupies bytes 0..4).
    pub chunks: Vec<Chunk>,
}
