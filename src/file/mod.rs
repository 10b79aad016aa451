#![doc = r#"
Parsing a byte buffer into an [`AiffFile`] chunk tree.

# Overview

[`AiffFile::parse`] scans the buffer from offset 0, reading one chunk
header and payload at a time until the buffer is exhausted. Every
top-level `FORM` chunk is walked recursively: its payload's first four
bytes name the form type (`AIFF` or `AIFC`) and the remainder is
scanned the same way into local chunks, each dispatched by identifier
to its schema. Unrecognized identifiers are not errors; their payloads
are kept verbatim.

Alongside the tree, the walker aggregates the commonly needed audio
parameters onto a flat [`Summary`], a derived view rather than
authoritative state.

```
use aiffix::prelude::*;

let bytes = AiffFileBuilder::new(FormType::Aiff)
    .channels(2)
    .sample_rate(44100.0)
    .sample_size(16)
    .sound_data([0u8; 8])
    .build()
    .unwrap();

let file = AiffFile::parse(&bytes).unwrap();
assert_eq!(file.summary.num_channels, Some(2));
assert_eq!(file.summary.sample_rate, Some(44100.0));
```
"#]

pub mod builder;
pub use builder::AiffFileBuilder;

use crate::{
    ChunkError, SchemaError,
    chunks::{
        ApplicationChunk, Chunk, ChunkData, ChunkId, CommentChunk, CommonChunk, Compression,
        FormChunk, FormType, FormatVersionChunk, InstrumentChunk, MarkerChunk, SoundDataChunk,
        TextChunk, id, schemas,
    },
    reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
    schema::{Context, Value},
};
use log::{debug, trace};

/// Options controlling what a parse retains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep each chunk's raw payload bytes alongside the parsed
    /// values. Off by default; inspection tooling turns it on.
    pub keep_raw: bool,
}

/// The commonly needed top-level audio parameters, aggregated from the
/// parsed chunks.
///
/// This is a derived view: when a buffer holds several `FORM` chunks,
/// the last one's values win, and every chunk stays available in the
/// tree regardless.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// The form type of the last `FORM` chunk.
    pub form: Option<FormType>,
    /// Sample frames per second.
    pub sample_rate: Option<f64>,
    /// Bits per sample.
    pub sample_size: Option<i16>,
    /// Number of audio channels.
    pub num_channels: Option<i16>,
    /// AIFF-C compression fields, when present.
    pub compression: Option<Compression>,
    /// The raw sample bytes from the `SSND` chunk.
    pub sound_data: Option<Vec<u8>>,
    /// Every `APPL` chunk encountered, in file order.
    pub appl: Vec<ApplicationChunk>,
}

#[doc = r#"
A parsed AIFF/AIFF-C file: the top-level chunk list and the flat
summary derived from it
"#]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiffFile {
    /// Every top-level chunk, in file order. Well-formed files hold a
    /// single `FORM` chunk, but trailing chunks (ID3 tags and the
    /// like) are kept too.
    pub chunks: Vec<Chunk>,
    /// The aggregated audio parameters.
    pub summary: Summary,
}

impl AiffFile {
    /// Parse a complete, fully buffered file.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        Self::parse_with(bytes, ParseOptions::default())
    }

    /// Parse with explicit [`ParseOptions`].
    pub fn parse_with(bytes: &[u8], options: ParseOptions) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut chunks = Vec::new();
        let mut summary = Summary::default();

        while !reader.is_empty() {
            chunks.push(read_top_chunk(&mut reader, options, &mut summary)?);
        }

        debug!("parsed {} top-level chunk(s)", chunks.len());
        Ok(Self { chunks, summary })
    }

    /// Iterate the `FORM` containers among the top-level chunks.
    pub fn forms(&self) -> impl Iterator<Item = &FormChunk> {
        self.chunks.iter().filter_map(|chunk| match &chunk.data {
            ChunkData::Form(form) => Some(form),
            _ => None,
        })
    }
}

/// Read one chunk frame at the reader's position.
///
/// Returns the identifier, declared size, payload, and the start
/// offset of the header. Errors are annotated with the identifier when
/// enough bytes existed to read one.
fn read_frame(reader: &mut Reader<'_>, base: usize) -> ReadResult<(ChunkId, u32, Vec<u8>, usize)> {
    let header_id = reader.peek(4).and_then(ChunkId::from_slice);
    let start = reader.buffer_position();

    let (mut record, _) = reader
        .read_struct(&schemas::CHUNK, &Context::default())
        .map_err(|source| match header_id {
            Some(id) => ReaderError::in_chunk(base + start, id, start, source),
            None => ReaderError::parse_error(base + start, source.into()),
        })?;

    // the schema guarantees all three fields are present and typed
    let id = match record.bytes("ckID") {
        Ok(bytes) => ChunkId::from_slice(bytes).unwrap_or(ChunkId::new([0; 4])),
        Err(source) => return Err(ReaderError::parse_error(base + start, source.into())),
    };
    let size = match record.int("ckSize") {
        Ok(size) => size as u32,
        Err(source) => return Err(ReaderError::parse_error(base + start, source.into())),
    };
    let payload = match record.take("chunkData") {
        Some(Value::Bytes(bytes)) => bytes,
        _ => {
            return Err(ReaderError::parse_error(
                base + start,
                SchemaError::MissingField("chunkData").into(),
            ));
        }
    };

    trace!("chunk `{id}` at {start}, {size} byte(s)");
    Ok((id, size, payload, start))
}

fn read_top_chunk(
    reader: &mut Reader<'_>,
    options: ParseOptions,
    summary: &mut Summary,
) -> ReadResult<Chunk> {
    let (id, size, payload, start) = read_frame(reader, 0)?;
    let end = reader.buffer_position();

    let data = if id == id::FORM {
        // the payload starts with the form-type tag at absolute
        // offset start + 8
        let form = parse_form(&payload, start + 8, options, summary)?;
        summary.form = Some(form.form_type);
        ChunkData::Form(form)
    } else {
        // non-FORM top-level chunks are retained verbatim
        ChunkData::Unrecognized(payload.clone())
    };

    Ok(Chunk {
        id,
        size,
        start_offset: start,
        end_offset: end,
        raw: options.keep_raw.then_some(payload),
        data,
    })
}

fn parse_form(
    payload: &[u8],
    base: usize,
    options: ParseOptions,
    summary: &mut Summary,
) -> ReadResult<FormChunk> {
    let tag = payload
        .get(..4)
        .and_then(ChunkId::from_slice)
        .ok_or_else(|| {
            ReaderError::in_chunk(
                base,
                id::FORM,
                0,
                SchemaError::OutOfRange {
                    offset: 0,
                    len: 4,
                    available: payload.len(),
                },
            )
        })?;
    let form_type = FormType::from_id(tag).ok_or_else(|| {
        ReaderError::new(
            base,
            ReaderErrorKind::chunk(ChunkError::InvalidFormType { form: tag, offset: 0 }),
        )
    })?;
    trace!("FORM type `{tag}`");

    let mut reader = Reader::from_byte_slice(payload);
    reader.advance(4);

    let mut chunks = Vec::new();
    while !reader.is_empty() {
        chunks.push(read_local_chunk(&mut reader, base, form_type, options, summary)?);
    }

    Ok(FormChunk { form_type, chunks })
}

fn read_local_chunk(
    reader: &mut Reader<'_>,
    base: usize,
    form_type: FormType,
    options: ParseOptions,
    summary: &mut Summary,
) -> ReadResult<Chunk> {
    let (id, size, payload, start) = read_frame(reader, base)?;
    let end = reader.buffer_position();

    let data = dispatch(id, size, &payload, form_type)
        .map_err(|source| ReaderError::in_chunk(base + start, id, start, source))?;

    match &data {
        ChunkData::Common(common) => {
            summary.sample_rate = Some(common.sample_rate);
            summary.sample_size = Some(common.sample_size);
            summary.num_channels = Some(common.num_channels);
            summary.compression = common.compression.clone();
        }
        ChunkData::SoundData(sound) => summary.sound_data = Some(sound.sound_data.clone()),
        ChunkData::Application(appl) => summary.appl.push(appl.clone()),
        _ => {}
    }

    Ok(Chunk {
        id,
        size,
        start_offset: start,
        end_offset: end,
        raw: options.keep_raw.then_some(payload),
        data,
    })
}

/// Number of fixed-size bytes before the sample run of an `SSND`
/// payload.
const SOUND_DATA_FIXED_BYTES: u32 = 8;
/// Number of fixed-size bytes before the data run of an `APPL`
/// payload.
const APPLICATION_FIXED_BYTES: u32 = 4;

/// Parse one local chunk's payload according to its identifier.
///
/// Unrecognized identifiers yield [`ChunkData::Unrecognized`]; this is
/// the walker's only leniency.
fn dispatch(
    id: ChunkId,
    declared_size: u32,
    payload: &[u8],
    form_type: FormType,
) -> Result<ChunkData, SchemaError> {
    let ctx = Context::default();

    let data = match id {
        id::COMMON => {
            let def = match form_type {
                FormType::Aifc => &schemas::COMMON_AIFC,
                FormType::Aiff => &schemas::COMMON,
            };
            let (record, _) = def.parse(payload, 0, &ctx)?;
            ChunkData::Common(CommonChunk::from_record(&record)?)
        }
        id::SOUND => {
            let sample_bytes = declared_size
                .checked_sub(SOUND_DATA_FIXED_BYTES)
                .ok_or(SchemaError::NegativeSize {
                    field: "soundData",
                    size: declared_size as i64 - SOUND_DATA_FIXED_BYTES as i64,
                })?;
            let (record, _) = schemas::SOUND_DATA.parse(
                payload,
                0,
                &Context::with_data_size(sample_bytes as usize),
            )?;
            ChunkData::SoundData(SoundDataChunk::from_record(record)?)
        }
        id::MARKER => {
            let (record, _) = schemas::MARKERS.parse(payload, 0, &ctx)?;
            ChunkData::Markers(MarkerChunk::from_record(&record)?)
        }
        id::COMMENT => {
            let (record, _) = schemas::COMMENT.parse(payload, 0, &ctx)?;
            ChunkData::Comment(CommentChunk::from_record(&record)?)
        }
        id::INSTRUMENT => {
            let (record, _) = schemas::INSTRUMENT.parse(payload, 0, &ctx)?;
            ChunkData::Instrument(InstrumentChunk::from_record(&record)?)
        }
        id::NAME | id::AUTHOR | id::COPYRIGHT | id::ANNOTATION => {
            let (record, _) = schemas::TEXT.parse(
                payload,
                0,
                &Context::with_data_size(declared_size as usize),
            )?;
            ChunkData::Text(TextChunk::from_record(&record)?)
        }
        id::APPLICATION => {
            let data_bytes = declared_size
                .checked_sub(APPLICATION_FIXED_BYTES)
                .ok_or(SchemaError::NegativeSize {
                    field: "data",
                    size: declared_size as i64 - APPLICATION_FIXED_BYTES as i64,
                })?;
            let (record, _) = schemas::APPLICATION.parse(
                payload,
                0,
                &Context::with_data_size(data_bytes as usize),
            )?;
            ChunkData::Application(ApplicationChunk::from_record(record)?)
        }
        id::AIFF_C | id::FVER => {
            let (record, _) = schemas::FORMAT_VERSION.parse(payload, 0, &ctx)?;
            ChunkData::FormatVersion(FormatVersionChunk::from_record(&record)?)
        }
        _ => {
            debug!("unknown chunk type `{id}`, keeping raw payload");
            ChunkData::Unrecognized(payload.to_vec())
        }
    };

    Ok(data)
}
