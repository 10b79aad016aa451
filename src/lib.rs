#![doc = r#"
AIFF/AIFF-C chunk structures designed for humans

# Overview

`aiffix` parses a fully buffered AIFF or AIFF-C file into a tree of
plain chunk records, and serializes a construction record back into
a byte-identical file. It is a codec, not a player: no audio decoding,
no resampling, no I/O. The caller supplies a byte buffer and receives
values.

The crate is built around a small declarative structure engine
([`schema`]): each chunk's payload is described as an ordered set of
named fields, and the parse and serialize directions are mutual
inverses of that description. The AIFF specifics (the chunk schemas,
the 80-bit extended-precision sample rate, pascal strings, and the
recursive `FORM` walk) sit on top in [`chunks`] and [`file`].

# Parsing

```
use aiffix::prelude::*;

# let buffer = AiffFileBuilder::new(FormType::Aiff)
#     .channels(2)
#     .sample_rate(44100.0)
#     .sample_size(16)
#     .sound_data([0u8; 4])
#     .build()
#     .unwrap();
let file = AiffFile::parse(&buffer)?;

assert_eq!(file.summary.num_channels, Some(2));
for form in file.forms() {
    for chunk in &form.chunks {
        println!("{} ({} bytes)", chunk.id, chunk.size);
    }
}
# Ok::<(), aiffix::reader::ReaderError>(())
```

Chunks with unrecognized identifiers are not errors; they are kept
with their raw payload so unknown files remain inspectable.

# Writing

```
use aiffix::prelude::*;

let bytes = AiffFileBuilder::new(FormType::Aifc)
    .channels(1)
    .sample_rate(48000.0)
    .sample_size(16)
    .compression("NONE", "not compressed")
    .sound_data(vec![0u8; 32])
    .build()?;
# Ok::<(), BuildError>(())
```
"#]
#![warn(missing_docs)]

pub mod chunks;
pub mod extended;
pub mod file;
pub mod reader;
pub mod schema;

mod error;
pub use error::*;

#[doc = r#"
Re-exports of the types most uses of the crate touch
"#]
pub mod prelude {
    pub use crate::{
        ChunkError, ParseError, SchemaError,
        chunks::{
            AIFC_VERSION_1, ApplicationChunk, Chunk, ChunkData, ChunkId, CommentChunk,
            CommonChunk, Compression, FormChunk, FormType, FormatVersionChunk, InstrumentChunk,
            InstrumentLoop, Marker, MarkerChunk, PlayMode, SoundDataChunk, TextChunk, id,
        },
        file::{AiffFile, AiffFileBuilder, ParseOptions, Summary, builder::BuildError},
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
        schema::{
            Context, Field, FieldCodec, FieldRule, PString, Record, SizeRule, StructDef, Value,
        },
    };
}
