#![doc = r#"
The structure descriptors for every chunk AIFF and AIFF-C define.

Field names follow the C declarations in the AIFF-1.3 and AIFF-C
specifications (`ckID`, `numChannels`, `markerName`, ...), so parsed
records read like the standard documents. Each descriptor covers a
chunk's payload only; the 8-byte header and even-length padding belong
to [`CHUNK`].
"#]

use crate::schema::{Field, FieldRule, P_STRING, SizeRule, StructDef};
use std::sync::LazyLock;

/// The generic chunk frame: 4-byte identifier, signed 32-bit size, and
/// a payload of that size padded to an even length.
pub static CHUNK: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "Chunk",
        vec![
            Field::new(
                "ckID",
                FieldRule::Bytes {
                    size: SizeRule::Fixed(4),
                    align: 1,
                },
            ),
            Field::new("ckSize", FieldRule::Int(4)),
            Field::new(
                "chunkData",
                FieldRule::Bytes {
                    size: SizeRule::Sibling("ckSize"),
                    align: 2,
                },
            ),
        ],
    )
});

/// The `COMM` payload for plain AIFF.
pub static COMMON: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "Common",
        vec![
            Field::new("numChannels", FieldRule::Int(2)),
            Field::new("numSampleFrames", FieldRule::Uint(4)),
            Field::new("sampleSize", FieldRule::Int(2)),
            Field::new(
                "sampleRate",
                FieldRule::Bytes {
                    size: SizeRule::Fixed(10),
                    align: 1,
                },
            ),
        ],
    )
});

/// The `COMM` payload for AIFF-C, which appends the compression type
/// and its human-readable name.
pub static COMMON_AIFC: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "CommonAifc",
        vec![
            Field::new("numChannels", FieldRule::Int(2)),
            Field::new("numSampleFrames", FieldRule::Uint(4)),
            Field::new("sampleSize", FieldRule::Int(2)),
            Field::new(
                "sampleRate",
                FieldRule::Bytes {
                    size: SizeRule::Fixed(10),
                    align: 1,
                },
            ),
            Field::new("compressionType", FieldRule::Text(SizeRule::Fixed(4))),
            Field::new("compressionName", FieldRule::Codec(&P_STRING)),
        ],
    )
});

/// The `SSND` payload. The sample run's length comes from context:
/// the chunk's declared size minus the two fixed fields.
pub static SOUND_DATA: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "SoundData",
        vec![
            Field::new("offset", FieldRule::Uint(4)),
            Field::new("blockSize", FieldRule::Uint(4)),
            Field::new(
                "soundData",
                FieldRule::Bytes {
                    size: SizeRule::Context,
                    align: 1,
                },
            ),
        ],
    )
});

fn marker() -> StructDef {
    StructDef::new(
        "Marker",
        vec![
            Field::new("id", FieldRule::Int(2)),
            Field::new("position", FieldRule::Uint(4)),
            Field::new("markerName", FieldRule::Codec(&P_STRING)),
        ],
    )
}

/// The `MARK` payload: a marker count followed by that many markers.
pub static MARKERS: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "MarkerChunk",
        vec![
            Field::new("numMarkers", FieldRule::Uint(2)),
            Field::new(
                "markers",
                FieldRule::Array {
                    elem: marker(),
                    count: SizeRule::Sibling("numMarkers"),
                },
            ),
        ],
    )
});

/// The `COMT` payload: one timestamped comment tied to a marker.
pub static COMMENT: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "Comment",
        vec![
            Field::new("timeStamp", FieldRule::Uint(4)),
            Field::new("marker", FieldRule::Int(2)),
            Field::new("count", FieldRule::Uint(2)),
            Field::new("text", FieldRule::Text(SizeRule::Sibling("count"))),
        ],
    )
});

fn instrument_loop() -> StructDef {
    StructDef::new(
        "Loop",
        vec![
            Field::new("playMode", FieldRule::Int(2)),
            Field::new("beginLoop", FieldRule::Int(2)),
            Field::new("endLoop", FieldRule::Int(2)),
        ],
    )
}

/// The `INST` payload: note range, gain, and the two loops.
pub static INSTRUMENT: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "Instrument",
        vec![
            Field::new("baseNote", FieldRule::Int(1)),
            Field::new("detune", FieldRule::Int(1)),
            Field::new("lowNote", FieldRule::Int(1)),
            Field::new("highNote", FieldRule::Int(1)),
            Field::new("lowVelocity", FieldRule::Int(1)),
            Field::new("highVelocity", FieldRule::Int(1)),
            Field::new("gain", FieldRule::Int(2)),
            Field::new("sustainLoop", FieldRule::Struct(instrument_loop())),
            Field::new("releaseLoop", FieldRule::Struct(instrument_loop())),
        ],
    )
});

/// The payload shared by the `NAME`, `AUTH`, `(c) ` and `ANNO` chunks:
/// text filling the whole declared size.
pub static TEXT: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "Text",
        vec![Field::new("text", FieldRule::Text(SizeRule::Context))],
    )
});

/// The `APPL` payload: a 4-byte signature plus free-form data filling
/// the rest of the declared size.
pub static APPLICATION: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "ApplicationSpecific",
        vec![
            Field::new("applicationSignature", FieldRule::Text(SizeRule::Fixed(4))),
            Field::new(
                "data",
                FieldRule::Bytes {
                    size: SizeRule::Context,
                    align: 1,
                },
            ),
        ],
    )
});

/// The `FVER` payload (also dispatched for an `AIFC` chunk id).
pub static FORMAT_VERSION: LazyLock<StructDef> = LazyLock::new(|| {
    StructDef::new(
        "FormatVersion",
        vec![Field::new("timestamp", FieldRule::Uint(4))],
    )
});
