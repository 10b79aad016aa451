use crate::{
    SchemaError,
    extended,
    schema::Record,
};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Timestamp identifying version 1 of the AIFF-C standard, stored in
/// the `FVER` chunk.
pub const AIFC_VERSION_1: u32 = 0xA280_5140;

/// AIFF-C compression information from an `AIFC` common chunk.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compression {
    /// The 4-character compression type code (`NONE`, `sowt`, ...).
    pub type_id: String,
    /// The human-readable compression name.
    pub name: String,
}

/// The `COMM` chunk: the file's audio parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommonChunk {
    /// Number of audio channels.
    pub num_channels: i16,
    /// Number of sample frames (samples per channel).
    pub num_sample_frames: u32,
    /// Bits per sample.
    pub sample_size: i16,
    /// Sample frames per second, decoded from the 80-bit extended
    /// float representation.
    pub sample_rate: f64,
    /// Compression fields, present only under the `AIFC` form.
    pub compression: Option<Compression>,
}

impl CommonChunk {
    pub(crate) fn from_record(record: &Record) -> Result<Self, SchemaError> {
        let rate_bytes: [u8; 10] =
            record
                .bytes("sampleRate")?
                .try_into()
                .map_err(|_| SchemaError::WrongType {
                    field: "sampleRate",
                    expected: "10 bytes",
                })?;

        // present iff the record came from the AIFC schema
        let compression = match record.get("compressionType") {
            Some(_) => Some(Compression {
                type_id: record.text("compressionType")?.to_owned(),
                name: record.text("compressionName")?.to_owned(),
            }),
            None => None,
        };

        Ok(Self {
            num_channels: record.int("numChannels")? as i16,
            num_sample_frames: record.uint("numSampleFrames")? as u32,
            sample_size: record.int("sampleSize")? as i16,
            sample_rate: extended::decode(rate_bytes),
            compression,
        })
    }
}

/// The `SSND` chunk: the raw sample byte stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundDataChunk {
    /// Offset into the sample stream where playback starts, usually 0.
    pub offset: u32,
    /// Block alignment for the sample stream, usually 0.
    pub block_size: u32,
    /// The sample bytes (`declared size − 8` of them).
    pub sound_data: Vec<u8>,
}

impl SoundDataChunk {
    pub(crate) fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        let offset = record.uint("offset")? as u32;
        let block_size = record.uint("blockSize")? as u32;
        let sound_data = match record.take("soundData") {
            Some(crate::schema::Value::Bytes(bytes)) => bytes,
            _ => {
                return Err(SchemaError::WrongType {
                    field: "soundData",
                    expected: "bytes",
                });
            }
        };
        Ok(Self {
            offset,
            block_size,
            sound_data,
        })
    }
}

/// One marker from a `MARK` chunk.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// The marker id; only positive ids are valid references.
    pub id: i16,
    /// The sample-frame position the marker points at.
    pub position: u32,
    /// The marker's name.
    pub name: String,
}

impl Marker {
    /// True if the marker id is a valid reference target (`id > 0`).
    pub const fn is_valid(&self) -> bool {
        self.id > 0
    }

    fn from_record(record: &Record) -> Result<Self, SchemaError> {
        Ok(Self {
            id: record.int("id")? as i16,
            position: record.uint("position")? as u32,
            name: record.text("markerName")?.to_owned(),
        })
    }
}

/// The `MARK` chunk: the file's markers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerChunk {
    /// The markers, in file order.
    pub markers: Vec<Marker>,
}

impl MarkerChunk {
    pub(crate) fn from_record(record: &Record) -> Result<Self, SchemaError> {
        let markers = record
            .array("markers")?
            .iter()
            .map(Marker::from_record)
            .collect::<Result<_, _>>()?;
        Ok(Self { markers })
    }
}

/// The `COMT` chunk: one timestamped comment tied to a marker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommentChunk {
    /// Comment creation date, in Macintosh epoch seconds.
    pub timestamp: u32,
    /// The marker this comment belongs to.
    pub marker_id: i16,
    /// The comment text.
    pub text: String,
}

impl CommentChunk {
    pub(crate) fn from_record(record: &Record) -> Result<Self, SchemaError> {
        Ok(Self {
            timestamp: record.uint("timeStamp")? as u32,
            marker_id: record.int("marker")? as i16,
            text: record.text("text")?.to_owned(),
        })
    }
}

/// How an instrument loop plays back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i16)]
pub enum PlayMode {
    /// The loop is ignored.
    NoLooping = 0,
    /// Play begin to end, repeating forward.
    ForwardLooping = 1,
    /// Play begin to end, then end to begin, alternating.
    ForwardBackwardLooping = 2,
}

/// One loop of an `INST` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentLoop {
    /// How the loop plays.
    pub play_mode: PlayMode,
    /// Marker id where the loop begins.
    pub begin_loop: i16,
    /// Marker id where the loop ends.
    pub end_loop: i16,
}

impl InstrumentLoop {
    fn from_record(record: &Record) -> Result<Self, SchemaError> {
        let raw_mode = record.int("playMode")? as i16;
        let play_mode =
            PlayMode::try_from(raw_mode).map_err(|_| SchemaError::InvalidPlayMode(raw_mode))?;
        Ok(Self {
            play_mode,
            begin_loop: record.int("beginLoop")? as i16,
            end_loop: record.int("endLoop")? as i16,
        })
    }
}

/// The `INST` chunk: how a sampler should play the sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentChunk {
    /// MIDI note the sound plays back at its recorded pitch.
    pub base_note: i8,
    /// Cents to shift the base note, -50..=50.
    pub detune: i8,
    /// Lowest usable MIDI note.
    pub low_note: i8,
    /// Highest usable MIDI note.
    pub high_note: i8,
    /// Lowest usable MIDI velocity.
    pub low_velocity: i8,
    /// Highest usable MIDI velocity.
    pub high_velocity: i8,
    /// Playback gain in decibels.
    pub gain: i16,
    /// The loop played while the key is held.
    pub sustain_loop: InstrumentLoop,
    /// The loop played after the key is released.
    pub release_loop: InstrumentLoop,
}

impl InstrumentChunk {
    pub(crate) fn from_record(record: &Record) -> Result<Self, SchemaError> {
        Ok(Self {
            base_note: record.int("baseNote")? as i8,
            detune: record.int("detune")? as i8,
            low_note: record.int("lowNote")? as i8,
            high_note: record.int("highNote")? as i8,
            low_velocity: record.int("lowVelocity")? as i8,
            high_velocity: record.int("highVelocity")? as i8,
            gain: record.int("gain")? as i16,
            sustain_loop: InstrumentLoop::from_record(record.record("sustainLoop")?)?,
            release_loop: InstrumentLoop::from_record(record.record("releaseLoop")?)?,
        })
    }
}

/// A text chunk (`NAME`, `AUTH`, `(c) `, or `ANNO`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextChunk {
    /// The text, filling the chunk's whole declared size.
    pub text: String,
}

impl TextChunk {
    pub(crate) fn from_record(record: &Record) -> Result<Self, SchemaError> {
        Ok(Self {
            text: record.text("text")?.to_owned(),
        })
    }
}

/// The `APPL` chunk: application-specific data behind a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplicationChunk {
    /// The owning application's 4-character signature.
    pub signature: String,
    /// The application's data (`declared size − 4` bytes).
    pub data: Vec<u8>,
}

impl ApplicationChunk {
    pub(crate) fn from_record(mut record: Record) -> Result<Self, SchemaError> {
        let signature = record.text("applicationSignature")?.to_owned();
        let data = match record.take("data") {
            Some(crate::schema::Value::Bytes(bytes)) => bytes,
            _ => {
                return Err(SchemaError::WrongType {
                    field: "data",
                    expected: "bytes",
                });
            }
        };
        Ok(Self { signature, data })
    }
}

/// The `FVER` chunk: the AIFF-C version marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatVersionChunk {
    /// The version timestamp; [`AIFC_VERSION_1`] in every AIFF-C file
    /// written to date.
    pub timestamp: u32,
}

impl FormatVersionChunk {
    pub(crate) fn from_record(record: &Record) -> Result<Self, SchemaError> {
        Ok(Self {
            timestamp: record.uint("timestamp")? as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_mode_rejects_out_of_range() {
        assert_eq!(PlayMode::try_from(0), Ok(PlayMode::NoLooping));
        assert_eq!(PlayMode::try_from(2), Ok(PlayMode::ForwardBackwardLooping));
        assert!(PlayMode::try_from(3).is_err());
        assert!(PlayMode::try_from(-1).is_err());
    }

    #[test]
    fn marker_validity() {
        let marker = Marker {
            id: 1,
            position: 0,
            name: String::new(),
        };
        assert!(marker.is_valid());
        assert!(!Marker { id: 0, ..marker.clone() }.is_valid());
        assert!(!Marker { id: -3, ..marker }.is_valid());
    }
}
