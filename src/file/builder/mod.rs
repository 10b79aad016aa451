#![doc = r#"
Building a serialized AIFF/AIFF-C file from a construction record.

[`AiffFileBuilder`] accepts the audio parameters and sample bytes,
then emits one `FORM` chunk wrapping, in order: an `FVER` chunk (AIFC
only), the `COMM` chunk, the `SSND` chunk, and any `APPL` chunks. The
sample-frame count is derived from the sample byte length rather than
supplied directly.

Serialization runs through the same structure descriptors the parser
uses, so the output is byte-identical to what parsing would consume to
reproduce it.
"#]

use crate::{
    SchemaError,
    chunks::{
        AIFC_VERSION_1, ApplicationChunk, ChunkId, Compression, FormType, id, schemas,
    },
    extended::{self, NanError},
    schema::{Context, Record, Value},
};
use thiserror::Error;

/// An error raised while building a file.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// The sample rate cannot be represented.
    #[error("sample rate: {0}")]
    SampleRate(#[from] NanError),
    /// AIFC output needs compression fields.
    #[error("AIFC files require a compression type and name")]
    MissingCompression,
    /// The channel count must be positive to derive the frame count.
    #[error("channel count must be positive, got {0}")]
    InvalidChannels(i16),
    /// The sample size must be positive to derive the frame count.
    #[error("sample size must be positive, got {0}")]
    InvalidSampleSize(i16),
    /// A field failed to serialize.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A builder used to serialize a new AIFF or AIFF-C file.
#[derive(Debug, Clone)]
pub struct AiffFileBuilder {
    form: FormType,
    num_channels: i16,
    sample_rate: f64,
    sample_size: i16,
    sound_data: Vec<u8>,
    compression: Option<Compression>,
    appl: Vec<ApplicationChunk>,
}

impl AiffFileBuilder {
    /// Start a file of the given form type.
    ///
    /// Channel count, sample rate and sample size start at zero and
    /// must be set before [`AiffFileBuilder::build`].
    pub const fn new(form: FormType) -> Self {
        Self {
            form,
            num_channels: 0,
            sample_rate: 0.0,
            sample_size: 0,
            sound_data: Vec::new(),
            compression: None,
            appl: Vec::new(),
        }
    }

    /// Set the number of audio channels.
    pub const fn channels(mut self, num_channels: i16) -> Self {
        self.num_channels = num_channels;
        self
    }

    /// Set the sample rate in sample frames per second.
    pub const fn sample_rate(mut self, hz: f64) -> Self {
        self.sample_rate = hz;
        self
    }

    /// Set the sample size in bits.
    pub const fn sample_size(mut self, bits: i16) -> Self {
        self.sample_size = bits;
        self
    }

    /// Set the raw sample bytes.
    pub fn sound_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.sound_data = data.into();
        self
    }

    /// Set the AIFF-C compression type (a 4-character code) and its
    /// human-readable name. Required when the form is
    /// [`FormType::Aifc`], ignored otherwise.
    pub fn compression(mut self, type_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.compression = Some(Compression {
            type_id: type_id.into(),
            name: name.into(),
        });
        self
    }

    /// Append an application-specific chunk (AIFC only).
    pub fn application_chunk(
        mut self,
        signature: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.appl.push(ApplicationChunk {
            signature: signature.into(),
            data: data.into(),
        });
        self
    }

    /// Serialize the file to bytes.
    pub fn build(self) -> Result<Vec<u8>, BuildError> {
        if self.num_channels <= 0 {
            return Err(BuildError::InvalidChannels(self.num_channels));
        }
        if self.sample_size <= 0 {
            return Err(BuildError::InvalidSampleSize(self.sample_size));
        }

        let rate_bytes = extended::encode(self.sample_rate)?;

        // frames = floor(bytes / channels / (bits / 8)), in floating
        // point so sample sizes not divisible by 8 behave
        let num_sample_frames = (self.sound_data.len() as f64
            / self.num_channels as f64
            / (self.sample_size as f64 / 8.0))
            .floor() as u64;

        let ctx = Context::default();
        let mut payload = self.form.id().bytes().to_vec();

        if self.form == FormType::Aifc {
            let fver = schemas::FORMAT_VERSION.serialize(
                &Record::new().with("timestamp", Value::Uint(AIFC_VERSION_1 as u64)),
                &ctx,
            )?;
            payload.extend_from_slice(&make_chunk(id::FVER, fver)?);
        }

        let mut comm = Record::new()
            .with("numChannels", Value::Int(self.num_channels as i64))
            .with("numSampleFrames", Value::Uint(num_sample_frames))
            .with("sampleSize", Value::Int(self.sample_size as i64))
            .with("sampleRate", Value::Bytes(rate_bytes.to_vec()));
        let comm_def = match self.form {
            FormType::Aifc => {
                let compression = self.compression.ok_or(BuildError::MissingCompression)?;
                comm.set("compressionType", Value::Text(compression.type_id));
                comm.set("compressionName", Value::Text(compression.name));
                &schemas::COMMON_AIFC
            }
            FormType::Aiff => &schemas::COMMON,
        };
        payload.extend_from_slice(&make_chunk(id::COMMON, comm_def.serialize(&comm, &ctx)?)?);

        let ssnd = schemas::SOUND_DATA.serialize(
            &Record::new()
                .with("offset", Value::Uint(0))
                .with("blockSize", Value::Uint(0))
                .with("soundData", Value::Bytes(self.sound_data)),
            &ctx,
        )?;
        payload.extend_from_slice(&make_chunk(id::SOUND, ssnd)?);

        if self.form == FormType::Aifc {
            for appl in self.appl {
                let body = schemas::APPLICATION.serialize(
                    &Record::new()
                        .with("applicationSignature", Value::Text(appl.signature))
                        .with("data", Value::Bytes(appl.data)),
                    &ctx,
                )?;
                payload.extend_from_slice(&make_chunk(id::APPLICATION, body)?);
            }
        }

        Ok(make_chunk(id::FORM, payload)?)
    }
}

/// Wrap a payload in a chunk frame: identifier, declared size, and the
/// payload padded to an even length.
fn make_chunk(id: ChunkId, payload: Vec<u8>) -> Result<Vec<u8>, SchemaError> {
    let record = Record::new()
        .with("ckID", Value::Bytes(id.bytes().to_vec()))
        .with("ckSize", Value::Int(payload.len() as i64))
        .with("chunkData", Value::Bytes(payload));
    schemas::CHUNK.serialize(&record, &Context::default())
}
