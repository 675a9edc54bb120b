//! Payload decoding into the configured message kind

use crate::error::{Corruption, RecordError};
use crate::message::{Example, SequenceExample};
use crate::types::Record;
use crate::Result;
use prost::Message;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::warn;

/// Which message schema the selected record holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// Flat `tensorflow.Example`
    Example,
    /// Temporal `tensorflow.SequenceExample`
    SequenceExample,
}

impl OutputKind {
    /// Protobuf type name
    pub const fn name(&self) -> &'static str {
        match self {
            OutputKind::Example => "tensorflow.Example",
            OutputKind::SequenceExample => "tensorflow.SequenceExample",
        }
    }
}

/// What to do when a payload does not parse as the selected message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Fail with [`RecordError::CorruptRecord`]
    #[default]
    Strict,
    /// Log a warning and produce the empty message of the selected kind
    Lenient,
}

/// A decoded record payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodedMessage {
    /// Flat message
    Example(Example),
    /// Sequential message
    SequenceExample(SequenceExample),
}

impl DecodedMessage {
    /// Kind of the message
    pub fn kind(&self) -> OutputKind {
        match self {
            DecodedMessage::Example(_) => OutputKind::Example,
            DecodedMessage::SequenceExample(_) => OutputKind::SequenceExample,
        }
    }

    /// The flat message, if that is what this holds
    pub fn as_example(&self) -> Option<&Example> {
        match self {
            DecodedMessage::Example(example) => Some(example),
            DecodedMessage::SequenceExample(_) => None,
        }
    }

    /// The sequential message, if that is what this holds
    pub fn as_sequence_example(&self) -> Option<&SequenceExample> {
        match self {
            DecodedMessage::SequenceExample(seq) => Some(seq),
            DecodedMessage::Example(_) => None,
        }
    }

    /// Empty message of the given kind
    pub fn empty(kind: OutputKind) -> Self {
        match kind {
            OutputKind::Example => DecodedMessage::Example(Example::default()),
            OutputKind::SequenceExample => {
                DecodedMessage::SequenceExample(SequenceExample::default())
            }
        }
    }
}

/// Parse a record payload as `kind`.
///
/// Under [`DecodePolicy::Strict`] a parse failure is a
/// [`Corruption::UndecodableMessage`] on the record. Under
/// [`DecodePolicy::Lenient`] it yields [`DecodedMessage::empty`].
pub fn decode_payload(
    record: &Record,
    kind: OutputKind,
    policy: DecodePolicy,
) -> Result<DecodedMessage> {
    let parsed = match kind {
        OutputKind::Example => Example::decode(record.payload.clone()).map(DecodedMessage::Example),
        OutputKind::SequenceExample => {
            SequenceExample::decode(record.payload.clone()).map(DecodedMessage::SequenceExample)
        }
    };

    match (parsed, policy) {
        (Ok(message), _) => Ok(message),
        (Err(err), DecodePolicy::Strict) => Err(RecordError::CorruptRecord {
            ordinal: record.ordinal,
            offset: record.offset,
            corruption: Corruption::UndecodableMessage {
                kind: kind.name(),
                reason: err.to_string(),
            },
        }),
        (Err(_err), DecodePolicy::Lenient) => {
            #[cfg(feature = "logging")]
            warn!(
                "Record {} is not a valid {}, using an empty message: {}",
                record.ordinal,
                kind.name(),
                _err
            );

            Ok(DecodedMessage::empty(kind))
        }
    }
}
