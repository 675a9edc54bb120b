//! # TFRecord Core
//!
//! Sequential, checksum-verified retrieval of a single record from a TFRecord
//! file, decoded as a TensorFlow `Example` or `SequenceExample`.
//!
//! ## Modules
//!
//! - `constants`: Framing sizes, checksum mask, compression kinds
//! - `checksum`: Masked CRC32C
//! - `types`: Core types (Cursor, Record)
//! - `reader`: Forward-only framed record reader
//! - `selector`: Index-based record selection
//! - `message`: `Example` / `SequenceExample` protobuf messages
//! - `decode`: Payload decoding into the configured message kind
//! - `session`: Configuration and the one-shot retrieval state machine
//! - `scanner`: Whole-file record walks

#![warn(missing_docs)]

pub mod checksum;
pub mod constants;
pub mod decode;
pub mod error;
pub mod message;
pub mod reader;
pub mod scanner;
pub mod selector;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use constants::Compression;
pub use decode::{DecodePolicy, DecodedMessage, OutputKind};
pub use error::{Corruption, RecordError};
pub use message::{Example, Feature, SequenceExample};
pub use reader::{ReaderOptions, RecordReader};
pub use selector::{read_record_at, select_record};
pub use session::{extract, ReaderConfig, RecordSession, SessionState, ValidatedConfig};
pub use types::{Cursor, Record};

/// Result type alias for record retrieval
pub type Result<T> = core::result::Result<T, RecordError>;
