//! One-shot retrieval sessions
//!
//! A session is configured once, reads once and keeps its outcome:
//!
//! ```text
//! AwaitingRead ──run()──▶ Published(message)
//!        │
//!        └──────run()──▶ Failed(error)
//! ```
//!
//! Both end states are terminal. Calling [`RecordSession::run`] again returns
//! the stored outcome without reopening the file.

use crate::constants::{Compression, DEFAULT_TARGET_INDEX};
use crate::decode::{decode_payload, DecodePolicy, DecodedMessage, OutputKind};
use crate::error::RecordError;
use crate::reader::ReaderOptions;
use crate::selector::read_record_at;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[cfg(feature = "logging")]
use tracing::debug;

/// Raw retrieval configuration, as supplied by a caller or a config file
///
/// Nothing is checked until [`ReaderConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
    /// Record file location (required)
    pub path: Option<String>,

    /// Ordinal of the record to extract; defaults to 0
    pub target_index: Option<u64>,

    /// Decode as a flat `Example`
    pub example: bool,

    /// Decode as a `SequenceExample`
    pub sequence_example: bool,

    /// Stream compression name: "none", "zlib" or "gzip"
    pub compression: Option<String>,

    /// Handling of payloads that do not parse
    pub decode_policy: DecodePolicy,
}

impl ReaderConfig {
    /// Check the configuration without touching the filesystem.
    ///
    /// Fails with [`RecordError::Configuration`] when the path is missing or
    /// empty, when not exactly one output kind is selected, or when the
    /// compression name is unknown.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let path = match self.path.as_deref() {
            Some(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => {
                return Err(RecordError::Configuration(
                    "a record file path is required".to_string(),
                ))
            }
        };

        let kind = match (self.example, self.sequence_example) {
            (true, false) => OutputKind::Example,
            (false, true) => OutputKind::SequenceExample,
            (true, true) => {
                return Err(RecordError::Configuration(
                    "select either Example or SequenceExample output, not both".to_string(),
                ))
            }
            (false, false) => {
                return Err(RecordError::Configuration(
                    "an output kind (Example or SequenceExample) is required".to_string(),
                ))
            }
        };

        let compression = match self.compression.as_deref() {
            None => Compression::None,
            Some(name) => Compression::from_name(name).ok_or_else(|| {
                RecordError::Configuration(format!("unknown compression type: {name}"))
            })?,
        };

        Ok(ValidatedConfig {
            path,
            target_index: self.target_index.unwrap_or(DEFAULT_TARGET_INDEX),
            kind,
            options: ReaderOptions::with_compression(compression),
            policy: self.decode_policy,
        })
    }
}

/// Configuration that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    path: PathBuf,
    target_index: u64,
    kind: OutputKind,
    options: ReaderOptions,
    policy: DecodePolicy,
}

impl ValidatedConfig {
    /// Configuration for record 0 of `path`, uncompressed, strict decoding
    pub fn new(path: impl Into<PathBuf>, kind: OutputKind) -> Self {
        Self {
            path: path.into(),
            target_index: DEFAULT_TARGET_INDEX,
            kind,
            options: ReaderOptions::default(),
            policy: DecodePolicy::default(),
        }
    }

    /// Set the target index
    pub fn target_index(mut self, index: u64) -> Self {
        self.target_index = index;
        self
    }

    /// Set stream compression
    pub fn compression(mut self, compression: Compression) -> Self {
        self.options.compression = compression;
        self
    }

    /// Set the decode policy
    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Record file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ordinal to extract
    pub fn index(&self) -> u64 {
        self.target_index
    }

    /// Output kind
    pub fn kind(&self) -> OutputKind {
        self.kind
    }

    /// Reader options
    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    /// Decode policy
    pub fn policy(&self) -> DecodePolicy {
        self.policy
    }
}

/// Lifecycle of a [`RecordSession`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Configured, nothing read yet
    AwaitingRead,
    /// Message decoded and published
    Published(DecodedMessage),
    /// Retrieval failed
    Failed(RecordError),
}

impl SessionState {
    /// Whether the session reached an end state
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::AwaitingRead)
    }

    fn outcome(&self) -> Result<&DecodedMessage> {
        match self {
            SessionState::Published(message) => Ok(message),
            SessionState::Failed(err) => Err(err.clone()),
            SessionState::AwaitingRead => Err(RecordError::Configuration(
                "retrieval has not run yet".to_string(),
            )),
        }
    }
}

/// A single configured retrieval of one record
#[derive(Debug)]
pub struct RecordSession {
    config: ValidatedConfig,
    state: SessionState,
}

impl RecordSession {
    /// Create a session from validated configuration
    pub fn new(config: ValidatedConfig) -> Self {
        Self {
            config,
            state: SessionState::AwaitingRead,
        }
    }

    /// Validate `config` and create a session; no file is opened
    pub fn from_config(config: &ReaderConfig) -> Result<Self> {
        Ok(Self::new(config.validate()?))
    }

    /// Session configuration
    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Current state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Retrieve and decode the configured record.
    ///
    /// The first call opens the file, selects the record and decodes it.
    /// Later calls return the same outcome without any I/O.
    pub fn run(&mut self) -> Result<&DecodedMessage> {
        if !self.state.is_terminal() {
            self.state = match retrieve(&self.config) {
                Ok(message) => SessionState::Published(message),
                Err(err) => SessionState::Failed(err),
            };
        }
        self.state.outcome()
    }

    /// Published message, if the session succeeded
    pub fn output(&self) -> Option<&DecodedMessage> {
        match &self.state {
            SessionState::Published(message) => Some(message),
            _ => None,
        }
    }

    /// Consume the session, returning its outcome
    pub fn into_output(self) -> Result<DecodedMessage> {
        match self.state {
            SessionState::Published(message) => Ok(message),
            state => state.outcome().map(Clone::clone),
        }
    }
}

/// Open, select, decode. The file is released before this returns.
fn retrieve(config: &ValidatedConfig) -> Result<DecodedMessage> {
    #[cfg(feature = "logging")]
    debug!(
        "Retrieving record {} of {} as {}",
        config.target_index,
        config.path.display(),
        config.kind.name()
    );

    let record = read_record_at(&config.path, config.target_index, config.options)?;
    decode_payload(&record, config.kind, config.policy)
}

/// Validate `config`, run one session and return the message
pub fn extract(config: &ReaderConfig) -> Result<DecodedMessage> {
    let mut session = RecordSession::from_config(config)?;
    session.run()?;
    session.into_output()
}
