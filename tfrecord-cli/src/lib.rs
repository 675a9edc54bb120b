//! Library entry for tfrecord-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use anyhow::{anyhow, Result};
use tfrecord_core::Compression;

/// Parse an optional `--compression` value, defaulting to none
pub fn parse_compression(name: Option<&str>) -> Result<Compression> {
    match name {
        None => Ok(Compression::None),
        Some(name) => {
            Compression::from_name(name)
                .ok_or_else(|| anyhow!("Unknown compression type: {}", name))
        }
    }
}
