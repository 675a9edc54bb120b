use crate::parse_compression;
use anyhow::{Context, Result};
use colored::*;
use tfrecord_core::{ReaderOptions, RecordReader};
use tracing::{info, warn};

/// Check every record of `input`; returns the record count.
///
/// Fails on the first corrupt or truncated record.
pub fn execute(input: &str, compression: Option<&str>) -> Result<u64> {
    info!("Verifying file: {}", input);

    let options = ReaderOptions::with_compression(parse_compression(compression)?);
    let reader = RecordReader::open(input, options)
        .with_context(|| format!("Failed to open input file: {}", input))?;

    let mut valid_records = 0u64;
    let mut payload_bytes = 0u64;

    for item in reader {
        match item {
            Ok(record) => {
                valid_records += 1;
                payload_bytes += record.payload.len() as u64;
            }
            Err(e) => {
                warn!("Verification failed: {}", e);

                println!("\n=== Verification Results ===");
                println!("Valid records:      {}", valid_records.to_string().green());
                println!("{} {}", "✗".red(), e);
                return Err(anyhow::Error::new(e).context(format!(
                    "{} is damaged after {} valid records",
                    input, valid_records
                )));
            }
        }
    }

    println!("\n=== Verification Results ===");
    println!("Valid records:      {}", valid_records.to_string().green());
    println!("Payload bytes:      {}", payload_bytes);

    if valid_records == 0 {
        println!("{} File holds no records", "!".yellow());
    } else {
        println!("{} All records valid", "✓".green());
    }

    Ok(valid_records)
}
