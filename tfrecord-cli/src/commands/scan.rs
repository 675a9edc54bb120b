use crate::parse_compression;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use tfrecord_core::scanner::{scan_records, LocatedRecord, ScanReport, ScanStats};
use tfrecord_core::{ReaderOptions, RecordReader};
use tracing::{info, warn};

#[derive(Serialize)]
struct ScanOutput<'a> {
    records: &'a [LocatedRecord],
    stats: &'a ScanStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Walk `input` and return the report without printing
pub fn scan_file(input: &str, compression: Option<&str>) -> Result<ScanReport> {
    let options = ReaderOptions::with_compression(parse_compression(compression)?);
    let reader = RecordReader::open(input, options)
        .with_context(|| format!("Failed to open input file: {}", input))?;

    Ok(scan_records(reader))
}

pub fn execute(
    input: &str,
    output: Option<&str>,
    compression: Option<&str>,
    stats_only: bool,
) -> Result<()> {
    info!("Scanning file: {}", input);

    let report = scan_file(input, compression)?;
    let stats = &report.stats;

    // Print statistics
    println!("\n=== Scan Results ===");
    println!("Records found:     {}", stats.records_found);
    println!("Payload bytes:     {} bytes", stats.payload_bytes);
    println!("Bytes consumed:    {} bytes", stats.bytes_consumed);
    println!("Largest payload:   {} bytes", stats.max_payload_len);
    println!("Mean payload:      {:.2} bytes", stats.mean_payload_len());
    if let Some(err) = &report.error {
        warn!("Scan stopped early: {}", err);
        println!("Stopped at:        {}", err);
    }
    println!();

    if stats_only {
        return Ok(());
    }

    if let Some(output_path) = output {
        let out = ScanOutput {
            records: &report.records,
            stats: &report.stats,
            error: report.error.as_ref().map(|e| e.to_string()),
        };
        let json = serde_json::to_string_pretty(&out)
            .with_context(|| "Failed to serialize scan results")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Record list written to: {}", output_path);
    } else {
        println!("=== Records ===");
        for record in &report.records {
            println!(
                "Record {} @ offset {}: {} byte payload ({} bytes framed)",
                record.ordinal, record.offset, record.payload_len, record.size
            );
        }
    }

    Ok(())
}
