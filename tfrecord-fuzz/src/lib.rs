//! Fuzz entry points for tfrecord-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Call these from fuzz targets: cargo fuzz run fuzz_read_records

use std::io::Cursor;
use tfrecord_core::{
    decode::decode_payload, scanner::scan_records, select_record, DecodePolicy, OutputKind,
    RecordReader,
};

pub fn fuzz_read_records(data: &[u8]) {
    // Walk every record - should never panic
    let _ = scan_records(RecordReader::new(Cursor::new(data)));
}

pub fn fuzz_select(data: &[u8]) {
    // First byte picks the index, the rest is the stream
    let Some((&index, stream)) = data.split_first() else {
        return;
    };

    let mut reader = RecordReader::new(Cursor::new(stream));
    if let Ok(record) = select_record(&mut reader, u64::from(index)) {
        let _ = decode_payload(&record, OutputKind::Example, DecodePolicy::Strict);
        let _ = decode_payload(&record, OutputKind::SequenceExample, DecodePolicy::Lenient);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_read_empty() {
        fuzz_read_records(&[]);
    }

    #[test]
    fn test_fuzz_read_random() {
        fuzz_read_records(&[0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_fuzz_read_huge_length() {
        // Length prefix of u64::MAX with a garbage checksum
        fuzz_read_records(&[0xff; 64]);
    }

    #[test]
    fn test_fuzz_select_empty() {
        fuzz_select(&[]);
        fuzz_select(&[3]);
    }

    #[test]
    fn test_fuzz_select_random() {
        fuzz_select(&[0x00; 1024]);
    }
}
