//! Fixed byte vectors for the record framing
//!
//! Each vector is a complete file image produced by an independent TFRecord
//! writer; the reader must agree with it byte for byte.

use std::io::Cursor;
use tfrecord_core::{
    checksum::{mask, masked_crc32c, unmask},
    constants::CRC_MASK_DELTA,
    select_record, Corruption, RecordError, RecordReader,
};

/// One record carrying `hello`
const HELLO_RECORD: &str = "0500000000000000eab2043e68656c6c6fbb1f1c19";

/// One record with an empty payload
const EMPTY_RECORD: &str = "000000000000000029039807d8ea82a2";

fn bytes_of(vector: &str) -> Vec<u8> {
    hex::decode(vector).unwrap()
}

#[test]
fn vector_masked_checksums() {
    assert_eq!(masked_crc32c(b"123456789"), 0xc78a_b0e5);
    assert_eq!(masked_crc32c(b""), CRC_MASK_DELTA);
    assert_eq!(masked_crc32c(b"hello"), 0x191c_1fbb);
    assert_eq!(mask(0xe306_9283), 0xc78a_b0e5);
    assert_eq!(unmask(0xc78a_b0e5), 0xe306_9283);
}

#[test]
fn vector_hello_record() {
    let mut reader = RecordReader::new(Cursor::new(bytes_of(HELLO_RECORD)));

    let record = reader.read_record().unwrap();
    assert_eq!(record.payload.as_ref(), b"hello");
    assert_eq!(record.end_offset(), 21);
    assert!(reader.read_record().unwrap_err().is_end_of_stream());
}

#[test]
fn vector_empty_record() {
    let mut reader = RecordReader::new(Cursor::new(bytes_of(EMPTY_RECORD)));

    let record = reader.read_record().unwrap();
    assert!(record.payload.is_empty());
    assert_eq!(record.frame_size(), 16);
}

#[test]
fn vector_concatenated_file() {
    let mut file = bytes_of(EMPTY_RECORD);
    file.extend(bytes_of(HELLO_RECORD));
    file.extend(bytes_of(EMPTY_RECORD));

    let mut reader = RecordReader::new(Cursor::new(file));
    let record = select_record(&mut reader, 1).unwrap();

    assert_eq!(record.offset, 16);
    assert_eq!(record.payload.as_ref(), b"hello");
}

#[test]
fn vector_wrong_length_checksum() {
    let mut file = bytes_of(HELLO_RECORD);
    file[11] = 0x00;

    let err = RecordReader::new(Cursor::new(file)).read_record().unwrap_err();
    assert_eq!(
        err,
        RecordError::CorruptRecord {
            ordinal: 0,
            offset: 0,
            corruption: Corruption::LengthChecksum {
                expected: 0x0004_b2ea,
                actual: 0x3e04_b2ea,
            },
        }
    );
}

#[test]
fn vector_wrong_payload_checksum() {
    let mut file = bytes_of(HELLO_RECORD);
    // "hello" -> "jello"
    file[12] = b'j';

    let err = RecordReader::new(Cursor::new(file)).read_record().unwrap_err();
    assert!(matches!(
        err,
        RecordError::CorruptRecord {
            corruption: Corruption::PayloadChecksum {
                expected: 0x191c_1fbb,
                ..
            },
            ..
        }
    ));
}

#[test]
fn vector_big_endian_length_is_rejected() {
    // Same record with the length prefix byte-swapped; its checksum no longer matches
    let mut file = bytes_of(HELLO_RECORD);
    file[..8].reverse();

    let err = RecordReader::new(Cursor::new(file)).read_record().unwrap_err();
    assert!(matches!(
        err,
        RecordError::CorruptRecord {
            corruption: Corruption::LengthChecksum { .. },
            ..
        }
    ));
}
