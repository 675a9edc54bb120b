//! Sequential record reader
//!
//! Reads one framed record at a time from any [`Read`] source:
//!
//! ```text
//! length: u64 LE | masked_crc32c(length): u32 LE | payload | masked_crc32c(payload): u32 LE
//! ```
//!
//! The reader only moves forward. To start over, open the source again and
//! build a new reader.

use crate::checksum;
use crate::constants::{Compression, FOOTER_SIZE, HEADER_SIZE, LENGTH_SIZE};
use crate::error::{Corruption, RecordError};
use crate::types::{Cursor, Record};
use crate::Result;
use bytes::Bytes;
use flate2::read::{GzDecoder, ZlibDecoder};
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Upper bound on the buffer reserved up front for a payload.
///
/// A length prefix that passed its checksum can still describe more bytes
/// than the source holds; the buffer grows as bytes actually arrive.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Options for [`RecordReader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderOptions {
    /// Compression of the whole stream
    pub compression: Compression,
}

impl ReaderOptions {
    /// Options for a stream with the given compression
    pub fn with_compression(compression: Compression) -> Self {
        Self { compression }
    }
}

/// Byte source, optionally behind a decompressor
enum Source<R: Read> {
    Plain(R),
    Zlib(ZlibDecoder<R>),
    Gzip(GzDecoder<R>),
}

impl<R: Read> Source<R> {
    fn new(inner: R, compression: Compression) -> Self {
        match compression {
            Compression::None => Source::Plain(inner),
            Compression::Zlib => Source::Zlib(ZlibDecoder::new(inner)),
            Compression::Gzip => Source::Gzip(GzDecoder::new(inner)),
        }
    }
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Plain(r) => r.read(buf),
            Source::Zlib(r) => early_eof_as_end(r.read(buf)),
            Source::Gzip(r) => early_eof_as_end(r.read(buf)),
        }
    }
}

/// Decoders report input that stops mid-stream as `UnexpectedEof`.
///
/// Surfacing that as a zero-length read lets framing decide between a clean
/// record boundary and a truncated frame, the same as for plain files.
fn early_eof_as_end(result: io::Result<usize>) -> io::Result<usize> {
    match result {
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(0),
        other => other,
    }
}

/// Forward-only reader over framed records
pub struct RecordReader<R: Read> {
    source: Source<R>,
    cursor: Cursor,
    /// Terminal error; once set every read returns it again
    failed: Option<RecordError>,
    /// Set once the iterator has yielded its last item
    exhausted: bool,
}

impl RecordReader<BufReader<File>> {
    /// Open a record file for reading from offset 0
    pub fn open<P: AsRef<Path>>(path: P, options: ReaderOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RecordError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        #[cfg(feature = "logging")]
        debug!(
            "Opened record file {} (compression: {})",
            path.display(),
            options.compression.name()
        );

        Ok(Self::with_options(BufReader::new(file), options))
    }
}

impl<R: Read> RecordReader<R> {
    /// Create a reader over an uncompressed source
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Create a reader with explicit options
    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        Self {
            source: Source::new(source, options.compression),
            cursor: Cursor::start(),
            failed: None,
            exhausted: false,
        }
    }

    /// Current cursor (position of the next record)
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Read the next record and advance the cursor past it.
    ///
    /// Validation order:
    /// - Length prefix and its checksum
    /// - Payload
    /// - Payload checksum
    ///
    /// A clean end of input at a record boundary is [`RecordError::EndOfStream`];
    /// running out of input inside a frame is [`RecordError::TruncatedRecord`].
    /// After any error the reader stays failed and returns the same error.
    pub fn read_record(&mut self) -> Result<Record> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }

        match self.read_frame() {
            Ok(record) => {
                #[cfg(feature = "logging")]
                debug!(
                    "Read record {} at offset {} ({} bytes)",
                    record.ordinal,
                    record.offset,
                    record.payload.len()
                );

                Ok(record)
            }
            Err(err) => {
                #[cfg(feature = "logging")]
                log_read_failure(&err, self.cursor.ordinal);

                self.failed = Some(err.clone());
                Err(err)
            }
        }
    }

    fn read_frame(&mut self) -> Result<Record> {
        let start = self.cursor;

        let mut header = [0u8; HEADER_SIZE];
        let got = read_full(&mut self.source, &mut header)?;
        if got == 0 {
            return Err(RecordError::EndOfStream {
                ordinal: start.ordinal,
                offset: start.offset,
            });
        }
        if got < HEADER_SIZE {
            return Err(RecordError::TruncatedRecord {
                offset: start.offset,
                expected: HEADER_SIZE,
                actual: got,
            });
        }

        let (length_bytes, length_crc) = header.split_at(LENGTH_SIZE);
        let stored =
            u32::from_le_bytes([length_crc[0], length_crc[1], length_crc[2], length_crc[3]]);
        checksum::verify(length_bytes, stored).map_err(|actual| RecordError::CorruptRecord {
            ordinal: start.ordinal,
            offset: start.offset,
            corruption: Corruption::LengthChecksum {
                expected: stored,
                actual,
            },
        })?;

        let payload_len = u64::from_le_bytes([
            length_bytes[0],
            length_bytes[1],
            length_bytes[2],
            length_bytes[3],
            length_bytes[4],
            length_bytes[5],
            length_bytes[6],
            length_bytes[7],
        ]);
        let expected_len = frame_len(payload_len);

        // Read payload
        let mut payload = Vec::with_capacity(payload_len.min(MAX_PREALLOCATION) as usize);
        let got = (&mut self.source).take(payload_len).read_to_end(&mut payload)?;
        if (got as u64) < payload_len {
            return Err(RecordError::TruncatedRecord {
                offset: start.offset,
                expected: expected_len,
                actual: HEADER_SIZE + got,
            });
        }

        // Read and validate footer
        let mut footer = [0u8; FOOTER_SIZE];
        let got = read_full(&mut self.source, &mut footer)?;
        if got < FOOTER_SIZE {
            return Err(RecordError::TruncatedRecord {
                offset: start.offset,
                expected: expected_len,
                actual: HEADER_SIZE + payload.len() + got,
            });
        }

        let stored = u32::from_le_bytes(footer);
        checksum::verify(&payload, stored).map_err(|actual| RecordError::CorruptRecord {
            ordinal: start.ordinal,
            offset: start.offset,
            corruption: Corruption::PayloadChecksum {
                expected: stored,
                actual,
            },
        })?;

        self.cursor.advance(payload_len);

        Ok(Record {
            ordinal: start.ordinal,
            offset: start.offset,
            payload: Bytes::from(payload),
        })
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    /// Yields records until a clean end of stream (`None`), or yields the
    /// terminal error once and then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        match self.read_record() {
            Ok(record) => Some(Ok(record)),
            Err(err) => {
                self.exhausted = true;
                if err.is_end_of_stream() {
                    None
                } else {
                    Some(Err(err))
                }
            }
        }
    }
}

#[cfg(feature = "logging")]
fn log_read_failure(err: &RecordError, records_read: u64) {
    if err.is_end_of_stream() {
        debug!("End of stream after {} records", records_read);
    } else {
        warn!("Record read failed after {} records: {}", records_read, err);
    }
}

/// Total on-disk size of a frame carrying `payload_len` bytes, saturating
fn frame_len(payload_len: u64) -> usize {
    usize::try_from(payload_len)
        .ok()
        .and_then(|len| len.checked_add(HEADER_SIZE + FOOTER_SIZE))
        .unwrap_or(usize::MAX)
}

/// Fill `buf` as far as the source allows, returning the bytes read.
///
/// Unlike `read_exact` this reports how much arrived before end of input, so
/// a clean boundary can be told apart from a truncated frame.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
