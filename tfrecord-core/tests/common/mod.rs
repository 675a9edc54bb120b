//! Fixture writers shared by the integration tests

#![allow(dead_code)]

use bytes::{BufMut, BytesMut};
use std::fs;
use std::path::{Path, PathBuf};
use tfrecord_core::checksum::masked_crc32c;

/// Frame one payload the way a TFRecord writer does
pub fn encode_record(payload: impl AsRef<[u8]>) -> Vec<u8> {
    let payload = payload.as_ref();
    let length = (payload.len() as u64).to_le_bytes();

    let mut buf = BytesMut::with_capacity(payload.len() + 16);
    buf.put_slice(&length);
    buf.put_u32_le(masked_crc32c(&length));
    buf.put_slice(payload);
    buf.put_u32_le(masked_crc32c(payload));
    buf.to_vec()
}

/// Frame several payloads back to back
pub fn encode_stream<P: AsRef<[u8]>>(payloads: &[P]) -> Vec<u8> {
    payloads.iter().flat_map(|p| encode_record(p)).collect()
}

/// Write framed payloads to `dir/name`
pub fn write_records<P: AsRef<[u8]>>(dir: &Path, name: &str, payloads: &[P]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, encode_stream(payloads)).unwrap();
    path
}
