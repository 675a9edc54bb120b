use bytes::{BufMut, BytesMut};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::io::Cursor;
use tfrecord_core::{checksum::masked_crc32c, scanner::scan_records, select_record, RecordReader};

fn make_stream(num_records: usize, payload_len: usize) -> Vec<u8> {
    let mut buf = BytesMut::new();
    for i in 0..num_records {
        let payload = vec![(i % 251) as u8; payload_len];
        let length = (payload_len as u64).to_le_bytes();
        buf.put_slice(&length);
        buf.put_u32_le(masked_crc32c(&length));
        buf.put_slice(&payload);
        buf.put_u32_le(masked_crc32c(&payload));
    }
    buf.to_vec()
}

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader");

    for &payload_len in &[16usize, 256, 4096] {
        let stream = make_stream(500, payload_len);
        group.throughput(Throughput::Bytes(stream.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("select_last", payload_len),
            &stream,
            |b, data| {
                b.iter(|| {
                    let mut reader = RecordReader::new(Cursor::new(data.as_slice()));
                    let res = select_record(&mut reader, 499);
                    criterion::black_box(res)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("scan_records", payload_len),
            &stream,
            |b, data| {
                b.iter(|| {
                    let res = scan_records(RecordReader::new(Cursor::new(data.as_slice())));
                    criterion::black_box(res)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reader);
criterion_main!(benches);
