use criterion::{black_box, criterion_group, criterion_main, Criterion};
use floodgate_bridge::core::bedrock_data::{DecodedPayload, IdentityRecord};
use floodgate_bridge::protocol::hostname::separate;

#[allow(clippy::unwrap_used)]
fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_codec");
    let record = IdentityRecord::unlinked(
        "2.2.0-SNAPSHOT",
        "Steve",
        "2535428650797285",
        7,
        "en_US",
        0,
        2,
        "203.0.113.7",
        0,
        "123456",
    );
    let encoded = record.encode();

    group.bench_function("encode", |b| b.iter(|| black_box(&record).encode()));
    group.bench_function("decode", |b| {
        b.iter(|| DecodedPayload::decode(black_box(&encoded)).unwrap())
    });
    group.bench_function("decode_wrong_arity", |b| {
        b.iter(|| DecodedPayload::decode(black_box("a\0b\0c")).unwrap())
    });
    group.finish();
}

fn bench_separation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hostname_separation");
    let plain = "play.example.com\0FML3\0";
    let embedded = "play.example.com\0203.0.113.7\0id\0^Floodgate^>AAAAAAAAAAAAAAAA!AAAA";

    group.bench_function("plain", |b| b.iter(|| separate(black_box(plain))));
    group.bench_function("embedded", |b| b.iter(|| separate(black_box(embedded))));
    group.finish();
}

criterion_group!(benches, bench_codec, bench_separation);
criterion_main!(benches);
