#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use qpack::prelude::*;
use serde_json::{json, Value};

fn point() -> Qpack {
    Qpack::from(VecMap::from(vec![
        (Qpack::from("name"), Qpack::from("cpu.load")),
        (Qpack::from("ts"), Qpack::from(1_571_500_000)),
        (Qpack::from("value"), Qpack::from(0.75)),
        (Qpack::from("tags"), Qpack::from(vec!["host-1", "eu-west"])),
    ]))
}

fn json_point() -> Value {
    json!({
        "name": "cpu.load",
        "ts": 1_571_500_000,
        "value": 0.75,
        "tags": ["host-1", "eu-west"],
    })
}

fn qpack_i64_encode(c: &mut Criterion) {
    c.bench_function("QPack i64 encode", |b| b.iter(|| encode(&black_box(1_000_000i64))));
}

fn qpack_i64_put(c: &mut Criterion) {
    c.bench_function("QPack i64 put", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(16);
            out.put_i64(black_box(1_000_000));
            out
        })
    });
}

fn json_i64_encode(c: &mut Criterion) {
    c.bench_function("JSON i64 encode", |b| {
        b.iter(|| serde_json::to_vec(&black_box(1_000_000i64)))
    });
}

fn qpack_i64_decode(c: &mut Criterion) {
    let buf = encode(&1_000_000i64).unwrap_or_default();
    c.bench_function("QPack i64 decode", move |b| b.iter(|| decode(black_box(&buf))));
}

fn json_i64_decode(c: &mut Criterion) {
    let buf = serde_json::to_vec(&1_000_000i64).unwrap_or_default();
    c.bench_function("JSON i64 decode", move |b| {
        b.iter(|| serde_json::from_slice::<i64>(black_box(&buf)))
    });
}

fn qpack_str_encode(c: &mut Criterion) {
    let s: String = (0..10_000).map(|x| (b'a' + (x % 26) as u8) as char).collect();
    c.bench_function("QPack string encode", move |b| b.iter(|| encode(black_box(&s))));
}

fn json_str_encode(c: &mut Criterion) {
    let s: String = (0..10_000).map(|x| (b'a' + (x % 26) as u8) as char).collect();
    c.bench_function("JSON string encode", move |b| {
        b.iter(|| serde_json::to_vec(black_box(&s)))
    });
}

fn qpack_point_roundtrip(c: &mut Criterion) {
    let p = point();
    let len = encode(&p).map(|out| out.len()).unwrap_or(0);
    c.bench_function(&format!("QPack point round trip ({} bytes)", len), move |b| {
        b.iter(|| encode(black_box(&p)).and_then(|out| decode(&out)))
    });
}

fn json_point_roundtrip(c: &mut Criterion) {
    let p = json_point();
    let len = serde_json::to_vec(&p).map(|out| out.len()).unwrap_or(0);
    c.bench_function(&format!("JSON point round trip ({} bytes)", len), move |b| {
        b.iter(|| {
            serde_json::to_vec(black_box(&p)).and_then(|out| serde_json::from_slice::<Value>(&out))
        })
    });
}

criterion_group!(
    benches,
    qpack_i64_encode,
    qpack_i64_put,
    json_i64_encode,
    qpack_i64_decode,
    json_i64_decode,
    qpack_str_encode,
    json_str_encode,
    qpack_point_roundtrip,
    json_point_roundtrip,
);

criterion_main!(benches);
