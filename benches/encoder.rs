#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use qpack::prelude::*;

const N_BIG_ARR: usize = 2000;

fn big_arr() -> Qpack {
    let v: Vec<Qpack> = (0..N_BIG_ARR).map(|i| Qpack::from(i as i32 * 1000)).collect();
    Qpack::from(v)
}

const N_ARR: usize = 10;
const N_MAP: usize = 10;

fn big_q() -> Qpack {
    let v0: Vec<Qpack> = (0..N_ARR).map(|i| Qpack::from(i as i64)).collect();
    let m: VecMap<Qpack, Qpack> = (0..N_MAP)
        .map(|i| (Qpack::from(format!("series-{}", i)), Qpack::from(v0.clone())))
        .collect();
    let v: Vec<Qpack> = std::iter::repeat(m).map(Qpack::Map).take(N_ARR).collect();
    Qpack::from(v)
}

fn enc_len(q: &Qpack) -> usize { encode(q).map(|out| out.len()).unwrap_or(0) }

fn bench_construction(c: &mut Criterion) {
    c.bench_function(
        &format!("Creating a Qpack tree of encoded size {}", enc_len(&big_q())),
        |b| b.iter(|| black_box(big_q())),
    );
}

fn bench_enc(c: &mut Criterion) {
    let big_q = big_q();
    c.bench_function(
        &format!("Encoding a Qpack tree, output size of {} bytes", enc_len(&big_q)),
        move |b| b.iter(|| encode(black_box(&big_q))),
    );
}

fn bench_enc_single_alloc(c: &mut Criterion) {
    let big_q = big_q();
    let len = enc_len(&big_q);
    c.bench_function(
        &format!(
            "Encoding a Qpack tree, output size of {} bytes, buffer preallocated",
            len
        ),
        move |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(len);
                encode_into(black_box(&big_q), &mut out).map(|_| out)
            })
        },
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = encode(&big_q()).unwrap_or_default();
    c.bench_function(
        &format!("Decoding a Qpack tree, input size of {} bytes", enc.len()),
        move |b| b.iter(|| decode(black_box(&enc))),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_arr = big_arr();
    c.bench_function(
        &format!("Encoding a Qpack array, output size of {} bytes", enc_len(&big_arr)),
        move |b| b.iter(|| encode(black_box(&big_arr))),
    );
}

fn bench_enc_native(c: &mut Criterion) {
    let native: Vec<i32> = (0..N_BIG_ARR as i32).map(|i| i * 1000).collect();
    c.bench_function("Encoding a native vector without building a tree", move |b| {
        b.iter(|| encode(black_box(&native)))
    });
}

fn bench_dec_flat(c: &mut Criterion) {
    let enc = encode(&big_arr()).unwrap_or_default();
    c.bench_function(
        &format!("Decoding a Qpack array of {} bytes", enc.len()),
        move |b| b.iter(|| decode(black_box(&enc))),
    );
}

criterion_group!(
    benches,
    bench_construction,
    bench_enc,
    bench_enc_single_alloc,
    bench_dec,
    bench_enc_flat,
    bench_enc_native,
    bench_dec_flat
);
criterion_main!(benches);
