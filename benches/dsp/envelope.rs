//! Benchmarks for the timestamp-based ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::Envelope;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn render(env: &Envelope, buffer: &mut [f32], start: f64) {
    for (n, sample) in buffer.iter_mut().enumerate() {
        *sample = env.amplitude(start + n as f64 / SAMPLE_RATE) as f32;
    }
}

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut env = Envelope::adsr(0.1, 0.1, 0.7, 0.3);
        env.note_on(0.0);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| render(&env, black_box(&mut buffer), 0.0))
        });

        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| render(&env, black_box(&mut buffer), 1.0))
        });

        let mut released = env.clone();
        released.note_off(1.0);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| render(&released, black_box(&mut buffer), 1.1))
        });
    }

    group.finish();
}
