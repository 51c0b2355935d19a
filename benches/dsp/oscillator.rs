//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::{Oscillator, Vibrato, Waveform};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

fn render(osc: &mut Oscillator, buffer: &mut [f32], waveform: Waveform, vibrato: Vibrato) {
    for (n, sample) in buffer.iter_mut().enumerate() {
        let t = n as f64 / SAMPLE_RATE;
        *sample = osc.sample(440.0, t, waveform, vibrato) as f32;
    }
}

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];
        let mut osc = Oscillator::seeded(0);

        for waveform in Waveform::ALL {
            let name = format!("{waveform:?}").to_lowercase();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| render(&mut osc, black_box(&mut buffer), waveform, Vibrato::NONE))
            });
        }

        // Sine with phase-modulation vibrato, the bell's fundamental
        group.bench_with_input(BenchmarkId::new("sine_vibrato", size), &size, |b, _| {
            b.iter(|| {
                render(
                    &mut osc,
                    black_box(&mut buffer),
                    Waveform::Sine,
                    Vibrato::new(5.0, 0.001),
                )
            })
        });
    }

    group.finish();
}
