//! Benchmarks for DSP primitives and the full voice.
//!
//! Run with: cargo bench
//!
//! Every sample is a pure function of absolute time, so these measure the
//! per-sample cost against real-time deadlines.
//!
//! Reference timing at 44.1kHz sample rate:
//!   - 64 samples  = 1.45ms deadline
//!   - 128 samples = 2.90ms deadline
//!   - 256 samples = 5.80ms deadline
//!   - 512 samples = 11.61ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Oscillator kinds and envelope stages
//!   - scenarios/*  Bell and harmonica voices rendered through the engine

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub const SAMPLE_RATE: f64 = 44_100.0;

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_envelope,
    scenarios::bench_voices,
);
criterion_main!(benches);
