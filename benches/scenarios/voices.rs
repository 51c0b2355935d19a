//! Benchmarks for the built-in instruments through the engine.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use monosynth::{
    dsp::Oscillator,
    synth::{AudioClock, Engine, Instrument, InstrumentKind, NoteTarget, SharedPitch, Voice},
};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

/// Stock partials with a held sustain, so every iteration renders the mix
/// rather than the silence after the stock decay.
fn engine_for(kind: InstrumentKind) -> Engine<()> {
    let pitch = Arc::new(SharedPitch::new(440.0));
    let instrument = Instrument::from_recipe(kind.recipe().sustain(0.6));
    let mut voice = Voice::new(instrument, pitch).with_oscillator(Oscillator::seeded(7));
    voice.note_on(0.0);
    Engine::new(voice, (), Arc::new(AudioClock::new(SAMPLE_RATE)))
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for kind in InstrumentKind::ALL {
            let mut engine = engine_for(kind);
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
                b.iter(|| engine.render(black_box(&mut buffer)))
            });
        }
    }

    group.finish();
}
