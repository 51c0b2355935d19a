//! Low-level DSP primitives used by the instrument layer.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! evaluate once per output sample inside the audio callback. They stay focused
//! on the signal math; mixing and note handling live in `synth`.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Vibrato (phase-modulating LFO) parameters.
pub mod lfo;
/// Oscillator waveforms and noise source.
pub mod oscillator;

pub use envelope::{Envelope, EnvelopeShape, EnvelopeStage};
pub use lfo::Vibrato;
pub use oscillator::{Oscillator, Waveform};
