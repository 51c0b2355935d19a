//! Instrument recipes as plain data.
//!
//! A recipe lists the partials to mix, the envelope shape and the output
//! volume. One generic routine (`synth::Instrument::sound`) interprets every
//! recipe, so a new timbre is a new `Recipe` value rather than new code.

use crate::dsp::{EnvelopeShape, Vibrato, Waveform};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub partials: Vec<Partial>,
    pub envelope: EnvelopeShape,
    pub volume: f64,
}

/// One oscillator in the mix, tuned relative to the played pitch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    pub waveform: Waveform,
    /// Frequency as a multiple of the played pitch
    pub ratio: f64,
    /// Mix weight
    pub weight: f64,
    pub vibrato: Vibrato,
}

impl Partial {
    pub const fn new(waveform: Waveform, ratio: f64, weight: f64) -> Self {
        Self {
            waveform,
            ratio,
            weight,
            vibrato: Vibrato::NONE,
        }
    }

    /// Unpitched noise at a fixed level.
    pub const fn noise(weight: f64) -> Self {
        Self::new(Waveform::Noise, 0.0, weight)
    }

    pub const fn with_vibrato(mut self, vibrato: Vibrato) -> Self {
        self.vibrato = vibrato;
        self
    }
}

impl Recipe {
    pub fn new(name: impl Into<String>, envelope: EnvelopeShape) -> Self {
        Self {
            name: name.into(),
            partials: Vec::new(),
            envelope,
            volume: 1.0,
        }
    }

    pub fn partial(mut self, partial: Partial) -> Self {
        self.partials.push(partial);
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Hold the envelope at `level` while the gate is open.
    pub fn sustain(mut self, level: f64) -> Self {
        self.envelope.sustain_amplitude = level;
        self
    }

    /// Sum of absolute partial weights; the mix never exceeds this for
    /// waveforms bounded by [-1, 1].
    pub fn peak_weight(&self) -> f64 {
        self.partials.iter().map(|p| p.weight.abs()).sum()
    }
}
