use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    dsp::{Envelope, Oscillator},
    patch::{Partial, Recipe},
    voices,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The stock timbres.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InstrumentKind {
    #[default]
    Bell,
    Harmonica,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 2] = [InstrumentKind::Bell, InstrumentKind::Harmonica];

    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::Bell => "bell",
            InstrumentKind::Harmonica => "harmonica",
        }
    }

    pub fn recipe(&self) -> Recipe {
        match self {
            InstrumentKind::Bell => voices::bell(),
            InstrumentKind::Harmonica => voices::harmonica(),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An instrument name that matches none of [`InstrumentKind::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown instrument `{0}` (expected `bell` or `harmonica`)")]
pub struct UnknownInstrument(pub String);

impl FromStr for InstrumentKind {
    type Err = UnknownInstrument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InstrumentKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownInstrument(s.to_string()))
    }
}

/// A timbre: a recipe's partials mixed under one envelope.
///
/// The partial list is fixed at construction; only the envelope's trigger
/// state changes afterwards.
#[derive(Debug, Clone)]
pub struct Instrument {
    name: String,
    partials: Vec<Partial>,
    volume: f64,
    envelope: Envelope,
}

impl Instrument {
    pub fn new(kind: InstrumentKind) -> Self {
        Self::from_recipe(kind.recipe())
    }

    pub fn bell() -> Self {
        Self::new(InstrumentKind::Bell)
    }

    pub fn harmonica() -> Self {
        Self::new(InstrumentKind::Harmonica)
    }

    pub fn from_recipe(recipe: Recipe) -> Self {
        Self {
            name: recipe.name,
            partials: recipe.partials,
            volume: recipe.volume,
            envelope: Envelope::new(recipe.envelope),
        }
    }

    /// One sample of this instrument at absolute `time`, played at `pitch_hz`.
    ///
    /// `envelope(t) * volume * Σ weight * osc(pitch * ratio, t)`
    pub fn sound(&self, time: f64, pitch_hz: f64, osc: &mut Oscillator) -> f64 {
        let amplitude = self.envelope.amplitude(time);
        if amplitude == 0.0 {
            return 0.0;
        }

        let mix: f64 = self
            .partials
            .iter()
            .map(|p| p.weight * osc.sample(pitch_hz * p.ratio, time, p.waveform, p.vibrato))
            .sum();

        amplitude * self.volume * mix
    }

    pub fn note_on(&mut self, time: f64) {
        self.envelope.note_on(time);
    }

    pub fn note_off(&mut self, time: f64) {
        self.envelope.note_off(time);
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn partials(&self) -> &[Partial] {
        &self.partials
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{EnvelopeShape, Vibrato, Waveform};

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("bell".parse::<InstrumentKind>().unwrap(), InstrumentKind::Bell);
        assert_eq!(" Harmonica ".parse::<InstrumentKind>().unwrap(), InstrumentKind::Harmonica);
        assert_eq!(
            "theremin".parse::<InstrumentKind>(),
            Err(UnknownInstrument("theremin".to_string()))
        );
        assert_eq!(
            UnknownInstrument("theremin".to_string()).to_string(),
            "unknown instrument `theremin` (expected `bell` or `harmonica`)"
        );
    }

    #[test]
    fn silent_until_triggered() {
        let bell = Instrument::bell();
        let mut osc = Oscillator::seeded(0);
        for n in 0..100 {
            assert_eq!(bell.sound(n as f64 / 1_000.0, 440.0, &mut osc), 0.0);
        }
    }

    #[test]
    fn mixes_partials_under_the_envelope() {
        let recipe = Recipe::new("test", EnvelopeShape::new(0.01, 1.0, 1.0, 1.0, 1.0))
            .partial(Partial::new(Waveform::Sine, 1.0, 1.0))
            .partial(Partial::new(Waveform::Sine, 2.0, 0.5))
            .volume(0.5);
        let mut inst = Instrument::from_recipe(recipe);
        let mut osc = Oscillator::seeded(0);
        inst.note_on(0.0);

        let t = 0.5; // sustain at 1.0
        let pitch = 110.0;
        let phase = |hz: f64| (std::f64::consts::TAU * hz * t).sin();
        let expected = 0.5 * (phase(pitch) + 0.5 * phase(2.0 * pitch));
        let actual = inst.sound(t, pitch, &mut osc);
        assert!((actual - expected).abs() < 1e-12, "expected {expected}, got {actual}");
    }

    #[test]
    fn bell_recipe_matches_its_description() {
        let bell = Instrument::bell();
        let ratios: Vec<f64> = bell.partials().iter().map(|p| p.ratio).collect();
        let weights: Vec<f64> = bell.partials().iter().map(|p| p.weight).collect();
        assert_eq!(ratios, [2.0, 3.0, 4.0]);
        assert_eq!(weights, [1.0, 0.5, 0.25]);
        assert!(bell.partials().iter().all(|p| p.waveform == Waveform::Sine));
        assert_eq!(bell.partials()[0].vibrato, Vibrato::new(5.0, 0.001));
        assert_eq!(bell.partials()[1].vibrato, Vibrato::NONE);

        let shape = bell.envelope().shape();
        assert_eq!(shape, EnvelopeShape::new(0.01, 1.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn harmonica_has_a_noise_floor() {
        let harmonica = Instrument::harmonica();
        let noise: Vec<&Partial> = harmonica
            .partials()
            .iter()
            .filter(|p| p.waveform == Waveform::Noise)
            .collect();
        assert_eq!(noise.len(), 1);
        assert_eq!(noise[0].weight, 0.05);
        assert_eq!(harmonica.partials()[0].waveform, Waveform::Square);
        assert_eq!(harmonica.partials()[1].ratio, 1.5);
    }

    #[test]
    fn harmonica_output_is_bounded_by_its_weights() {
        let mut harmonica = Instrument::harmonica();
        let mut osc = Oscillator::seeded(9);
        harmonica.note_on(0.0);
        let bound = 1.0 + 0.5 + 0.25 + 0.05;
        for n in 0..4_410 {
            let s = harmonica.sound(n as f64 / 44_100.0, 330.0, &mut osc);
            assert!(s.abs() <= bound, "sample {n}: {s}");
        }
    }
}
