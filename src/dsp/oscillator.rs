use std::f64::consts::{FRAC_2_PI, FRAC_PI_2, PI, TAU};

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::lfo::Vibrato;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Audio Oscillators
=================

Every waveform here is a function of absolute time rather than a running
phase accumulator: `sample(pitch, t, ...)` recomputes the phase from scratch.
That costs a multiply per sample but means pitch changes from the control
thread take effect instantly and there is no per-oscillator state to reset.

    phase = 2π * pitch * t  +  vibrato.phase_offset(pitch, t)

Waveforms
---------

  Sine         sin(phase)                               [-1, 1]
  Square       +1 if sin(phase) >= 0 else -1            {-1, +1}
  Triangle     asin(sin(phase)) * 2/π                   [-1, 1]
  AnalogSaw    2/π * Σ sin(n * phase) / n, n = 1..50    ~[-1.18, 1.18]
  DigitalSaw   2/π * (pitch * π * (t mod 1/pitch) - π/2) [-1, 1)
  Noise        uniform random                           [-1, 1]

AnalogSaw is additive: fifty sine harmonics with 1/n amplitudes. It is warm
and band-limited but costs fifty sin() calls per sample, and the truncated
series overshoots near the ramp reset (Gibbs phenomenon), so it is not
hard-bounded to [-1, 1].

DigitalSaw is the closed form of the same ramp: O(1), exact, but it contains
every harmonic up to Nyquist and beyond, so it aliases and sounds harsh.
It ignores vibrato since it never looks at the phase.

Noise draws from the oscillator's own generator. It is the only waveform with
hidden state; everything else is a pure function of its arguments.
*/

/// Number of sine harmonics summed by [`Waveform::AnalogSaw`].
pub const ANALOG_SAW_HARMONICS: u32 = 50;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    AnalogSaw,
    DigitalSaw,
    Noise,
}

impl Waveform {
    pub const ALL: [Waveform; 6] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::AnalogSaw,
        Waveform::DigitalSaw,
        Waveform::Noise,
    ];

    /// True for every waveform whose output is a pure function of its inputs.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self, Waveform::Noise)
    }
}

/// Convert a frequency in Hz to angular frequency (rad/s).
#[inline]
pub fn angular(hz: f64) -> f64 {
    hz * TAU
}

/// Instantaneous phase of a carrier at `pitch_hz`, including vibrato.
#[inline]
pub fn phase(pitch_hz: f64, time: f64, vibrato: Vibrato) -> f64 {
    let carrier = angular(pitch_hz) * time;
    if vibrato.is_active() {
        carrier + vibrato.phase_offset(pitch_hz, time)
    } else {
        carrier
    }
}

#[inline]
pub fn sine(phase: f64) -> f64 {
    phase.sin()
}

#[inline]
pub fn square(phase: f64) -> f64 {
    if phase.sin() >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[inline]
pub fn triangle(phase: f64) -> f64 {
    phase.sin().asin() * FRAC_2_PI
}

pub fn analog_saw(phase: f64) -> f64 {
    let sum: f64 = (1..=ANALOG_SAW_HARMONICS)
        .map(|n| {
            let n = n as f64;
            (n * phase).sin() / n
        })
        .sum();
    sum * FRAC_2_PI
}

/// Closed-form sawtooth. Zero pitch has no period, so it renders silence.
#[inline]
pub fn digital_saw(pitch_hz: f64, time: f64) -> f64 {
    if pitch_hz == 0.0 {
        return 0.0;
    }
    FRAC_2_PI * (pitch_hz * PI * (time % (1.0 / pitch_hz)) - FRAC_PI_2)
}

/// Waveform evaluator plus the random generator that feeds [`Waveform::Noise`].
///
/// One `Oscillator` is owned by the voice and shared by all of its partials.
#[derive(Debug, Clone)]
pub struct Oscillator {
    noise: SmallRng,
}

impl Oscillator {
    /// Oscillator with a noise generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            noise: SmallRng::from_os_rng(),
        }
    }

    /// Oscillator with a reproducible noise sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            noise: SmallRng::seed_from_u64(seed),
        }
    }

    /// Evaluate one sample of `waveform` at `pitch_hz` and absolute `time`.
    #[inline]
    pub fn sample(&mut self, pitch_hz: f64, time: f64, waveform: Waveform, vibrato: Vibrato) -> f64 {
        match waveform {
            Waveform::Sine => sine(phase(pitch_hz, time, vibrato)),
            Waveform::Square => square(phase(pitch_hz, time, vibrato)),
            Waveform::Triangle => triangle(phase(pitch_hz, time, vibrato)),
            Waveform::AnalogSaw => analog_saw(phase(pitch_hz, time, vibrato)),
            Waveform::DigitalSaw => digital_saw(pitch_hz, time),
            Waveform::Noise => self.noise.random_range(-1.0..=1.0),
        }
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}
