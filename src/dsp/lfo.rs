//! Low Frequency Oscillator (LFO) vibrato.

/*
Vibrato by Phase Modulation
===========================

An LFO is an oscillator running at sub-audio frequencies. Here it never
produces sound itself; it wobbles the phase of an audio-rate oscillator.

Vocabulary
----------

  rate        LFO frequency in Hz. 2 - 7 Hz is the vibrato sweet spot.

  depth       Scale of the phase offset, relative to the carrier pitch.
              The offset is `depth * pitch * sin(2π * rate * t)` radians.

  phase       The argument handed to sin()/asin()/etc. by the oscillator.


Why Phase and Not Frequency?
----------------------------

Adding a slowly varying term to the phase bends the instantaneous frequency:

    phase(t)     = 2π f t + d f sin(2π r t)
    d phase / dt = 2π f + 2π r d f cos(2π r t)

so the pitch swings by ±(r * d * f) Hz around f. With the bell settings
(r = 5 Hz, d = 0.001) a 440 Hz partial drifts by about ±2.2 Hz, a gentle
shimmer. Because the offset scales with pitch, higher partials wobble by the
same musical interval as the fundamental.

Evaluating the LFO from absolute time keeps it stateless: the same `t` always
gives the same phase, which is what makes the periodic waveforms pure.
*/

use super::oscillator::angular;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Phase-modulating LFO settings for one oscillator partial.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vibrato {
    /// LFO frequency in Hz
    pub rate_hz: f64,
    /// Phase offset scale, relative to the carrier pitch
    pub depth: f64,
}

impl Vibrato {
    /// No modulation.
    pub const NONE: Vibrato = Vibrato {
        rate_hz: 0.0,
        depth: 0.0,
    };

    pub const fn new(rate_hz: f64, depth: f64) -> Self {
        Self { rate_hz, depth }
    }

    /// Phase offset (radians) added to a carrier at `pitch_hz` at time `time`.
    #[inline]
    pub fn phase_offset(&self, pitch_hz: f64, time: f64) -> f64 {
        self.depth * pitch_hz * (angular(self.rate_hz) * time).sin()
    }

    pub fn is_active(&self) -> bool {
        self.depth != 0.0 && self.rate_hz != 0.0
    }
}
