use crate::MIN_TIME;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
ADSR Envelope Implementation
============================

A linear ADSR envelope driven by absolute timestamps rather than a per-sample
counter. The envelope only remembers WHEN the gate last changed; the level at
any moment is recomputed from the elapsed time.

Vocabulary
----------

  amplitude   The envelope's output at a given time. Multiplies the audio
              signal to control its loudness.

  stage       Which phase the envelope is in: Idle, Attack, Decay, Sustain or
              Release. Derived from the gate and the elapsed time.

  gate        Note on/off. `note_on(t)` opens it, `note_off(t)` closes it.
              Each call stores its timestamp, replacing the previous one.

  start       Peak amplitude reached at the end of the attack.

  sustain     Amplitude held while the gate stays open after the decay.


The Shape: Linear Ramps
-----------------------

  Amplitude
  start ┐     ╱╲
        │    ╱  ╲___________
  sus   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release
         (A)   (D)      (S)      (R)

While the gate is open, with e = t - note_on_time:

    e <= A              start * e / A
    A < e <= A + D      start + (sustain - start) * (e - A) / D
    e > A + D           sustain

After the gate closes, with e = t - note_off_time:

    sustain - sustain * e / R

Release always ramps from the SUSTAIN level, even if the key was let go
during the attack. With a zero sustain (bells, plucks) an early release is
therefore instantly silent.

The release ramp is not clamped at R: past that point the line keeps falling
below zero. The silence snap below swallows it, so the output stays at 0.


Silence Snap
------------

Any amplitude at or below 1e-4 is returned as exactly 0.0. This catches the
tail of the release, negative values past R, and timestamps that precede the
trigger. Callers detect a finished note by the amplitude reaching 0; there is
no explicit "done" state.


Threading
---------

`note_on`/`note_off` take `&mut self`, `amplitude` takes `&self`. The audio
thread owns the envelope; the control thread asks for changes by sending
messages (see `synth::message`) instead of writing these fields directly.
*/

/// Amplitudes at or below this value are snapped to exactly zero.
pub const SILENCE_THRESHOLD: f64 = 1e-4;

/// The stage of the envelope state machine at a given time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,    // No note has ever been triggered
    Attack,  // Gate open, ramping 0 → start
    Decay,   // Gate open, ramping start → sustain
    Sustain, // Gate open, holding sustain
    Release, // Gate closed, ramping sustain → 0
}

impl EnvelopeStage {
    pub fn label(&self) -> &'static str {
        match self {
            EnvelopeStage::Idle => "idle",
            EnvelopeStage::Attack => "attack",
            EnvelopeStage::Decay => "decay",
            EnvelopeStage::Sustain => "sustain",
            EnvelopeStage::Release => "release",
        }
    }
}

/// Envelope configuration. Fixed once the envelope is built.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    pub attack_time: f64,
    pub decay_time: f64,
    pub release_time: f64,
    pub start_amplitude: f64,
    pub sustain_amplitude: f64,
}

impl EnvelopeShape {
    pub const fn new(
        attack_time: f64,
        decay_time: f64,
        release_time: f64,
        start_amplitude: f64,
        sustain_amplitude: f64,
    ) -> Self {
        Self {
            attack_time,
            decay_time,
            release_time,
            start_amplitude,
            sustain_amplitude,
        }
    }
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self::new(0.001, 1.0, 1.0, 1.0, 0.0)
    }
}

#[derive(Debug, Clone)]
pub struct Envelope {
    // ADSR parameters (set once, define the envelope shape)
    attack_time: f64,       // seconds to ramp 0 → start
    decay_time: f64,        // seconds to ramp start → sustain
    release_time: f64,      // seconds to ramp sustain → 0
    start_amplitude: f64,   // peak at the end of the attack
    sustain_amplitude: f64, // level held while the gate is open

    // Trigger state (changes only on note_on / note_off)
    note_on_time: f64,
    note_off_time: f64,
    note_on: bool,
    triggered: bool, // false until the first note_on
}

impl Envelope {
    pub fn new(shape: EnvelopeShape) -> Self {
        Self {
            attack_time: shape.attack_time.max(MIN_TIME),
            decay_time: shape.decay_time.max(MIN_TIME),
            release_time: shape.release_time.max(MIN_TIME),
            start_amplitude: shape.start_amplitude,
            sustain_amplitude: shape.sustain_amplitude,

            note_on_time: 0.0,
            note_off_time: 0.0,
            note_on: false,
            triggered: false,
        }
    }

    pub fn adsr(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self::new(EnvelopeShape::new(attack, decay, release, 1.0, sustain))
    }

    /// Gate high at absolute time `time`. Restarts the attack from any stage.
    pub fn note_on(&mut self, time: f64) {
        self.note_on_time = time;
        self.note_on = true;
        self.triggered = true;
    }

    /// Gate low at absolute time `time`.
    pub fn note_off(&mut self, time: f64) {
        self.note_off_time = time;
        self.note_on = false;
    }

    /// Envelope amplitude at absolute time `time`.
    pub fn amplitude(&self, time: f64) -> f64 {
        if !self.triggered {
            return 0.0;
        }

        let amplitude = if self.note_on {
            let elapsed = time - self.note_on_time;
            if elapsed <= self.attack_time {
                self.start_amplitude * elapsed / self.attack_time
            } else if elapsed <= self.attack_time + self.decay_time {
                let progress = (elapsed - self.attack_time) / self.decay_time;
                self.start_amplitude + (self.sustain_amplitude - self.start_amplitude) * progress
            } else {
                self.sustain_amplitude
            }
        } else {
            let elapsed = time - self.note_off_time;
            self.sustain_amplitude - self.sustain_amplitude * elapsed / self.release_time
        };

        if amplitude <= SILENCE_THRESHOLD {
            0.0
        } else {
            amplitude
        }
    }

    /// Stage of the state machine at absolute time `time`.
    pub fn stage(&self, time: f64) -> EnvelopeStage {
        if !self.triggered {
            return EnvelopeStage::Idle;
        }
        if !self.note_on {
            return EnvelopeStage::Release;
        }

        let elapsed = time - self.note_on_time;
        if elapsed <= self.attack_time {
            EnvelopeStage::Attack
        } else if elapsed <= self.attack_time + self.decay_time {
            EnvelopeStage::Decay
        } else {
            EnvelopeStage::Sustain
        }
    }

    pub fn is_note_on(&self) -> bool {
        self.note_on
    }

    pub fn note_on_time(&self) -> f64 {
        self.note_on_time
    }

    pub fn note_off_time(&self) -> f64 {
        self.note_off_time
    }

    pub fn shape(&self) -> EnvelopeShape {
        EnvelopeShape {
            attack_time: self.attack_time,
            decay_time: self.decay_time,
            release_time: self.release_time,
            start_amplitude: self.start_amplitude,
            sustain_amplitude: self.sustain_amplitude,
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(EnvelopeShape::default())
    }
}
