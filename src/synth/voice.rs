use std::sync::Arc;

use crate::dsp::{EnvelopeStage, Oscillator};

use super::{
    instrument::Instrument,
    message::{NoteTarget, SynthMessage},
    pitch::SharedPitch,
};

/// Fixed output gain applied after the instrument mix.
pub const MASTER_GAIN: f64 = 0.2;

/// The single active instrument plus the pitch it plays.
///
/// `generate_sample` is the per-sample entry point for the audio layer: it
/// reads the shared pitch, evaluates the instrument and applies the master
/// gain. No allocation, no locks.
pub struct Voice {
    instrument: Instrument,
    pitch: Arc<SharedPitch>,
    osc: Oscillator,
    master_gain: f64,
}

/// Copy-able view of the voice for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceStatus {
    pub time: f64,
    pub pitch: f64,
    pub amplitude: f64,
    pub stage: EnvelopeStage,
}

impl Voice {
    pub fn new(instrument: Instrument, pitch: Arc<SharedPitch>) -> Self {
        Self {
            instrument,
            pitch,
            osc: Oscillator::new(),
            master_gain: MASTER_GAIN,
        }
    }

    /// Replace the oscillator, e.g. with a seeded one for reproducible noise.
    pub fn with_oscillator(mut self, osc: Oscillator) -> Self {
        self.osc = osc;
        self
    }

    pub fn with_master_gain(mut self, gain: f64) -> Self {
        self.master_gain = gain;
        self
    }

    /// One output sample at absolute time `time` (seconds).
    #[inline]
    pub fn generate_sample(&mut self, time: f64) -> f64 {
        let pitch = self.pitch.get();
        self.master_gain * self.instrument.sound(time, pitch, &mut self.osc)
    }

    /// Apply a trigger received from the control thread.
    pub fn apply(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { time } => self.instrument.note_on(time),
            SynthMessage::NoteOff { time } => self.instrument.note_off(time),
        }
    }

    pub fn status(&self, time: f64) -> VoiceStatus {
        let envelope = self.instrument.envelope();
        VoiceStatus {
            time,
            pitch: self.pitch.get(),
            amplitude: envelope.amplitude(time),
            stage: envelope.stage(time),
        }
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn pitch(&self) -> &Arc<SharedPitch> {
        &self.pitch
    }

    pub fn master_gain(&self) -> f64 {
        self.master_gain
    }
}

impl NoteTarget for Voice {
    fn note_on(&mut self, time: f64) {
        self.instrument.note_on(time);
    }

    fn note_off(&mut self, time: f64) {
        self.instrument.note_off(time);
    }
}
