use std::sync::Arc;

use super::{
    clock::AudioClock,
    message::MessageReceiver,
    voice::{Voice, VoiceStatus},
};

/// Audio-thread side of the synth: drains triggers, renders samples, keeps
/// the audio clock.
///
/// Everything here runs inside the device callback, so it only ever pops from
/// the queue and does arithmetic.
pub struct Engine<R: MessageReceiver> {
    voice: Voice,
    rx: R,
    clock: Arc<AudioClock>,
    frame: u64,
}

impl<R: MessageReceiver> Engine<R> {
    pub fn new(voice: Voice, rx: R, clock: Arc<AudioClock>) -> Self {
        let frame = clock.frames();
        Self {
            voice,
            rx,
            clock,
            frame,
        }
    }

    /// Apply every trigger queued since the last call.
    pub fn process_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            self.voice.apply(msg);
        }
    }

    /// Render the next frame and advance the clock.
    #[inline]
    pub fn next_sample(&mut self) -> f64 {
        let time = self.clock.time_of(self.frame);
        let sample = self.voice.generate_sample(time);
        self.frame += 1;
        self.clock.publish(self.frame);
        sample
    }

    /// Render a mono block: drain triggers, then fill `out`.
    pub fn render(&mut self, out: &mut [f32]) {
        self.process_messages();
        for sample in out.iter_mut() {
            *sample = self.next_sample() as f32;
        }
    }

    /// Snapshot of the voice at the current clock position.
    pub fn status(&self) -> VoiceStatus {
        self.voice.status(self.clock.time_of(self.frame))
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    pub fn clock(&self) -> &Arc<AudioClock> {
        &self.clock
    }
}
