#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

/// Envelope triggers sent from the control thread to the audio thread.
///
/// Times are absolute audio-clock seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn { time: f64 },
    NoteOff { time: f64 },
}

/// Audio-side end of the trigger queue. Must never block.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

/// Anything that accepts note triggers: a voice directly, or the sending end
/// of a queue feeding one.
pub trait NoteTarget {
    fn note_on(&mut self, time: f64);

    fn note_off(&mut self, time: f64);
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

#[cfg(feature = "rtrb")]
impl NoteTarget for Producer<SynthMessage> {
    fn note_on(&mut self, time: f64) {
        if self.push(SynthMessage::NoteOn { time }).is_err() {
            tracing::warn!(time, "trigger queue full, dropped note on");
        }
    }

    fn note_off(&mut self, time: f64) {
        if self.push(SynthMessage::NoteOff { time }).is_err() {
            tracing::warn!(time, "trigger queue full, dropped note off");
        }
    }
}

/// Receiver that never has messages, for voices driven directly.
impl MessageReceiver for () {
    fn pop(&mut self) -> Option<SynthMessage> {
        None
    }
}
