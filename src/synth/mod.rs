// Purpose: instrument composition, the voice controller and the note driver
// This layer sits above the DSP primitives and owns everything per-note

pub mod clock;
pub mod driver;
pub mod engine;
pub mod instrument;
pub mod message;
pub mod pitch;
pub mod voice;

pub use clock::AudioClock;
pub use driver::{semitone_frequency, NoteDriver, NoteEvent, BASE_FREQUENCY};
pub use engine::Engine;
pub use instrument::{Instrument, InstrumentKind, UnknownInstrument};
pub use message::{MessageReceiver, NoteTarget, SynthMessage};
pub use pitch::SharedPitch;
pub use voice::{Voice, VoiceStatus, MASTER_GAIN};
