//! Runtime for playing the synth from a terminal.
//!
//! This module provides the `Monosynth` builder, which opens the default
//! audio device, starts the realtime engine in the device callback and runs
//! a terminal UI whose keyboard drives the note driver.
//!
//! # Example
//!
//! ```ignore
//! use monosynth::{runtime::Monosynth, synth::InstrumentKind};
//!
//! fn main() -> color_eyre::Result<()> {
//!     Monosynth::new()
//!         .instrument(InstrumentKind::Harmonica)
//!         .base_frequency(220.0)
//!         .run()
//! }
//! ```

mod app;
mod audio;
mod config;
mod input;
mod logging;
mod ui;

pub use app::Monosynth;
pub use config::SynthConfig;
pub use input::TerminalKeys;
pub use logging::{default_log_path, open_log};
