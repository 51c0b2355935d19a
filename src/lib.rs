pub mod dsp;
pub mod io; // Key layout and input contracts
pub mod patch; // Instrument recipes as plain data
#[cfg(feature = "rtrb")]
pub mod runtime; // Audio device + terminal keyboard front-end
pub mod synth; // Instrument, voice controller, note driver
pub mod voices;

/// Shortest stage duration an envelope accepts, in seconds.
pub(crate) const MIN_TIME: f64 = 1.0 / 48_000.0;
