use crate::synth::{InstrumentKind, BASE_FREQUENCY, MASTER_GAIN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Startup settings for the terminal synth.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    /// Requested device sample rate in Hz. The device default is used when
    /// the device cannot run at this rate.
    pub sample_rate: u32,
    /// Gain applied to the instrument output
    pub master_gain: f64,
    /// Pitch of the lowest key, in Hz
    pub base_frequency: f64,
    pub instrument: InstrumentKind,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            master_gain: MASTER_GAIN,
            base_frequency: BASE_FREQUENCY,
            instrument: InstrumentKind::Bell,
        }
    }
}
