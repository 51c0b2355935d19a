//! Monosynth - application builder and runner

use std::{io::stdout, sync::Arc};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait};
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;
use rtrb::RingBuffer;

use crate::synth::{
    AudioClock, Engine, Instrument, InstrumentKind, NoteDriver, SharedPitch, SynthMessage, Voice,
    VoiceStatus,
};

use super::{
    audio::{output_device_names, pick_config, AudioOutput, AudioTaps},
    config::SynthConfig,
    input::TerminalKeys,
    ui::{ControlLinks, SessionInfo, UiApp},
};

/// Capacity of the control-to-audio trigger queue
const NOTE_QUEUE_LEN: usize = 64;
/// Capacity of the audio-to-UI scope ring, in samples
const SCOPE_RING_LEN: usize = 16_384;
/// Capacity of the audio-to-UI status ring
const STATUS_RING_LEN: usize = 64;

/// Main application builder
pub struct Monosynth {
    config: SynthConfig,
}

impl Monosynth {
    pub fn new() -> Self {
        Self {
            config: SynthConfig::default(),
        }
    }

    pub fn instrument(mut self, kind: InstrumentKind) -> Self {
        self.config.instrument = kind;
        self
    }

    /// Pitch of the lowest key in Hz
    pub fn base_frequency(mut self, hz: f64) -> Self {
        self.config.base_frequency = hz;
        self
    }

    /// Requested device sample rate; the device default is used if unsupported
    pub fn sample_rate(mut self, hz: u32) -> Self {
        self.config.sample_rate = hz;
        self
    }

    pub fn master_gain(mut self, gain: f64) -> Self {
        self.config.master_gain = gain;
        self
    }

    /// Open the default output device and play until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let config = self.config;

        let host = cpal::default_host();
        for name in output_device_names(&host) {
            tracing::info!(device = %name, "found output device");
        }

        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        tracing::info!(
            device = %device.name().unwrap_or_else(|_| "<unnamed>".to_string()),
            "using default output device"
        );

        let supported = pick_config(&device, config.sample_rate)?;
        let clock = Arc::new(AudioClock::new(supported.sample_rate().0 as f64));
        let pitch = Arc::new(SharedPitch::new(config.base_frequency));

        // --- Cross-thread rings ---
        let (note_tx, note_rx) = RingBuffer::<SynthMessage>::new(NOTE_QUEUE_LEN);
        let (scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_RING_LEN);
        let (status_tx, status_rx) = RingBuffer::<VoiceStatus>::new(STATUS_RING_LEN);

        let voice = Voice::new(Instrument::new(config.instrument), Arc::clone(&pitch))
            .with_master_gain(config.master_gain);
        let engine = Engine::new(voice, note_rx, Arc::clone(&clock));

        let output = AudioOutput::start(
            &device,
            supported,
            engine,
            AudioTaps {
                scope: scope_tx,
                status: status_tx,
            },
        )?;

        let links = ControlLinks {
            pitch,
            clock,
            note_tx,
            scope_rx,
            status_rx,
        };

        let terminal = ratatui::init();
        let result = run_ui(terminal, &config, &output, links);
        ratatui::restore();

        drop(output);
        tracing::info!("audio stream stopped");
        result
    }
}

impl Default for Monosynth {
    fn default() -> Self {
        Self::new()
    }
}

fn run_ui(
    mut terminal: DefaultTerminal,
    config: &SynthConfig,
    output: &AudioOutput,
    links: ControlLinks,
) -> EyreResult<()> {
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .wrap_err("failed to enable key release events")?;
    } else {
        tracing::info!("terminal does not report key releases, falling back to key repeat timing");
    }
    execute!(stdout(), EnableFocusChange).wrap_err("failed to enable focus events")?;

    let keys = TerminalKeys::new(release_events);
    let session = SessionInfo {
        instrument: config.instrument.name(),
        sample_rate: output.sample_rate,
        channels: output.channels,
        release_events: keys.reports_releases(),
    };
    let mut app = UiApp::new(
        keys,
        NoteDriver::new(config.base_frequency),
        links,
        session,
        peak_level(config),
    );
    let result = app.run(&mut terminal);

    // Best effort: the terminal is being restored either way
    let _ = execute!(stdout(), DisableFocusChange);
    if release_events {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
    result
}

/// Largest output the configured instrument can reach, for scope scaling.
fn peak_level(config: &SynthConfig) -> f64 {
    let recipe = config.instrument.recipe();
    config.master_gain * recipe.volume * recipe.peak_weight()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_level_follows_gain_and_partials() {
        let config = SynthConfig::default();
        // Bell partials 1 + 0.5 + 0.25 at unit volume
        assert!((peak_level(&config) - 0.2 * 1.75).abs() < 1e-12);

        let quiet = SynthConfig {
            master_gain: 0.1,
            instrument: InstrumentKind::Harmonica,
            ..SynthConfig::default()
        };
        assert!((peak_level(&quiet) - 0.1 * 1.8).abs() < 1e-12);
    }
}
