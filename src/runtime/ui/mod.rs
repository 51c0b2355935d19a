//! Terminal UI and control loop
//!
//! The control loop runs on the main thread: it turns terminal key events
//! into key state, polls the note driver against the audio clock and draws
//! the scope, spectrum and voice status it receives from the audio callback.

mod events;
mod keyboard;
mod spectrum;
mod status;
mod waveform;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use crate::{
    dsp::EnvelopeStage,
    synth::{AudioClock, NoteDriver, SharedPitch, SynthMessage, VoiceStatus},
};

use super::input::TerminalKeys;

pub use status::SessionInfo;

use events::{render_events, EventLog};
use keyboard::render_keyboard;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, AudioStats};
use waveform::render_waveform;

/// Samples kept from the audio callback, also the FFT length
const SCOPE_LEN: usize = 2048;
/// Tail of the scope buffer drawn as a waveform
const WAVEFORM_LEN: usize = 512;
/// How long one pass of the loop waits for terminal input
const INPUT_POLL: Duration = Duration::from_millis(2);
/// Minimum time between redraws
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Channels between the control loop and the audio side
pub struct ControlLinks {
    pub pitch: Arc<SharedPitch>,
    pub clock: Arc<AudioClock>,
    pub note_tx: Producer<SynthMessage>,
    pub scope_rx: Consumer<f32>,
    pub status_rx: Consumer<VoiceStatus>,
}

pub struct UiApp {
    keys: TerminalKeys,
    driver: NoteDriver,
    links: ControlLinks,
    session: SessionInfo,
    voice: VoiceStatus,
    scope: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    events: EventLog,
    y_range: f64,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        keys: TerminalKeys,
        driver: NoteDriver,
        links: ControlLinks,
        session: SessionInfo,
        peak_level: f64,
    ) -> Self {
        let voice = VoiceStatus {
            time: 0.0,
            pitch: links.pitch.get(),
            amplitude: 0.0,
            stage: EnvelopeStage::Idle,
        };
        let spectrum = SpectrumAnalyzer::new(SCOPE_LEN, session.sample_rate as f64);
        Self {
            keys,
            driver,
            links,
            session,
            voice,
            scope: vec![0.0; SCOPE_LEN],
            spectrum,
            events: EventLog::default(),
            y_range: peak_level.abs().max(0.05) * 1.2,
            should_quit: false,
        }
    }

    /// Run until Esc or Ctrl+C.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        let mut last_draw: Option<Instant> = None;

        while !self.should_quit {
            let mut timeout = INPUT_POLL;
            while event::poll(timeout)? {
                let event = event::read()?;
                self.handle_event(event, Instant::now());
                timeout = Duration::ZERO;
            }

            self.keys.expire(Instant::now());
            let now = self.links.clock.now();
            if let Some(event) =
                self.driver
                    .poll(&self.keys, now, &self.links.pitch, &mut self.links.note_tx)
            {
                self.events.push(event);
            }

            if last_draw.map_or(true, |at| at.elapsed() >= FRAME_INTERVAL) {
                self.poll_audio();
                terminal.draw(|frame| self.render(frame))?;
                last_draw = Some(Instant::now());
            }
        }

        self.keys.release_all();
        let now = self.links.clock.now();
        self.driver
            .poll(&self.keys, now, &self.links.pitch, &mut self.links.note_tx);
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::FocusLost => self.keys.release_all(),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let pressed = key.kind != KeyEventKind::Release;
        if pressed && key.code == KeyCode::Esc {
            self.should_quit = true;
            return;
        }
        if pressed && key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        self.keys.handle(key, now);
    }

    /// Drain the audio taps: keep the newest `SCOPE_LEN` samples and the
    /// latest voice snapshot.
    fn poll_audio(&mut self) {
        let available = self.links.scope_rx.slots();
        if available > 0 {
            if let Ok(chunk) = self.links.scope_rx.read_chunk(available) {
                let (first, second) = chunk.as_slices();
                self.scope.extend_from_slice(first);
                self.scope.extend_from_slice(second);
                chunk.commit_all();
            }
            if self.scope.len() > SCOPE_LEN {
                let excess = self.scope.len() - SCOPE_LEN;
                self.scope.drain(0..excess);
            }
            self.spectrum.update(&self.scope);
        }

        while let Ok(status) = self.links.status_rx.pop() {
            self.voice = status;
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(5), // Keyboard
                Constraint::Min(8),    // Waveform + spectrum
                Constraint::Length(8), // Events
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.scope[SCOPE_LEN - WAVEFORM_LEN..]);
        render_status(frame, chunks[0], &self.session, &self.voice, &stats);

        render_keyboard(
            frame,
            chunks[1],
            self.driver.current_key(),
            self.driver.base_frequency(),
        );

        let scopes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        render_waveform(frame, scopes[0], &self.scope[SCOPE_LEN - WAVEFORM_LEN..], self.y_range);
        render_spectrum(frame, scopes[1], &self.spectrum);

        render_events(frame, chunks[3], &self.events);

        let help = Paragraph::new(" [Z..] play  [Esc] quit").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
