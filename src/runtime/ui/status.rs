//! Status bar widget - shows instrument, stream format, pitch, envelope stage
//! and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{dsp::EnvelopeStage, synth::VoiceStatus};

/// Output level over the visible scope window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self::default();
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Fixed facts about the running session
pub struct SessionInfo {
    pub instrument: &'static str,
    pub sample_rate: u32,
    pub channels: u16,
    pub release_events: bool,
}

fn stage_color(stage: EnvelopeStage) -> Color {
    match stage {
        EnvelopeStage::Idle => Color::DarkGray,
        EnvelopeStage::Attack => Color::Green,
        EnvelopeStage::Decay => Color::Yellow,
        EnvelopeStage::Sustain => Color::Cyan,
        EnvelopeStage::Release => Color::Magenta,
    }
}

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    session: &SessionInfo,
    voice: &VoiceStatus,
    stats: &AudioStats,
) {
    let block = Block::default().title(" monosynth ").borders(Borders::ALL);

    let key_mode = if session.release_events {
        "key release"
    } else {
        "key repeat"
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {}  ", session.instrument),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:.1}kHz x{}  ", session.sample_rate as f64 / 1000.0, session.channels),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("t {:>8.3}s  ", voice.time),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:>8.2}Hz  ", voice.pitch),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:<7} {:.3}  ", voice.stage.label(), voice.amplitude),
            Style::default().fg(stage_color(voice.stage)),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(key_mode, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
