//! Scrolling log of note events

use std::collections::VecDeque;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{io::keymap, synth::NoteEvent};

/// Events kept for display
const EVENT_LOG_LEN: usize = 64;

#[derive(Default)]
pub struct EventLog {
    events: VecDeque<NoteEvent>,
}

impl EventLog {
    pub fn push(&mut self, event: NoteEvent) {
        if self.events.len() == EVENT_LOG_LEN {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// The newest `count` events, oldest first.
    pub fn latest(&self, count: usize) -> impl Iterator<Item = &NoteEvent> {
        self.events.iter().skip(self.events.len().saturating_sub(count))
    }
}

fn event_line(event: &NoteEvent) -> Line<'static> {
    let (key, color) = match event {
        NoteEvent::On { key, .. } => (*key, Color::Green),
        NoteEvent::Off { key, .. } => (*key, Color::DarkGray),
    };
    let label = keymap::key_label(key).unwrap_or('?');
    Line::styled(format!(" [{label}] {event}"), Style::default().fg(color))
}

pub fn render_events(frame: &mut Frame, area: Rect, log: &EventLog) {
    let block = Block::default().title(" Events ").borders(Borders::ALL);
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = log.latest(visible).map(event_line).collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
