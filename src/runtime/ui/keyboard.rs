//! On-screen piano showing the key layout and the sounding key

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    io::{keymap, KEY_COUNT},
    synth::semitone_frequency,
};

/// Width of one key cell in columns
const CELL: usize = 6;

fn key_style(position: usize, current: Option<usize>) -> Style {
    if current == Some(position) {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if keymap::is_black_key(position) {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Black).bg(Color::Gray)
    }
}

pub fn render_keyboard(frame: &mut Frame, area: Rect, current: Option<usize>, base_frequency: f64) {
    let block = Block::default().title(" Keyboard ").borders(Borders::ALL);

    let row = |text: &dyn Fn(usize) -> String| -> Line<'static> {
        Line::from(
            (0..KEY_COUNT)
                .map(|p| Span::styled(format!("{:^CELL$}", text(p)), key_style(p, current)))
                .collect::<Vec<_>>(),
        )
    };

    let lines = vec![
        row(&|p| keymap::key_label(p).map(String::from).unwrap_or_default()),
        row(&|p| keymap::note_name(p).to_string()),
        row(&|p| format!("{:.0}", semitone_frequency(base_frequency, p))),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
