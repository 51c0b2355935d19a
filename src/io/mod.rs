// Purpose - external input contracts and the computer-keyboard layout

pub mod keymap;

/// Number of playable key positions.
pub const KEY_COUNT: usize = 16;

/// Input source polled by the note driver once per control-loop iteration.
///
/// Positions are `0..KEY_COUNT`, one semitone apart, lowest first.
pub trait KeySource {
    fn is_down(&self, position: usize) -> bool;
}

impl KeySource for [bool; KEY_COUNT] {
    fn is_down(&self, position: usize) -> bool {
        self.get(position).copied().unwrap_or(false)
    }
}
