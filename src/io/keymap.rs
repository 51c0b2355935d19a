/*
Computer-Keyboard Piano
=======================

Two rows of a QWERTY keyboard laid out like a piano, starting at the base
note (A3 = 220 Hz by default). The bottom row plays the white keys, the row
above it the black keys:

    |   |   |   |   |   | |   |   |   |   | |   | |   |   |   |
    |   | S |   |   | F | | G |   |   | J | | K | | L |   |   |
    |   |___|   |   |___| |___|   |   |___| |___| |___|   |   |__
    |     |     |     |     |     |     |     |     |     |     |
    |  Z  |  X  |  C  |  V  |  B  |  N  |  M  |  ,  |  .  |  /  |
    |_____|_____|_____|_____|_____|_____|_____|_____|_____|_____|

Position k in `LAYOUT` sounds k semitones above the base note.
*/

use super::KEY_COUNT;

/// Keys in semitone order.
pub const LAYOUT: [char; KEY_COUNT] = [
    'z', 's', 'x', 'c', 'f', 'v', 'g', 'b', 'n', 'j', 'm', 'k', ',', 'l', '.', '/',
];

/// Note names for an A-based layout, in semitone order.
const NOTE_NAMES: [&str; 12] = ["A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#"];

/// Position of a typed character in the layout, ignoring case.
pub fn position_of(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    LAYOUT.iter().position(|&k| k == key)
}

/// The character that plays `position`.
pub fn key_label(position: usize) -> Option<char> {
    LAYOUT.get(position).map(|c| c.to_ascii_uppercase())
}

/// Note name of `position` when the base note is an A.
pub fn note_name(position: usize) -> &'static str {
    NOTE_NAMES[position % NOTE_NAMES.len()]
}

/// True for positions that sit on black piano keys.
pub fn is_black_key(position: usize) -> bool {
    note_name(position).ends_with('#')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_round_trips() {
        for (position, &key) in LAYOUT.iter().enumerate() {
            assert_eq!(position_of(key), Some(position));
        }
        assert_eq!(position_of('Z'), Some(0));
        assert_eq!(position_of('/'), Some(15));
        assert_eq!(position_of('q'), None);
    }

    #[test]
    fn black_keys_match_the_diagram() {
        let black: Vec<char> = (0..KEY_COUNT)
            .filter(|&p| is_black_key(p))
            .filter_map(key_label)
            .collect();
        assert_eq!(black, ['S', 'F', 'G', 'J', 'K', 'L']);
    }

    #[test]
    fn names_wrap_at_the_octave() {
        assert_eq!(note_name(0), "A");
        assert_eq!(note_name(3), "C");
        assert_eq!(note_name(12), "A");
        assert_eq!(note_name(15), "C");
    }
}
