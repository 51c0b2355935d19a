//! Terminal keyboard as a [`KeySource`].
//!
//! Terminals report key presses, but only some (kitty protocol and friends)
//! report releases. With release events available a key is down from its
//! press to its release. Without them, a key counts as down while press or
//! auto-repeat events keep arriving, and is considered lifted once none has
//! been seen for `HOLD_TIMEOUT`.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::io::{keymap, KeySource, KEY_COUNT};

/// Longer than the usual auto-repeat delay so a held key is not dropped
/// before its first repeat arrives.
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(600);

pub struct TerminalKeys {
    last_seen: [Option<Instant>; KEY_COUNT],
    release_events: bool,
}

impl TerminalKeys {
    pub fn new(release_events: bool) -> Self {
        Self {
            last_seen: [None; KEY_COUNT],
            release_events,
        }
    }

    /// Feed one terminal key event. Returns true if it was a layout key.
    pub fn handle(&mut self, event: KeyEvent, now: Instant) -> bool {
        let KeyCode::Char(c) = event.code else {
            return false;
        };
        let Some(position) = keymap::position_of(c) else {
            return false;
        };

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.last_seen[position] = Some(now),
            KeyEventKind::Release => self.last_seen[position] = None,
        }
        true
    }

    /// Lift keys whose repeats have stopped. No-op when the terminal
    /// reports releases.
    pub fn expire(&mut self, now: Instant) {
        if self.release_events {
            return;
        }
        for slot in self.last_seen.iter_mut() {
            if matches!(slot, Some(seen) if now.duration_since(*seen) > HOLD_TIMEOUT) {
                *slot = None;
            }
        }
    }

    /// Lift every key, e.g. when the terminal loses focus.
    pub fn release_all(&mut self) {
        self.last_seen = [None; KEY_COUNT];
    }

    pub fn reports_releases(&self) -> bool {
        self.release_events
    }
}

impl KeySource for TerminalKeys {
    fn is_down(&self, position: usize) -> bool {
        self.last_seen.get(position).is_some_and(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(c: char, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn release_events_lift_keys() {
        let mut keys = TerminalKeys::new(true);
        let now = Instant::now();
        assert!(keys.handle(key('x', KeyEventKind::Press), now));
        assert!(keys.is_down(2));
        assert!(keys.reports_releases());

        keys.expire(now + Duration::from_secs(5));
        assert!(keys.is_down(2), "no expiry when releases are reported");

        keys.handle(key('x', KeyEventKind::Release), now);
        assert!(!keys.is_down(2));
    }

    #[test]
    fn repeats_keep_keys_down_until_timeout() {
        let mut keys = TerminalKeys::new(false);
        let start = Instant::now();
        keys.handle(key('z', KeyEventKind::Press), start);
        keys.handle(key('z', KeyEventKind::Repeat), start + Duration::from_millis(500));

        keys.expire(start + Duration::from_millis(900));
        assert!(keys.is_down(0));

        keys.expire(start + Duration::from_millis(1_200));
        assert!(!keys.is_down(0));
    }

    #[test]
    fn ignores_keys_outside_the_layout() {
        let mut keys = TerminalKeys::new(true);
        assert!(!keys.handle(key('q', KeyEventKind::Press), Instant::now()));
        assert!((0..KEY_COUNT).all(|p| !keys.is_down(p)));
    }
}
