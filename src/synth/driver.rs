use std::fmt;

use crate::io::{KeySource, KEY_COUNT};

use super::{message::NoteTarget, pitch::SharedPitch};

/// A3: pitch of key position 0 unless configured otherwise.
pub const BASE_FREQUENCY: f64 = 220.0;

/// Equal-tempered pitch `semitones` above `base_hz`: `base * 2^(k/12)`.
#[inline]
pub fn semitone_frequency(base_hz: f64, semitones: usize) -> f64 {
    base_hz * 2.0_f64.powf(semitones as f64 / 12.0)
}

/// What the driver did on a poll, for the status display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoteEvent {
    On { key: usize, time: f64, frequency: f64 },
    Off { key: usize, time: f64 },
}

impl fmt::Display for NoteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteEvent::On { time, frequency, .. } => {
                write!(f, "Note On : {time:.3}s {frequency:.2}Hz")
            }
            NoteEvent::Off { time, .. } => write!(f, "Note Off: {time:.3}s"),
        }
    }
}

/// Turns key-state edges into pitch updates and envelope triggers.
///
/// Monophonic with last-note priority: a newly pressed key always takes
/// over; while the current key stays down, other held keys are ignored; if
/// the current key is lifted while others remain down, the highest of them
/// takes over.
pub struct NoteDriver {
    base_frequency: f64,
    current: Option<usize>,
    held: [bool; KEY_COUNT],
}

impl NoteDriver {
    pub fn new(base_frequency: f64) -> Self {
        Self {
            base_frequency,
            current: None,
            held: [false; KEY_COUNT],
        }
    }

    /// Sample the keys once at audio time `now`.
    ///
    /// On a new note the pitch is written before the trigger is sent, so the
    /// audio thread never starts an attack at the previous note's pitch.
    pub fn poll<K, T>(&mut self, keys: &K, now: f64, pitch: &SharedPitch, target: &mut T) -> Option<NoteEvent>
    where
        K: KeySource + ?Sized,
        T: NoteTarget + ?Sized,
    {
        let mut newest = None;
        let mut highest_down = None;
        let mut current_down = false;

        for key in 0..KEY_COUNT {
            let down = keys.is_down(key);
            if down {
                if !self.held[key] {
                    newest = Some(key);
                }
                if self.current == Some(key) {
                    current_down = true;
                }
                highest_down = Some(key);
            }
            self.held[key] = down;
        }

        let next = match newest {
            Some(key) => Some(key),
            None if current_down => self.current,
            None => highest_down,
        };

        match (self.current, next) {
            (current, Some(key)) if current != Some(key) => {
                let frequency = self.frequency(key);
                pitch.set(frequency);
                target.note_on(now);
                self.current = Some(key);
                tracing::debug!(key, time = now, frequency, "note on");
                Some(NoteEvent::On {
                    key,
                    time: now,
                    frequency,
                })
            }
            (Some(key), None) => {
                target.note_off(now);
                self.current = None;
                tracing::debug!(key, time = now, "note off");
                Some(NoteEvent::Off { key, time: now })
            }
            _ => None,
        }
    }

    /// Pitch of key `position` for this driver's base note.
    pub fn frequency(&self, position: usize) -> f64 {
        semitone_frequency(self.base_frequency, position)
    }

    pub fn current_key(&self) -> Option<usize> {
        self.current
    }

    pub fn base_frequency(&self) -> f64 {
        self.base_frequency
    }
}

impl Default for NoteDriver {
    fn default() -> Self {
        Self::new(BASE_FREQUENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records triggers instead of forwarding them.
    #[derive(Default)]
    struct Triggers(Vec<(bool, f64)>);

    impl NoteTarget for Triggers {
        fn note_on(&mut self, time: f64) {
            self.0.push((true, time));
        }

        fn note_off(&mut self, time: f64) {
            self.0.push((false, time));
        }
    }

    fn keys(down: &[usize]) -> [bool; KEY_COUNT] {
        let mut state = [false; KEY_COUNT];
        for &k in down {
            state[k] = true;
        }
        state
    }

    #[test]
    fn equal_temperament_from_a3() {
        assert_eq!(semitone_frequency(BASE_FREQUENCY, 0), 220.0);
        assert!((semitone_frequency(BASE_FREQUENCY, 12) - 440.0).abs() < 1e-9);
        assert!((semitone_frequency(BASE_FREQUENCY, 3) - 261.625_565_300_598_6).abs() < 1e-9);
        for k in 0..KEY_COUNT {
            let expected = 220.0 * 2.0_f64.powf(k as f64 / 12.0);
            assert!((semitone_frequency(BASE_FREQUENCY, k) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn press_and_release_trigger_once() {
        let mut driver = NoteDriver::default();
        let pitch = SharedPitch::default();
        let mut target = Triggers::default();

        let on = driver.poll(&keys(&[12]), 0.5, &pitch, &mut target);
        assert!(matches!(on, Some(NoteEvent::On { key: 12, .. })));
        assert!((pitch.get() - 440.0).abs() < 1e-9);

        // Holding the key does nothing further.
        for n in 0..5 {
            assert_eq!(driver.poll(&keys(&[12]), 0.6 + n as f64, &pitch, &mut target), None);
        }

        let off = driver.poll(&keys(&[]), 7.0, &pitch, &mut target);
        assert_eq!(off, Some(NoteEvent::Off { key: 12, time: 7.0 }));
        assert_eq!(target.0, [(true, 0.5), (false, 7.0)]);
        assert_eq!(driver.current_key(), None);

        // Nothing held and nothing playing.
        assert_eq!(driver.poll(&keys(&[]), 8.0, &pitch, &mut target), None);
    }

    #[test]
    fn new_key_takes_over_without_note_off() {
        let mut driver = NoteDriver::default();
        let pitch = SharedPitch::default();
        let mut target = Triggers::default();

        driver.poll(&keys(&[0]), 0.0, &pitch, &mut target);
        driver.poll(&keys(&[0, 7]), 0.1, &pitch, &mut target);
        assert_eq!(driver.current_key(), Some(7));
        assert!((pitch.get() - semitone_frequency(220.0, 7)).abs() < 1e-9);
        assert_eq!(target.0, [(true, 0.0), (true, 0.1)]);
    }

    #[test]
    fn chords_do_not_flap() {
        let mut driver = NoteDriver::default();
        let pitch = SharedPitch::default();
        let mut target = Triggers::default();

        driver.poll(&keys(&[2, 5]), 0.0, &pitch, &mut target);
        assert_eq!(driver.current_key(), Some(5));
        for n in 1..10 {
            assert_eq!(driver.poll(&keys(&[2, 5]), n as f64 * 0.01, &pitch, &mut target), None);
        }
        assert_eq!(target.0.len(), 1);
    }

    #[test]
    fn falls_back_to_a_still_held_key() {
        let mut driver = NoteDriver::default();
        let pitch = SharedPitch::default();
        let mut target = Triggers::default();

        driver.poll(&keys(&[3]), 0.0, &pitch, &mut target);
        driver.poll(&keys(&[3, 9]), 0.1, &pitch, &mut target);
        let event = driver.poll(&keys(&[3]), 0.2, &pitch, &mut target);
        assert!(matches!(event, Some(NoteEvent::On { key: 3, .. })));
        assert!((pitch.get() - semitone_frequency(220.0, 3)).abs() < 1e-9);
    }

    #[test]
    fn status_lines_read_like_a_console() {
        let on = NoteEvent::On {
            key: 12,
            time: 1.5,
            frequency: 440.0,
        };
        assert_eq!(on.to_string(), "Note On : 1.500s 440.00Hz");
        assert_eq!(NoteEvent::Off { key: 12, time: 2.25 }.to_string(), "Note Off: 2.250s");
    }
}
