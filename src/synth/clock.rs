use std::sync::atomic::{AtomicU64, Ordering};

/// Audio-time clock: frames rendered so far divided by the sample rate.
///
/// The audio thread advances it once per rendered frame; the control thread
/// reads it to timestamp note triggers in the same timebase the envelope sees.
#[derive(Debug)]
pub struct AudioClock {
    frames: AtomicU64,
    sample_rate: f64,
}

impl AudioClock {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Elapsed audio time in seconds.
    pub fn now(&self) -> f64 {
        self.time_of(self.frames())
    }

    /// Time in seconds of frame number `frame`.
    #[inline]
    pub fn time_of(&self, frame: u64) -> f64 {
        frame as f64 / self.sample_rate
    }

    /// Publish the number of frames rendered so far. Audio thread only.
    #[inline]
    pub(crate) fn publish(&self, frames: u64) {
        self.frames.store(frames, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_frames_to_seconds() {
        let clock = AudioClock::new(44_100.0);
        assert_eq!(clock.now(), 0.0);
        clock.publish(44_100);
        assert_eq!(clock.now(), 1.0);
        assert_eq!(clock.time_of(22_050), 0.5);
    }
}
