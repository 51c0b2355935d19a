use std::sync::atomic::{AtomicU64, Ordering};

/// The pitch currently requested by the note driver, in Hz.
///
/// Single writer (control thread), single reader (audio thread). The value is
/// stored as the bit pattern of an `f64` so every read sees a whole value;
/// relaxed ordering is enough because nothing else is published alongside it.
#[derive(Debug, Default)]
pub struct SharedPitch(AtomicU64);

impl SharedPitch {
    pub fn new(hz: f64) -> Self {
        Self(AtomicU64::new(hz.to_bits()))
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set(&self, hz: f64) {
        self.0.store(hz.to_bits(), Ordering::Relaxed);
    }
}
