//! Harmonica voice - reedy square partials over a breathy noise floor.
//!
//! Square waves carry only odd harmonics, which gives the hollow, reedy
//! character. Stacking a fifth (1.5x) and an octave (2x) on top thickens it
//! the way a reed plate's neighbouring reeds do.
//!
//! # How It Works
//!
//! 1. Square partials at 1x, 1.5x and 2x the played pitch (weights 1, 1/2, 1/4)
//! 2. The fundamental shimmers with the same 5 Hz vibrato as the bell
//! 3. A quiet noise floor (5%) for breath
//! 4. Same envelope as the bell: 10ms attack, 1s decay to zero, 1s release
//!
//! # Variations
//!
//! - Raise sustain (0.6) = held organ-like reed
//! - More noise (0.1-0.2) = airier, more breath
//! - Triangle instead of square = softer, ocarina-like

use crate::{
    dsp::{EnvelopeShape, Waveform},
    patch::{Partial, Recipe},
};

use super::SHIMMER;

/// Create a harmonica recipe.
pub fn harmonica() -> Recipe {
    Recipe::new("harmonica", EnvelopeShape::new(0.01, 1.0, 1.0, 1.0, 0.0))
        .partial(Partial::new(Waveform::Square, 1.0, 1.0).with_vibrato(SHIMMER))
        .partial(Partial::new(Waveform::Square, 1.5, 0.5))
        .partial(Partial::new(Waveform::Square, 2.0, 0.25))
        .partial(Partial::noise(0.05))
}
