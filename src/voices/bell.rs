//! Bell voice - struck, ringing tone that dies away.
//!
//! # How It Works
//!
//! 1. Three sine partials at 2x, 3x and 4x the played pitch (weights 1, 1/2,
//!    1/4). Skipping the fundamental gives the bright, slightly hollow ring
//! 2. The lowest partial shimmers with a 5 Hz vibrato
//! 3. Fast attack (10ms) for the strike
//! 4. Long decay (1s) to zero sustain: the bell fades even while held
//! 5. Long release (1s), though with zero sustain it starts from silence
//!
//! # Variations
//!
//! - Inharmonic ratios (2.76, 5.4) = more metallic, tubular bell
//! - Shorter decay (0.3s) = glockenspiel
//! - Add a 1x partial = rounder, more like a tuned chime

use crate::{
    dsp::{EnvelopeShape, Waveform},
    patch::{Partial, Recipe},
};

use super::SHIMMER;

/// Create a bell recipe.
pub fn bell() -> Recipe {
    Recipe::new("bell", EnvelopeShape::new(0.01, 1.0, 1.0, 1.0, 0.0))
        .partial(Partial::new(Waveform::Sine, 2.0, 1.0).with_vibrato(SHIMMER))
        .partial(Partial::new(Waveform::Sine, 3.0, 0.5))
        .partial(Partial::new(Waveform::Sine, 4.0, 0.25))
}
