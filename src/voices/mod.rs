//! Pre-built instrument recipes.
//!
//! Each function returns a ready-to-use [`Recipe`](crate::patch::Recipe). Use
//! these as starting points for your own sounds, or study them to learn how
//! different timbres are built from a handful of partials.
//!
//! # Example
//!
//! ```
//! use monosynth::{synth::Instrument, voices};
//!
//! let bell = Instrument::from_recipe(voices::bell());
//! let harmonica = Instrument::from_recipe(voices::harmonica());
//! assert_eq!(bell.name(), "bell");
//! assert_eq!(harmonica.name(), "harmonica");
//! ```

use crate::dsp::Vibrato;

mod bell;
mod harmonica;

pub use bell::bell;
pub use harmonica::harmonica;

/// Gentle shimmer carried by the lowest partial of the stock voices.
pub const SHIMMER: Vibrato = Vibrato::new(5.0, 0.001);
