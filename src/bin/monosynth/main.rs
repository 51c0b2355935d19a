//! monosynth - play the synth from the terminal keyboard
//!
//! Run with: cargo run -- [bell|harmonica]
//! Logs are appended to `monosynth.log` in the temp directory (override with
//! MONOSYNTH_LOG); set RUST_LOG=monosynth=debug to see note events.

use monosynth::{
    runtime::{default_log_path, open_log, Monosynth},
    synth::InstrumentKind,
};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let instrument = match std::env::args().nth(1) {
        Some(name) => name.parse::<InstrumentKind>()?,
        None => InstrumentKind::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(open_log(&default_log_path())?)
        .with_ansi(false)
        .init();

    Monosynth::new().instrument(instrument).run()
}
