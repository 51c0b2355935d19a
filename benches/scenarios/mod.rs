//! Scenario benchmarks: complete instruments rendered the way the audio
//! callback renders them.

mod voices;

pub use voices::bench_voices;
