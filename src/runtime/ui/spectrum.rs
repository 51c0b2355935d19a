//! Spectrum analyzer widget
//!
//! Hann-windowed FFT of the scope buffer, sampled at log-spaced frequencies,
//! plus the strongest bin so the display can confirm the played pitch.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Number of log-spaced points plotted
const SPECTRUM_POINTS: usize = 64;
/// Lowest plotted frequency in Hz
const MIN_FREQ: f64 = 20.0;
/// Floor of the magnitude axis in dB
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    sample_rate: f64,
    /// (log10 frequency, magnitude dB) per plotted point
    points: Vec<(f64, f64)>,
    peak_hz: Option<f64>,
}

impl SpectrumAnalyzer {
    /// `size` is the FFT length and must match the buffers passed to `update`.
    pub fn new(size: usize, sample_rate: f64) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(size);
        let denom = size.saturating_sub(1).max(1) as f32;
        let window = (0..size)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let mut analyzer = Self {
            fft,
            window,
            scratch: vec![Complex::new(0.0, 0.0); size],
            sample_rate,
            points: Vec::with_capacity(SPECTRUM_POINTS),
            peak_hz: None,
        };
        analyzer.points = analyzer
            .plot_frequencies()
            .map(|hz| (hz.log10(), FLOOR_DB))
            .collect();
        analyzer
    }

    fn nyquist(&self) -> f64 {
        (self.sample_rate / 2.0).max(MIN_FREQ * 2.0)
    }

    fn plot_frequencies(&self) -> impl Iterator<Item = f64> {
        let ratio = self.nyquist() / MIN_FREQ;
        (0..SPECTRUM_POINTS).map(move |i| MIN_FREQ * ratio.powf(i as f64 / (SPECTRUM_POINTS - 1) as f64))
    }

    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((bin, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *bin = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let size = self.scratch.len();
        let half = (size / 2).max(1);
        let bin_hz = self.sample_rate / size as f64;
        let power = |bin: Complex<f32>| (bin.norm_sqr() as f64).max(1e-12);

        let (peak_index, peak_power) = self.scratch[1..half]
            .iter()
            .enumerate()
            .map(|(i, &bin)| (i + 1, power(bin)))
            .fold((0, 0.0), |best, candidate| if candidate.1 > best.1 { candidate } else { best });
        self.peak_hz = (peak_power > 1e-6).then(|| peak_index as f64 * bin_hz);

        let frequencies: Vec<f64> = self.plot_frequencies().collect();
        for (point, hz) in self.points.iter_mut().zip(frequencies) {
            let index = ((hz / bin_hz).round() as usize).min(half - 1);
            *point = (hz.log10(), (10.0 * power(self.scratch[index]).log10()).max(FLOOR_DB));
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Frequency of the strongest bin, if anything above the noise floor.
    pub fn peak_hz(&self) -> Option<f64> {
        self.peak_hz
    }

    pub fn log_bounds(&self) -> [f64; 2] {
        [MIN_FREQ.log10(), self.nyquist().log10()]
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let title = match analyzer.peak_hz() {
        Some(hz) => format!(" Spectrum  peak ~{hz:.0} Hz "),
        None => " Spectrum ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(analyzer.data());

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds(analyzer.log_bounds())
                .labels(["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 40.0])
                .labels(["-100", "-30", "40"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
