//! PCM → byte frequency bins.
//!
//! Produces the same shape of data a browser analyser node hands out: a
//! Hann-windowed FFT, temporally smoothed, converted to decibels and mapped
//! linearly onto 0-255.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::params::SpectrumConfig;

/// Reusable FFT state for one capture session
pub struct Spectrum {
    config: SpectrumConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bins: Vec<u8>,
}

impl Spectrum {
    pub fn new(config: SpectrumConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let window = (0..size).map(|i| hann_window(i, size)).collect();

        Ok(Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.bin_count()],
            bins: vec![0; config.bin_count()],
            config,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    /// Analyze the most recent `fft_size` samples (zero-padded at the front
    /// when fewer are available) and return the byte bins.
    pub fn process(&mut self, samples: &[f32]) -> &[u8] {
        let size = self.config.fft_size;
        let tail = &samples[samples.len().saturating_sub(size)..];
        let pad = size - tail.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { tail[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing_time_constant;
        let min_db = self.config.min_decibels;
        let range_db = self.config.max_decibels - min_db;

        for (k, (smoothed, bin)) in self
            .smoothed
            .iter_mut()
            .zip(self.bins.iter_mut())
            .enumerate()
        {
            let magnitude = self.buffer[k].norm() / size as f32;
            *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
            *bin = to_byte(*smoothed, min_db, range_db);
        }

        &self.bins
    }

    /// Drop smoothing state (capture restarted)
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.bins.fill(0);
    }
}

/// Linear magnitude → byte via the decibel window
fn to_byte(magnitude: f32, min_db: f32, range_db: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - min_db) / range_db;
    scaled.clamp(0.0, 255.0) as u8
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
