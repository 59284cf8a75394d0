//! Frequency-bin feature extraction with a bounded intensity history.

use std::collections::VecDeque;

use super::features::{AudioFeatures, SoundType};
use crate::params::AnalyzerConfig;

/// Stateful analyzer: one instance per capture session
#[derive(Debug, Clone)]
pub struct AudioAnalyzer {
    config: AnalyzerConfig,
    history: VecDeque<f32>,
}

impl AudioAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        let history = VecDeque::with_capacity(config.history_capacity);
        Self { config, history }
    }

    /// Extract features from one snapshot of byte frequency bins (0-255)
    pub fn analyze(&mut self, bins: &[u8]) -> AudioFeatures {
        let intensity = mean_normalized(bins);

        let edge = self.config.edge_bins.min(bins.len());
        let low_freq_energy = mean_normalized(&bins[..edge]);
        let high_freq_energy = mean_normalized(&bins[bins.len() - edge..]);

        self.push_intensity(intensity);
        let rhythm_score = self.rhythm_score();

        let sound_type = SoundType::classify(
            intensity,
            low_freq_energy,
            high_freq_energy,
            rhythm_score,
            &self.config,
        );

        AudioFeatures {
            intensity,
            low_freq_energy,
            high_freq_energy,
            rhythm_score,
            sound_type,
        }
    }

    /// Beat density: local maxima above the peak threshold, per half history length
    pub fn rhythm_score(&self) -> f32 {
        rhythm_score(
            &self.history,
            self.config.min_rhythm_history,
            self.config.peak_threshold,
        )
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Forget all history (capture stopped)
    pub fn reset(&mut self) {
        self.history.clear();
    }

    fn push_intensity(&mut self, intensity: f32) {
        if self.history.len() == self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(intensity);
    }
}

fn mean_normalized(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32 / 255.0
}

fn rhythm_score(history: &VecDeque<f32>, min_len: usize, threshold: f32) -> f32 {
    // Need at least 3 samples for a local maximum regardless of config
    if history.len() < min_len.max(3) {
        return 0.0;
    }

    let peaks = (1..history.len() - 1)
        .filter(|&i| {
            let v = history[i];
            v > threshold && v > history[i - 1] && v > history[i + 1]
        })
        .count();

    let half = history.len() as f32 / 2.0;
    (peaks as f32 / half).clamp(0.0, 1.0)
}
