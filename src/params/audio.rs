//! Audio capture, spectrum and mood classifier configuration.

use crate::error::ConfigError;

/// Spectrum analysis configuration (PCM → byte frequency bins)
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    /// FFT window size (must be power of 2); yields fft_size / 2 bins
    pub fft_size: usize,

    /// Temporal smoothing between frames, 0.0 = none
    /// Formula: smoothed = tau * previous + (1 - tau) * current
    pub smoothing_time_constant: f32,

    /// Magnitude (dB) mapped to bin value 0
    pub min_decibels: f32,

    /// Magnitude (dB) mapped to bin value 255
    pub max_decibels: f32,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            fft_size: 256, // 128 bins
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl SpectrumConfig {
    /// Number of frequency bins produced per frame
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 2 {
            return Err(ConfigError::FftSize(self.fft_size));
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(ConfigError::Smoothing(self.smoothing_time_constant));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(ConfigError::DecibelRange {
                min: self.min_decibels,
                max: self.max_decibels,
            });
        }
        Ok(())
    }
}

/// Thresholds for feature extraction and mood classification.
///
/// All energies are normalized to [0, 1].
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Intensity history length (samples, FIFO)
    pub history_capacity: usize,

    /// Minimum history length before a rhythm score is reported
    pub min_rhythm_history: usize,

    /// Bins averaged at each end of the spectrum for low/high energy
    pub edge_bins: usize,

    /// A local maximum must exceed this intensity to count as a beat
    pub peak_threshold: f32,

    // === Sharp: bright, loud ===
    pub sharp_high_energy: f32,
    pub sharp_intensity: f32,

    // === Rhythmic ===
    pub rhythmic_score: f32,

    // === Chaotic: loud across the whole spectrum ===
    pub chaotic_intensity: f32,
    pub chaotic_high_energy: f32,
    pub chaotic_low_energy: f32,

    // === Sorrowful: quiet, bass heavy ===
    pub sorrowful_low_energy: f32,
    pub sorrowful_intensity: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            min_rhythm_history: 10,
            edge_bins: 10,
            peak_threshold: 0.5,
            sharp_high_energy: 0.7,
            sharp_intensity: 0.5,
            rhythmic_score: 0.6,
            chaotic_intensity: 0.8,
            chaotic_high_energy: 0.5,
            chaotic_low_energy: 0.5,
            sorrowful_low_energy: 0.6,
            sorrowful_intensity: 0.4,
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::HistoryCapacity);
        }
        Ok(())
    }
}

/// Microphone capture configuration
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Case-insensitive substring of the input device name (None = default device)
    pub device_query: Option<String>,

    /// Analysis tick interval (milliseconds)
    /// 16 ≈ one analysis per display frame at 60 Hz
    pub update_interval_ms: u64,

    pub spectrum: SpectrumConfig,
    pub analyzer: AnalyzerConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_query: None,
            update_interval_ms: 16,
            spectrum: SpectrumConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.spectrum.validate()?;
        self.analyzer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spectrum_config_is_valid() {
        let config = SpectrumConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bin_count(), 128);
    }

    #[test]
    fn test_spectrum_config_rejects_bad_values() {
        let mut config = SpectrumConfig {
            fft_size: 300,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::FftSize(300)));

        config.fft_size = 512;
        config.smoothing_time_constant = 1.0;
        assert_eq!(config.validate(), Err(ConfigError::Smoothing(1.0)));

        config.smoothing_time_constant = 0.5;
        config.min_decibels = -20.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DecibelRange { .. })
        ));
    }

    #[test]
    fn test_zero_history_rejected() {
        let config = AnalyzerConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::HistoryCapacity));
    }
}
