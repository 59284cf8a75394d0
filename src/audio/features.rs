//! Audio feature record and mood classification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::AnalyzerConfig;

/// Five-way heuristic mood of the live audio
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    Sharp,
    Rhythmic,
    Chaotic,
    Ambient,
    Sorrowful,
}

impl SoundType {
    pub const ALL: [SoundType; 5] = [
        SoundType::Sharp,
        SoundType::Rhythmic,
        SoundType::Chaotic,
        SoundType::Ambient,
        SoundType::Sorrowful,
    ];

    /// Classify a feature tuple. Branches are checked in priority order and
    /// the first match wins, so every input maps to exactly one mood.
    pub fn classify(
        intensity: f32,
        low_freq_energy: f32,
        high_freq_energy: f32,
        rhythm_score: f32,
        config: &AnalyzerConfig,
    ) -> Self {
        if high_freq_energy > config.sharp_high_energy && intensity > config.sharp_intensity {
            SoundType::Sharp
        } else if rhythm_score > config.rhythmic_score {
            SoundType::Rhythmic
        } else if intensity > config.chaotic_intensity
            && high_freq_energy > config.chaotic_high_energy
            && low_freq_energy > config.chaotic_low_energy
        {
            SoundType::Chaotic
        } else if low_freq_energy > config.sorrowful_low_energy
            && intensity < config.sorrowful_intensity
        {
            SoundType::Sorrowful
        } else {
            SoundType::Ambient
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundType::Sharp => "sharp",
            SoundType::Rhythmic => "rhythmic",
            SoundType::Chaotic => "chaotic",
            SoundType::Ambient => "ambient",
            SoundType::Sorrowful => "sorrowful",
        }
    }
}

impl fmt::Display for SoundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Features extracted from one frequency-bin snapshot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Mean bin magnitude, [0, 1]
    pub intensity: f32,
    /// Mean of the lowest bins, [0, 1]
    pub low_freq_energy: f32,
    /// Mean of the highest bins, [0, 1]
    pub high_freq_energy: f32,
    /// Beat density over the intensity history, [0, 1]
    pub rhythm_score: f32,
    pub sound_type: SoundType,
}

impl Default for AudioFeatures {
    fn default() -> Self {
        Self {
            intensity: 0.0,
            low_freq_energy: 0.0,
            high_freq_energy: 0.0,
            rhythm_score: 0.0,
            sound_type: SoundType::Ambient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference predicates in priority order
    fn predicates(i: f32, lo: f32, hi: f32, r: f32) -> [(bool, SoundType); 5] {
        [
            (hi > 0.7 && i > 0.5, SoundType::Sharp),
            (r > 0.6, SoundType::Rhythmic),
            (i > 0.8 && hi > 0.5 && lo > 0.5, SoundType::Chaotic),
            (lo > 0.6 && i < 0.4, SoundType::Sorrowful),
            (true, SoundType::Ambient),
        ]
    }

    #[test]
    fn test_classification_follows_priority_order() {
        let config = AnalyzerConfig::default();
        let steps: Vec<f32> = (0..=10).map(|n| n as f32 / 10.0).collect();

        for &i in &steps {
            for &lo in &steps {
                for &hi in &steps {
                    for &r in &steps {
                        let got = SoundType::classify(i, lo, hi, r, &config);
                        let expected = predicates(i, lo, hi, r)
                            .iter()
                            .find(|(fires, _)| *fires)
                            .map(|(_, t)| *t)
                            .unwrap();
                        assert_eq!(got, expected, "i={i} lo={lo} hi={hi} r={r}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_sharp_beats_rhythmic() {
        let config = AnalyzerConfig::default();
        assert_eq!(
            SoundType::classify(0.9, 0.9, 0.9, 0.9, &config),
            SoundType::Sharp
        );
    }

    #[test]
    fn test_each_mood_reachable() {
        let config = AnalyzerConfig::default();
        assert_eq!(SoundType::classify(0.6, 0.0, 0.8, 0.0, &config), SoundType::Sharp);
        assert_eq!(SoundType::classify(0.3, 0.0, 0.0, 0.7, &config), SoundType::Rhythmic);
        assert_eq!(SoundType::classify(0.9, 0.6, 0.6, 0.0, &config), SoundType::Chaotic);
        assert_eq!(SoundType::classify(0.2, 0.7, 0.0, 0.0, &config), SoundType::Sorrowful);
        assert_eq!(SoundType::classify(0.5, 0.5, 0.5, 0.5, &config), SoundType::Ambient);
    }

    #[test]
    fn test_sound_type_serializes_lowercase() {
        let json = serde_json::to_string(&SoundType::Sorrowful).unwrap();
        assert_eq!(json, "\"sorrowful\"");
        for t in SoundType::ALL {
            assert_eq!(t.to_string(), t.as_str());
        }
    }
}
