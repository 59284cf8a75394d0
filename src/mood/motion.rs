//! Mood → motion parameter table.

use super::color::Rgb;
use super::hint::PhraseHint;
use super::keywords::Theme;
use super::sentiment;
use crate::audio::{AudioFeatures, SoundType};

/// Sentiment → glow gain (glow *= 1 + GAIN * score)
const SENTIMENT_GLOW_GAIN: f32 = 0.3;

/// Hint color weight when no keyword theme overrides the mood color
const HINT_COLOR_WEIGHT: f32 = 0.5;

/// Animation parameters consumed by every shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParameters {
    /// Ribbon noise advance rate (dimensionless multiplier)
    pub ribbon_speed: f32,
    /// Swarm agitation: scales dot max speed and swirl
    pub dot_swarm: f32,
    /// Web pulse rate (Hz)
    pub web_pulse: f32,
    /// Liquid surface noise advance rate
    pub liquid_flow: f32,
    pub base_color: Rgb,
    /// Glow and wave-height gain
    pub glow_intensity: f32,
}

impl MotionParameters {
    /// Parameters while the microphone is off
    pub fn idle() -> Self {
        Self {
            ribbon_speed: 0.3,
            dot_swarm: 0.2,
            web_pulse: 0.3,
            liquid_flow: 0.4,
            base_color: Rgb::new(0.45, 0.50, 0.60),
            glow_intensity: 0.3,
        }
    }

    /// Table lookup keyed by mood, scaled by the live features
    pub fn from_features(f: &AudioFeatures) -> Self {
        let i = f.intensity;
        let lo = f.low_freq_energy;
        let hi = f.high_freq_energy;
        let r = f.rhythm_score;

        match f.sound_type {
            SoundType::Sharp => Self {
                ribbon_speed: 1.5 + i * 2.0,
                dot_swarm: 1.2 * i + hi,
                web_pulse: 2.0 + hi * 2.0,
                liquid_flow: 0.8 + i,
                base_color: Rgb::new(1.00, 0.92, 0.55),
                glow_intensity: 1.2 + hi,
            },
            SoundType::Rhythmic => Self {
                ribbon_speed: 1.0 + r * 1.5,
                dot_swarm: 0.8 + r * 1.5,
                web_pulse: 1.0 + r * 3.0,
                liquid_flow: 1.0 + r,
                base_color: Rgb::new(0.85, 0.25, 0.90),
                glow_intensity: 0.8 + r * 0.6,
            },
            SoundType::Chaotic => Self {
                ribbon_speed: 1.0 + i * 2.5,
                dot_swarm: i * 3.0,
                web_pulse: 1.0 + i * 2.5,
                liquid_flow: i * 2.0,
                base_color: Rgb::new(1.00, 0.35, 0.15),
                glow_intensity: 0.5 + i * 1.5,
            },
            SoundType::Ambient => Self {
                ribbon_speed: 0.5 + i * 0.5,
                dot_swarm: 0.4 + i * 0.4,
                web_pulse: 0.5 + i * 0.3,
                liquid_flow: 0.6 + i * 0.4,
                base_color: Rgb::new(0.30, 0.80, 0.75),
                glow_intensity: 0.6 + i * 0.4,
            },
            SoundType::Sorrowful => Self {
                ribbon_speed: 0.25 + i * 0.25,
                dot_swarm: 0.15 + i * 0.2,
                web_pulse: 0.3,
                liquid_flow: 0.4 + lo * 0.6,
                base_color: Rgb::new(0.25, 0.35, 0.85),
                glow_intensity: 0.35 + lo * 0.3,
            },
        }
    }

    /// Features if listening, idle otherwise
    pub fn from_optional(features: Option<&AudioFeatures>) -> Self {
        features.map_or_else(Self::idle, Self::from_features)
    }

    /// Apply the phrase: keyword theme scaling and color override, server
    /// pulse rate, and sentiment glow.
    pub fn with_hint(mut self, hint: &PhraseHint) -> Self {
        match Theme::detect(&hint.phrase) {
            Some(theme) => {
                let adj = theme.adjustment();
                self.ribbon_speed *= adj.speed_scale;
                self.dot_swarm *= adj.speed_scale;
                self.web_pulse *= adj.pulse_scale;
                self.liquid_flow *= adj.flow_scale;
                self.base_color = adj.color;
            }
            None => {
                self.base_color = self.base_color.lerp(hint.color, HINT_COLOR_WEIGHT);
            }
        }

        self.web_pulse *= hint.pulse_rate.max(0.0);

        let score = sentiment::score(&hint.phrase);
        self.glow_intensity *= (1.0 + SENTIMENT_GLOW_GAIN * score).max(0.0);

        self.sanitized()
    }

    /// Floor every rate at zero and clamp the color
    pub fn sanitized(self) -> Self {
        Self {
            ribbon_speed: self.ribbon_speed.max(0.0),
            dot_swarm: self.dot_swarm.max(0.0),
            web_pulse: self.web_pulse.max(0.0),
            liquid_flow: self.liquid_flow.max(0.0),
            base_color: self.base_color.clamped(),
            glow_intensity: self.glow_intensity.max(0.0),
        }
    }

    fn components(&self) -> [f32; 8] {
        [
            self.ribbon_speed,
            self.dot_swarm,
            self.web_pulse,
            self.liquid_flow,
            self.base_color.r,
            self.base_color.g,
            self.base_color.b,
            self.glow_intensity,
        ]
    }

    pub fn is_non_negative(&self) -> bool {
        self.components().iter().all(|&c| c >= 0.0)
    }
}

impl Default for MotionParameters {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(sound_type: SoundType, level: f32) -> AudioFeatures {
        AudioFeatures {
            intensity: level,
            low_freq_energy: level,
            high_freq_energy: level,
            rhythm_score: level,
            sound_type,
        }
    }

    #[test]
    fn test_non_negative_for_non_negative_inputs() {
        let steps: Vec<f32> = (0..=10).map(|n| n as f32 / 10.0).collect();
        for sound_type in SoundType::ALL {
            for &i in &steps {
                for &x in &steps {
                    let f = AudioFeatures {
                        intensity: i,
                        low_freq_energy: x,
                        high_freq_energy: 1.0 - x,
                        rhythm_score: x,
                        sound_type,
                    };
                    let m = MotionParameters::from_features(&f);
                    assert!(m.is_non_negative(), "{sound_type} i={i} x={x}: {m:?}");
                }
            }
        }
        assert!(MotionParameters::idle().is_non_negative());
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let f = features(SoundType::Rhythmic, 0.4);
        assert_eq!(
            MotionParameters::from_features(&f),
            MotionParameters::from_features(&f)
        );
    }

    #[test]
    fn test_energetic_moods_move_faster_than_sorrowful() {
        let sorrowful = MotionParameters::from_features(&features(SoundType::Sorrowful, 0.5));
        for t in [SoundType::Sharp, SoundType::Rhythmic, SoundType::Chaotic] {
            let m = MotionParameters::from_features(&features(t, 0.5));
            assert!(m.ribbon_speed > sorrowful.ribbon_speed, "{t}");
            assert!(m.dot_swarm > sorrowful.dot_swarm, "{t}");
        }
    }

    #[test]
    fn test_no_features_is_idle() {
        assert_eq!(MotionParameters::from_optional(None), MotionParameters::idle());
    }

    #[test]
    fn test_theme_keyword_overrides_color_and_scales_speed() {
        let base = MotionParameters::from_features(&features(SoundType::Ambient, 0.5));
        let hint = PhraseHint {
            phrase: "Ethereal lights".to_string(),
            color: Rgb::new(0.0, 0.0, 0.0),
            pulse_rate: 1.0,
        };
        let m = base.with_hint(&hint);

        let adj = Theme::Ethereal.adjustment();
        assert_eq!(m.base_color, adj.color);
        assert!((m.ribbon_speed - base.ribbon_speed * adj.speed_scale).abs() < 1e-6);
        assert!((m.web_pulse - base.web_pulse * adj.pulse_scale).abs() < 1e-6);
    }

    #[test]
    fn test_hint_color_blends_without_theme() {
        let base = MotionParameters::idle();
        let hint = PhraseHint {
            phrase: "quiet meadow".to_string(),
            color: Rgb::new(1.0, 1.0, 1.0),
            pulse_rate: 2.0,
        };
        let m = base.with_hint(&hint);

        assert!((m.base_color.r - (base.base_color.r + 1.0) / 2.0).abs() < 1e-6);
        assert!((m.web_pulse - base.web_pulse * 2.0).abs() < 1e-6);
        // Neutral phrase leaves glow alone
        assert!((m.glow_intensity - base.glow_intensity).abs() < 1e-6);
    }

    #[test]
    fn test_sentiment_scales_glow() {
        let base = MotionParameters::idle();
        let warm = base.with_hint(&PhraseHint {
            phrase: "love and joy".to_string(),
            color: base.base_color,
            pulse_rate: 1.0,
        });
        let sad = base.with_hint(&PhraseHint {
            phrase: "grief and pain".to_string(),
            color: base.base_color,
            pulse_rate: 1.0,
        });
        assert!(warm.glow_intensity > base.glow_intensity);
        assert!(sad.glow_intensity < base.glow_intensity);
        assert!(sad.is_non_negative());
    }

    #[test]
    fn test_negative_pulse_rate_floored() {
        let m = MotionParameters::idle().with_hint(&PhraseHint {
            phrase: String::new(),
            color: Rgb::new(0.5, 0.5, 0.5),
            pulse_rate: -3.0,
        });
        assert!(m.is_non_negative());
    }
}
