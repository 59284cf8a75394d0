//! Phrase hint: the phrase plus the color and pulse rate derived from it.

use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::keywords::Theme;
use super::sentiment;

/// Color for phrases with neither a theme nor a sentiment
const NEUTRAL_COLOR: Rgb = Rgb::new(0.60, 0.80, 0.80);
/// Color approached by strongly positive phrases
const WARM_COLOR: Rgb = Rgb::new(1.00, 0.75, 0.35);
/// Color approached by strongly negative phrases
const COOL_COLOR: Rgb = Rgb::new(0.35, 0.45, 0.90);

/// What the visualization receives alongside audio
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseHint {
    pub phrase: String,
    pub color: Rgb,
    /// Web pulse multiplier, 1.0 = neutral
    pub pulse_rate: f32,
}

impl PhraseHint {
    /// Derive color and pulse rate from the phrase text
    pub fn from_phrase(phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        let score = sentiment::score(&phrase);

        let color = match Theme::detect(&phrase) {
            Some(theme) => theme.adjustment().color,
            None if score >= 0.0 => NEUTRAL_COLOR.lerp(WARM_COLOR, score),
            None => NEUTRAL_COLOR.lerp(COOL_COLOR, -score),
        };

        // Brighter phrases pulse faster
        let pulse_rate = (1.0 + 0.5 * score).clamp(0.5, 1.5);

        Self {
            phrase,
            color,
            pulse_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_sets_color() {
        let hint = PhraseHint::from_phrase("Whispers of dawn");
        assert_eq!(hint.color, Theme::Ethereal.adjustment().color);
        assert!(hint.pulse_rate > 1.0);
    }

    #[test]
    fn test_neutral_phrase() {
        let hint = PhraseHint::from_phrase("a quiet meadow");
        assert_eq!(hint.color, NEUTRAL_COLOR);
        assert_eq!(hint.pulse_rate, 1.0);
    }

    #[test]
    fn test_negative_phrase_cools_and_slows() {
        let hint = PhraseHint::from_phrase("grief and sorrow");
        assert!((hint.color.r - COOL_COLOR.r).abs() < 1e-6);
        assert!((hint.color.b - COOL_COLOR.b).abs() < 1e-6);
        assert_eq!(hint.pulse_rate, 0.5);
    }

    #[test]
    fn test_serializes_camel_case() {
        let hint = PhraseHint::from_phrase("a quiet meadow");
        let json = serde_json::to_value(&hint).unwrap();
        assert_eq!(json["phrase"], "a quiet meadow");
        assert_eq!(json["pulseRate"], 1.0);
        assert!(json["color"].as_str().unwrap().starts_with('#'));
    }
}
