//! Thematic keyword scan of the generated phrase.

use super::color::Rgb;

/// Imagery theme detected in a phrase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Ethereal,
    Dark,
    Fiery,
    Aquatic,
    Stormy,
}

/// Multiplicative motion adjustment for a theme
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeAdjustment {
    /// Applied to ribbon speed and dot swarm
    pub speed_scale: f32,
    /// Applied to web pulse
    pub pulse_scale: f32,
    /// Applied to liquid flow
    pub flow_scale: f32,
    /// Replaces the mood color
    pub color: Rgb,
}

impl Theme {
    /// Scan order; the first theme with a matching keyword wins
    pub const ALL: [Theme; 5] = [
        Theme::Ethereal,
        Theme::Dark,
        Theme::Fiery,
        Theme::Aquatic,
        Theme::Stormy,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Theme::Ethereal => &["ethereal", "whisper", "mist", "dream"],
            Theme::Dark => &["dark", "shadow", "abyss", "night"],
            Theme::Fiery => &["fire", "flame", "blaze", "ember"],
            Theme::Aquatic => &["ocean", "wave", "tide", "rain"],
            Theme::Stormy => &["storm", "thunder", "wind", "roar"],
        }
    }

    pub fn adjustment(&self) -> ThemeAdjustment {
        match self {
            Theme::Ethereal => ThemeAdjustment {
                speed_scale: 0.7,
                pulse_scale: 0.8,
                flow_scale: 0.9,
                color: Rgb::new(0.80, 0.75, 1.00),
            },
            Theme::Dark => ThemeAdjustment {
                speed_scale: 0.8,
                pulse_scale: 1.2,
                flow_scale: 0.8,
                color: Rgb::new(0.30, 0.15, 0.45),
            },
            Theme::Fiery => ThemeAdjustment {
                speed_scale: 1.5,
                pulse_scale: 1.3,
                flow_scale: 1.1,
                color: Rgb::new(1.00, 0.45, 0.10),
            },
            Theme::Aquatic => ThemeAdjustment {
                speed_scale: 1.0,
                pulse_scale: 0.9,
                flow_scale: 1.5,
                color: Rgb::new(0.15, 0.60, 0.95),
            },
            Theme::Stormy => ThemeAdjustment {
                speed_scale: 1.8,
                pulse_scale: 1.5,
                flow_scale: 1.3,
                color: Rgb::new(0.75, 0.85, 1.00),
            },
        }
    }

    /// Case-insensitive substring scan
    pub fn detect(text: &str) -> Option<Theme> {
        let lower = text.to_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.keywords().iter().any(|k| lower.contains(k)))
    }
}
