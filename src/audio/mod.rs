//! Microphone capture and mood analysis.
//!
//! Combines real-time FFT analysis of live input with a heuristic
//! classifier that tags the audio with one of five moods.

mod analyzer;
mod capture;
mod features;
mod spectrum;

// Re-export public types
pub use analyzer::AudioAnalyzer;
pub use capture::{MicCapture, SharedFeatures};
pub use features::{AudioFeatures, SoundType};
pub use spectrum::{hann_window, Spectrum};
