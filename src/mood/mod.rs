//! Mood → motion mapping.
//!
//! A stateless lookup from the classified mood to animation parameters,
//! optionally adjusted by the generated phrase's keywords and sentiment.

mod color;
mod hint;
mod keywords;
mod motion;
pub mod sentiment;

// Re-export public types
pub use color::{ColorParseError, Rgb};
pub use hint::PhraseHint;
pub use keywords::{Theme, ThemeAdjustment};
pub use motion::MotionParameters;
