//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (meters, seconds, Hz, etc.)
//! - Documented ranges and meanings
//! - Type safety where possible

mod audio;
mod render;
mod server;
mod shapes;

// Re-export all types
pub use audio::{AnalyzerConfig, CaptureConfig, SpectrumConfig};
pub use render::{CameraOrbit, RenderConfig};
pub use server::{ServerConfig, API_BASE_VAR, API_KEY_VAR, MODEL_VAR, TIMEOUT_VAR};
pub use shapes::{scene_constants, LiquidParams, RibbonParams, SwarmParams, WebParams};
