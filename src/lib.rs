//! Echoscape library - Audio-reactive mood visualization

pub mod audio;
pub mod camera;
pub mod error;
pub mod mood;
pub mod noise;
pub mod params;
pub mod phrase;
pub mod rendering;
pub mod scene;
pub mod shapes;
