//! Error types for capture, phrase generation, rendering and configuration.

use thiserror::Error;

/// Invalid parameter combinations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("FFT size must be a power of 2, got {0}")]
    FftSize(usize),

    #[error("smoothing constant must be in [0, 1), got {0}")]
    Smoothing(f32),

    #[error("decibel range is empty: min {min} >= max {max}")]
    DecibelRange { min: f32, max: f32 },

    #[error("history capacity must be > 0")]
    HistoryCapacity,

    #[error("invalid value for {name}: {value}")]
    Env { name: &'static str, value: String },
}

/// Microphone capture failures
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("invalid capture config: {0}")]
    Config(#[from] ConfigError),

    #[error("no audio input device found")]
    NoDevice,

    #[error("no input device matching '{0}'")]
    DeviceNotFound(String),

    #[error("failed to enumerate input devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("failed to query input config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    Play(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format: {0}")]
    SampleFormat(String),
}

/// Phrase generation failures (upstream API or local service)
#[derive(Error, Debug)]
pub enum PhraseError {
    #[error("missing API credential")]
    MissingCredential,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream returned no phrase")]
    EmptyResponse,

    #[error("invalid description: {0}")]
    InvalidDescription(String),

    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// GPU setup and frame submission failures
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface error: {0}")]
    Frame(#[from] wgpu::SurfaceError),
}
