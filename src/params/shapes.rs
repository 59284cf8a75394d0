//! Geometry parameters for the animated shapes.
//!
//! World units are meters; the whole scene lives inside a cube of
//! half-extent [`scene_constants::HALF_EXTENT_M`] centered on the origin.

/// Scene-wide constants
pub mod scene_constants {
    /// Half-extent of the bounding cube every vertex is clamped to (meters)
    pub const HALF_EXTENT_M: f32 = 4.0;

    /// Upper bound on a single frame's time step (seconds)
    /// Prevents swarm blow-ups after the window was hidden or dragged
    pub const MAX_FRAME_DT_S: f32 = 0.1;
}

/// Noise-driven ribbons
#[derive(Debug, Clone)]
pub struct RibbonParams {
    /// Number of ribbons
    pub count: usize,

    /// Points per ribbon (segments = points - 1)
    pub points_per_ribbon: usize,

    /// Radius of the Lissajous base curve (meters)
    pub spread_m: f32,

    /// Spatial noise frequency along the ribbon (cycles per point)
    pub noise_frequency: f32,

    /// Noise displacement (meters)
    pub noise_amplitude_m: f32,

    /// Base animation rate (multiplied by ribbon_speed)
    pub time_scale: f32,

    /// Simplex noise seed
    pub noise_seed: u32,
}

impl Default for RibbonParams {
    fn default() -> Self {
        Self {
            count: 6,
            points_per_ribbon: 96,
            spread_m: 2.6,
            noise_frequency: 0.06,
            noise_amplitude_m: 0.9,
            time_scale: 0.35,
            noise_seed: 7,
        }
    }
}

/// Flocking dot swarm
#[derive(Debug, Clone)]
pub struct SwarmParams {
    /// Number of dots
    pub count: usize,

    /// Maximum speed at dot_swarm = 1.0 (meters per second)
    pub max_speed_m_per_s: f32,

    /// Distance within which other dots influence cohesion/alignment (meters)
    pub neighbor_radius_m: f32,

    /// Distance below which dots push apart (meters)
    pub separation_radius_m: f32,

    /// Steering weights (dimensionless)
    pub cohesion_weight: f32,
    pub alignment_weight: f32,
    pub separation_weight: f32,

    /// Tangential acceleration around the Y axis (m/s²)
    pub swirl_strength: f32,

    /// Pull toward the origin (m/s² per meter)
    pub centering_strength: f32,

    /// Half-length of each dot's cross marker (meters)
    pub dot_size_m: f32,

    /// Seed for initial positions
    pub seed: u64,
}

impl Default for SwarmParams {
    fn default() -> Self {
        Self {
            count: 180,
            max_speed_m_per_s: 1.4,
            neighbor_radius_m: 0.8,
            separation_radius_m: 0.25,
            cohesion_weight: 0.6,
            alignment_weight: 0.9,
            separation_weight: 1.6,
            swirl_strength: 0.8,
            centering_strength: 0.15,
            dot_size_m: 0.03,
            seed: 0x5eed,
        }
    }
}

/// Radial web mesh
#[derive(Debug, Clone)]
pub struct WebParams {
    /// Number of radial spokes
    pub spokes: usize,

    /// Number of concentric rings
    pub rings: usize,

    /// Outer radius at rest (meters)
    pub radius_m: f32,

    /// Relative radius oscillation (0.1 = ±10%)
    pub pulse_amplitude: f32,

    /// Phase offset between neighbouring rings (radians)
    pub ring_phase: f32,

    /// Height of the web plane (meters)
    pub height_m: f32,
}

impl Default for WebParams {
    fn default() -> Self {
        Self {
            spokes: 16,
            rings: 8,
            radius_m: 3.2,
            pulse_amplitude: 0.12,
            ring_phase: 0.6,
            height_m: 1.5,
        }
    }
}

/// Shader-deformed liquid plane
#[derive(Debug, Clone)]
pub struct LiquidParams {
    /// Grid resolution (vertices per side = grid_size + 1)
    pub grid_size: usize,

    /// Spacing between grid vertices (meters)
    pub grid_spacing_m: f32,

    /// Rest height of the plane (meters)
    pub height_m: f32,

    /// Noise wave height at glow 1.0 (meters)
    pub amplitude_m: f32,

    /// Spatial noise frequency (cycles per meter)
    pub frequency: f32,

    /// Radial ripple height (meters)
    pub ripple_amplitude_m: f32,

    /// Radial ripple wavenumber (radians per meter)
    pub ripple_wavenumber: f32,

    /// Simplex noise seed
    pub noise_seed: u32,
}

impl Default for LiquidParams {
    fn default() -> Self {
        Self {
            grid_size: 64,
            grid_spacing_m: 0.12,
            height_m: -2.0,
            amplitude_m: 0.35,
            frequency: 0.7,
            ripple_amplitude_m: 0.08,
            ripple_wavenumber: 4.0,
            noise_seed: 42,
        }
    }
}
