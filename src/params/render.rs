//! Rendering and camera configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near_plane_m: 0.1,
            far_plane_m: 100.0, // Scene cube is only 8m across
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Slow orbit around the scene
#[derive(Debug, Clone)]
pub struct CameraOrbit {
    /// Horizontal distance from the orbit center (meters)
    pub radius_m: f32,

    /// Eye height above the orbit center (meters)
    pub height_m: f32,

    /// Angular speed (radians per second)
    pub speed_rad_per_s: f32,

    /// Vertical bob amplitude (meters)
    pub bob_amplitude_m: f32,

    /// Vertical bob frequency (Hz)
    pub bob_freq_hz: f32,

    /// Look-at target
    pub target: [f32; 3],
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self {
            radius_m: 9.0,
            height_m: 2.5,
            speed_rad_per_s: 0.06,
            bob_amplitude_m: 0.4,
            bob_freq_hz: 0.05,
            target: [0.0, 0.0, 0.0],
        }
    }
}
