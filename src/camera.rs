//! Slow orbit camera around the scene.

use glam::{Mat4, Vec3};

use crate::params::{CameraOrbit, RenderConfig};

/// Camera circling the scene cube with a gentle vertical bob
pub struct CameraSystem {
    orbit: CameraOrbit,
}

impl CameraSystem {
    pub fn new(orbit: CameraOrbit) -> Self {
        Self { orbit }
    }

    /// Compute camera position and look-at target for given time
    ///
    /// # Returns
    /// Tuple of (eye_position, target_position)
    pub fn compute_position_and_target(&self, time_s: f32) -> (Vec3, Vec3) {
        let p = &self.orbit;
        let target = Vec3::from_array(p.target);

        let angle = time_s * p.speed_rad_per_s;
        let bob = (time_s * p.bob_freq_hz * std::f32::consts::TAU).sin() * p.bob_amplitude_m;

        let eye = target + Vec3::new(angle.sin() * p.radius_m, p.height_m + bob, angle.cos() * p.radius_m);

        (eye, target)
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(
        &self,
        time_s: f32,
        render_config: &RenderConfig,
    ) -> (Mat4, Vec3) {
        let (eye, target) = self.compute_position_and_target(time_s);

        // Camera never rolls
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            render_config.fov_degrees.to_radians(),
            render_config.aspect_ratio(),
            render_config.near_plane_m,
            render_config.far_plane_m,
        );

        (proj * view, eye)
    }
}
