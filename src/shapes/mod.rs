//! Audio-reactive shapes with procedural per-frame animation.
//!
//! Every shape owns a fixed-size vertex buffer created once and mutated in
//! place each frame. Shapes never interact with each other.

mod liquid;
mod ribbons;
mod swarm;
mod web;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::mood::MotionParameters;
use crate::params::scene_constants::HALF_EXTENT_M;

// Re-export public types
pub use liquid::LiquidSurface;
pub use ribbons::Ribbons;
pub use swarm::Swarm;
pub use web::Web;

/// Vertex data shared by all shapes (position + RGBA color)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// How a shape's vertices are assembled into primitives
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Consecutive vertex pairs are segments
    Lines,
    /// Indexed triangles
    Triangles,
}

/// Per-frame update routine for one shape
pub trait Animator {
    /// Advance the animation to `time_s` (seconds since start; `dt_s` since last frame)
    fn update(&mut self, time_s: f32, dt_s: f32, motion: &MotionParameters);

    fn vertices(&self) -> &[Vertex];

    /// Triangle indices (empty for line shapes)
    fn indices(&self) -> &[u32] {
        &[]
    }

    fn topology(&self) -> Topology;

    fn name(&self) -> &'static str;
}

/// Clamp a point to the scene cube
pub fn clamp_to_bounds(p: Vec3) -> Vec3 {
    p.clamp(Vec3::splat(-HALF_EXTENT_M), Vec3::splat(HALF_EXTENT_M))
}

/// True when every vertex lies inside the scene cube
pub fn within_bounds(vertices: &[Vertex]) -> bool {
    vertices
        .iter()
        .all(|v| v.position.iter().all(|c| c.abs() <= HALF_EXTENT_M))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_bounds() {
        let p = clamp_to_bounds(Vec3::new(10.0, -10.0, 1.0));
        assert_eq!(p, Vec3::new(HALF_EXTENT_M, -HALF_EXTENT_M, 1.0));
    }

    #[test]
    fn test_vertex_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 7 * 4);
    }
}
