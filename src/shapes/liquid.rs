//! Liquid surface: grid mesh deformed by flowing noise and a center ripple.

use glam::Vec3;

use super::{clamp_to_bounds, Animator, Topology, Vertex};
use crate::mood::MotionParameters;
use crate::noise::NoiseGenerator;
use crate::params::LiquidParams;

/// Liquid surface grid with procedural noise animation
pub struct LiquidSurface {
    params: LiquidParams,
    noise: NoiseGenerator,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    /// Rest XZ position per vertex
    rest: Vec<[f32; 2]>,
    /// Noise time, advanced by liquid_flow
    flow_phase: f32,
}

impl LiquidSurface {
    /// Create a flat grid centered on the origin at the rest height
    pub fn new(params: LiquidParams) -> Self {
        let grid_size = params.grid_size.max(1);
        let half_size = (grid_size as f32 * params.grid_spacing_m) / 2.0;

        let mut vertices = Vec::new();
        let mut rest = Vec::new();
        let mut indices = Vec::new();

        // Flat XZ plane grid
        for z in 0..=grid_size {
            for x in 0..=grid_size {
                let x_pos = x as f32 * params.grid_spacing_m - half_size;
                let z_pos = z as f32 * params.grid_spacing_m - half_size;

                rest.push([x_pos, z_pos]);
                vertices.push(Vertex {
                    position: clamp_to_bounds(Vec3::new(x_pos, params.height_m, z_pos)).to_array(),
                    color: [0.0; 4],
                });
            }
        }

        // Counter-clockwise winding
        for z in 0..grid_size {
            for x in 0..grid_size {
                let top_left = (z * (grid_size + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (grid_size + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            noise: NoiseGenerator::new(params.noise_seed),
            params: LiquidParams {
                grid_size,
                ..params
            },
            vertices,
            indices,
            rest,
            flow_phase: 0.0,
        }
    }

    pub fn flow_phase(&self) -> f32 {
        self.flow_phase
    }

    /// Surface offset from the rest height at a rest position
    ///
    /// Noise layer scales with glow; the ripple travels outward from the center.
    pub fn height_at(&self, x: f32, z: f32, time_s: f32, glow: f32) -> f32 {
        let p = &self.params;
        let n = self
            .noise
            .sample_3d(x * p.frequency, z * p.frequency, self.flow_phase);
        let r = (x * x + z * z).sqrt();
        let ripple = (r * p.ripple_wavenumber - time_s * 2.0).sin() * p.ripple_amplitude_m;
        n * p.amplitude_m * glow + ripple
    }
}

impl Animator for LiquidSurface {
    fn update(&mut self, time_s: f32, dt_s: f32, motion: &MotionParameters) {
        self.flow_phase += dt_s * motion.liquid_flow;

        let glow = motion.glow_intensity.clamp(0.0, 3.0);
        let max_offset = (self.params.amplitude_m * glow + self.params.ripple_amplitude_m).max(1e-3);
        let deep = motion.base_color.scaled(0.35);
        let crest = motion.base_color.scaled(1.0 + 0.3 * glow).clamped();

        for idx in 0..self.vertices.len() {
            let [x, z] = self.rest[idx];
            let h = self.height_at(x, z, time_s, glow);

            // Crests brighter than troughs
            let t = (0.5 + 0.5 * h / max_offset).clamp(0.0, 1.0);
            self.vertices[idx] = Vertex {
                position: clamp_to_bounds(Vec3::new(x, self.params.height_m + h, z)).to_array(),
                color: deep.lerp(crest, t).with_alpha(0.55 + 0.35 * t),
            };
        }
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn topology(&self) -> Topology {
        Topology::Triangles
    }

    fn name(&self) -> &'static str {
        "liquid"
    }
}
