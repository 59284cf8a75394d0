//! Noise-driven ribbons winding through the scene.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use super::{clamp_to_bounds, Animator, Topology, Vertex};
use crate::mood::MotionParameters;
use crate::noise::NoiseGenerator;
use crate::params::RibbonParams;

/// Offsets decorrelating the three noise axes
const AXIS_OFFSETS: [f32; 3] = [0.0, 17.0, 41.0];

pub struct Ribbons {
    params: RibbonParams,
    noise: NoiseGenerator,
    /// Noise time, advanced by ribbon_speed so speed changes never jump
    phase: f32,
    points: Vec<Vec3>,
    vertices: Vec<Vertex>,
}

impl Ribbons {
    pub fn new(params: RibbonParams) -> Self {
        let points_per_ribbon = params.points_per_ribbon.max(2);
        let segments = params.count * (points_per_ribbon - 1);

        Self {
            noise: NoiseGenerator::new(params.noise_seed),
            phase: 0.0,
            points: vec![Vec3::ZERO; points_per_ribbon],
            vertices: vec![Vertex::default(); segments * 2],
            params: RibbonParams {
                points_per_ribbon,
                ..params
            },
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Lissajous base curve, widest mid-ribbon
    fn base_point(&self, ribbon: usize, u: f32) -> Vec3 {
        let p = &self.params;
        let angle = u * TAU * 1.5 + ribbon as f32 * TAU / p.count as f32 + self.phase * 0.3;
        let radius = p.spread_m * (0.6 + 0.4 * (u * PI).sin());
        let y = (u - 0.5) * p.spread_m * 1.2 + (angle * 2.0 + self.phase).sin() * 0.3;
        Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
    }
}

impl Animator for Ribbons {
    fn update(&mut self, _time_s: f32, dt_s: f32, motion: &MotionParameters) {
        self.phase += dt_s * motion.ribbon_speed * self.params.time_scale;

        let n = self.params.points_per_ribbon;
        let glow = motion.glow_intensity.min(2.0);
        let rgb = motion.base_color.scaled(0.5 + 0.5 * glow).clamped();

        let mut out = 0;
        for ribbon in 0..self.params.count {
            let lane = ribbon as f32 * 3.1;

            for j in 0..n {
                let u = j as f32 / (n - 1) as f32;
                let s = j as f32 * self.params.noise_frequency;
                let offset = Vec3::from_array(
                    AXIS_OFFSETS.map(|o| self.noise.sample_3d(s + o, lane, self.phase)),
                );
                let p = self.base_point(ribbon, u) + offset * self.params.noise_amplitude_m;
                self.points[j] = clamp_to_bounds(p);
            }

            // Fade toward both ends
            for j in 0..n - 1 {
                for k in [j, j + 1] {
                    let u = k as f32 / (n - 1) as f32;
                    let alpha = 0.2 + 0.8 * (u * PI).sin();
                    self.vertices[out] = Vertex {
                        position: self.points[k].to_array(),
                        color: rgb.with_alpha(alpha),
                    };
                    out += 1;
                }
            }
        }
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn topology(&self) -> Topology {
        Topology::Lines
    }

    fn name(&self) -> &'static str {
        "ribbons"
    }
}
