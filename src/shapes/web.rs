//! Radial web mesh pulsing outward ring by ring.

use glam::Vec3;
use std::f32::consts::TAU;

use super::{clamp_to_bounds, Animator, Topology, Vertex};
use crate::mood::MotionParameters;
use crate::params::WebParams;

pub struct Web {
    params: WebParams,
    /// Pulse phase (radians), advanced by web_pulse
    phase: f32,
    /// Node positions, ring-major; ring 0 is the hub
    nodes: Vec<Vec3>,
    /// Per-ring brightness for the current frame
    ring_alpha: Vec<f32>,
    vertices: Vec<Vertex>,
}

impl Web {
    pub fn new(params: WebParams) -> Self {
        let spokes = params.spokes.max(3);
        let rings = params.rings.max(1);

        Self {
            phase: 0.0,
            nodes: vec![Vec3::ZERO; (rings + 1) * spokes],
            ring_alpha: vec![0.0; rings + 1],
            // Spoke segment + ring segment per (ring, spoke)
            vertices: vec![Vertex::default(); rings * spokes * 4],
            params: WebParams {
                spokes,
                rings,
                ..params
            },
        }
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Pulsed radius of ring `k` (k = 0 is the hub)
    pub fn ring_radius(&self, k: usize) -> f32 {
        let p = &self.params;
        let rest = p.radius_m * k as f32 / p.rings as f32;
        rest * (1.0 + p.pulse_amplitude * (self.phase - k as f32 * p.ring_phase).sin())
    }

    fn node(&self, ring: usize, spoke: usize) -> Vec3 {
        self.nodes[ring * self.params.spokes + spoke % self.params.spokes]
    }
}

impl Animator for Web {
    fn update(&mut self, _time_s: f32, dt_s: f32, motion: &MotionParameters) {
        self.phase = (self.phase + dt_s * motion.web_pulse * TAU) % TAU;

        let spokes = self.params.spokes;
        let rings = self.params.rings;
        let sway = 0.1 * motion.glow_intensity.min(2.0);

        for ring in 0..=rings {
            let radius = self.ring_radius(ring);
            let wave = (self.phase - ring as f32 * self.params.ring_phase).sin();
            self.ring_alpha[ring] = 0.3 + 0.35 * (1.0 + wave);

            for spoke in 0..spokes {
                let angle = spoke as f32 / spokes as f32 * TAU;
                let y = self.params.height_m + sway * (angle * 3.0 + self.phase * 0.5).sin();
                self.nodes[ring * spokes + spoke] =
                    clamp_to_bounds(Vec3::new(angle.cos() * radius, y, angle.sin() * radius));
            }
        }

        let rgb = motion.base_color;
        let mut out = 0;
        for ring in 1..=rings {
            let color = rgb.with_alpha(self.ring_alpha[ring]);
            for spoke in 0..spokes {
                let segments = [
                    // Spoke: inner ring → this ring
                    (self.node(ring - 1, spoke), self.node(ring, spoke)),
                    // Ring edge: this spoke → next spoke
                    (self.node(ring, spoke), self.node(ring, spoke + 1)),
                ];
                for (a, b) in segments {
                    self.vertices[out] = Vertex {
                        position: a.to_array(),
                        color,
                    };
                    self.vertices[out + 1] = Vertex {
                        position: b.to_array(),
                        color,
                    };
                    out += 2;
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
        "web"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::within_bounds;

    #[test]
    fn test_vertex_count() {
        let params = WebParams::default();
        let web = Web::new(params.clone());
        assert_eq!(web.vertices().len(), params.rings * params.spokes * 4);
    }

    #[test]
    fn test_ring_radius_bounded_by_pulse_amplitude() {
        let params = WebParams::default();
        let mut web = Web::new(params.clone());
        let motion = MotionParameters::idle();
        let max = params.radius_m * (1.0 + params.pulse_amplitude) + 1e-4;

        for frame in 0..240 {
            web.update(frame as f32 / 60.0, 1.0 / 60.0, &motion);
            for k in 0..=params.rings {
                let r = web.ring_radius(k);
                assert!(r >= 0.0 && r <= max, "ring {k} radius {r}");
            }
        }
    }

    #[test]
    fn test_zero_pulse_freezes_phase() {
        let mut web = Web::new(WebParams::default());
        let motion = MotionParameters {
            web_pulse: 0.0,
            ..MotionParameters::idle()
        };
        web.update(1.0, 0.5, &motion);
        assert_eq!(web.phase(), 0.0);
    }

    #[test]
    fn test_hub_radius_is_zero() {
        let mut web = Web::new(WebParams::default());
        web.update(0.3, 0.3, &MotionParameters::idle());
        assert_eq!(web.ring_radius(0), 0.0);
    }

    #[test]
    fn test_stays_in_bounds() {
        let params = WebParams {
            radius_m: 30.0,
            ..Default::default()
        };
        let mut web = Web::new(params);
        web.update(0.1, 0.1, &MotionParameters::idle());
        assert!(within_bounds(web.vertices()));
    }
}
