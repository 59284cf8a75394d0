//! Flocking dot swarm.

use glam::Vec3;

use super::{clamp_to_bounds, Animator, Topology, Vertex};
use crate::mood::{MotionParameters, Rgb};
use crate::params::scene_constants::{HALF_EXTENT_M, MAX_FRAME_DT_S};
use crate::params::SwarmParams;

/// Minimum speed fraction so an idle swarm still drifts
const IDLE_SPEED_FRACTION: f32 = 0.2;

pub struct Swarm {
    params: SwarmParams,
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    /// Scratch buffer for the next frame's velocities
    next_velocities: Vec<Vec3>,
    vertices: Vec<Vertex>,
}

impl Swarm {
    pub fn new(params: SwarmParams) -> Self {
        let mut rng = fastrand::Rng::with_seed(params.seed);
        let mut random_vec = |scale: f32| {
            Vec3::new(rng.f32() - 0.5, rng.f32() - 0.5, rng.f32() - 0.5) * 2.0 * scale
        };

        // Start in a loose ball around the origin
        let positions: Vec<Vec3> = (0..params.count)
            .map(|_| random_vec(HALF_EXTENT_M * 0.5))
            .collect();
        let velocities: Vec<Vec3> = (0..params.count)
            .map(|_| random_vec(params.max_speed_m_per_s * 0.3))
            .collect();

        Self {
            next_velocities: velocities.clone(),
            vertices: vec![Vertex::default(); params.count * 4],
            positions,
            velocities,
            params,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Speed limit for the current agitation
    pub fn max_speed(&self, motion: &MotionParameters) -> f32 {
        self.params.max_speed_m_per_s * (IDLE_SPEED_FRACTION + motion.dot_swarm)
    }

    fn steer(&mut self, dt: f32, motion: &MotionParameters) {
        let p = &self.params;
        let neighbor_sq = p.neighbor_radius_m * p.neighbor_radius_m;
        let separation_sq = p.separation_radius_m * p.separation_radius_m;
        let max_speed = self.max_speed(motion);

        for i in 0..self.positions.len() {
            let pos = self.positions[i];
            let vel = self.velocities[i];

            let mut center = Vec3::ZERO;
            let mut heading = Vec3::ZERO;
            let mut push = Vec3::ZERO;
            let mut neighbors = 0u32;

            for (j, (&other, &other_vel)) in
                self.positions.iter().zip(&self.velocities).enumerate()
            {
                if i == j {
                    continue;
                }
                let d_sq = pos.distance_squared(other);
                if d_sq < neighbor_sq {
                    center += other;
                    heading += other_vel;
                    neighbors += 1;
                    if d_sq < separation_sq && d_sq > 0.0 {
                        push += (pos - other) / d_sq;
                    }
                }
            }

            let mut accel = push * p.separation_weight - pos * p.centering_strength;
            if neighbors > 0 {
                let n = neighbors as f32;
                accel += (center / n - pos) * p.cohesion_weight;
                accel += (heading / n - vel) * p.alignment_weight;
            }

            // Swirl around the Y axis
            let tangent = Vec3::new(-pos.z, 0.0, pos.x).normalize_or_zero();
            accel += tangent * p.swirl_strength * motion.dot_swarm;

            self.next_velocities[i] = (vel + accel * dt).clamp_length_max(max_speed);
        }

        std::mem::swap(&mut self.velocities, &mut self.next_velocities);
    }

    fn integrate(&mut self, dt: f32) {
        for (pos, vel) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            *pos += *vel * dt;

            // Reflect off the cube faces
            for axis in 0..3 {
                if pos[axis].abs() > HALF_EXTENT_M {
                    pos[axis] = pos[axis].clamp(-HALF_EXTENT_M, HALF_EXTENT_M);
                    vel[axis] = -vel[axis];
                }
            }
        }
    }

    fn write_vertices(&mut self, motion: &MotionParameters) {
        let size = self.params.dot_size_m * (1.0 + motion.glow_intensity.min(3.0));
        let color = motion
            .base_color
            .lerp(Rgb::new(1.0, 1.0, 1.0), 0.3)
            .with_alpha((0.4 + 0.3 * motion.glow_intensity).min(1.0));

        for (dot, pos) in self.positions.iter().enumerate() {
            let arms = [Vec3::X * size, Vec3::Y * size];
            for (a, arm) in arms.iter().enumerate() {
                let base = dot * 4 + a * 2;
                self.vertices[base] = Vertex {
                    position: clamp_to_bounds(*pos - *arm).to_array(),
                    color,
                };
                self.vertices[base + 1] = Vertex {
                    position: clamp_to_bounds(*pos + *arm).to_array(),
                    color,
                };
            }
        }
    }
}

impl Animator for Swarm {
    fn update(&mut self, _time_s: f32, dt_s: f32, motion: &MotionParameters) {
        let dt = dt_s.clamp(0.0, MAX_FRAME_DT_S);
        self.steer(dt, motion);
        self.integrate(dt);
        self.write_vertices(motion);
    }

    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn topology(&self) -> Topology {
        Topology::Lines
    }

    fn name(&self) -> &'static str {
        "swarm"
    }
}
