//! Frame timing and the set of animated shapes.

use std::time::Instant;

use crate::mood::MotionParameters;
use crate::params::scene_constants::MAX_FRAME_DT_S;
use crate::params::{LiquidParams, RibbonParams, SwarmParams, WebParams};
use crate::shapes::{Animator, LiquidSurface, Ribbons, Swarm, Topology, Vertex, Web};

/// Elapsed time plus a clamped per-frame delta
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Advance to now, returning (seconds since start, clamped delta)
    pub fn tick(&mut self) -> (f32, f32) {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> (f32, f32) {
        let dt = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;
        let time_s = now.saturating_duration_since(self.start).as_secs_f32();
        (time_s, dt.min(MAX_FRAME_DT_S))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Geometry of one shape, ready for upload
pub struct Batch<'a> {
    pub name: &'static str,
    pub topology: Topology,
    pub vertices: &'a [Vertex],
    pub indices: &'a [u32],
}

/// The four shapes, drawn back to front
pub struct Scene {
    liquid: LiquidSurface,
    web: Web,
    ribbons: Ribbons,
    swarm: Swarm,
}

impl Scene {
    pub fn new(
        ribbons: RibbonParams,
        swarm: SwarmParams,
        web: WebParams,
        liquid: LiquidParams,
    ) -> Self {
        Self {
            liquid: LiquidSurface::new(liquid),
            web: Web::new(web),
            ribbons: Ribbons::new(ribbons),
            swarm: Swarm::new(swarm),
        }
    }

    fn animators(&self) -> [&dyn Animator; 4] {
        [&self.liquid, &self.web, &self.ribbons, &self.swarm]
    }

    fn animators_mut(&mut self) -> [&mut dyn Animator; 4] {
        [
            &mut self.liquid,
            &mut self.web,
            &mut self.ribbons,
            &mut self.swarm,
        ]
    }

    /// Advance every shape by one frame
    pub fn update(&mut self, time_s: f32, dt_s: f32, motion: &MotionParameters) {
        let dt = dt_s.clamp(0.0, MAX_FRAME_DT_S);
        for animator in self.animators_mut() {
            animator.update(time_s, dt, motion);
        }
    }

    pub fn batches(&self) -> Vec<Batch<'_>> {
        self.animators()
            .into_iter()
            .map(|a| Batch {
                name: a.name(),
                topology: a.topology(),
                vertices: a.vertices(),
                indices: a.indices(),
            })
            .collect()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(
            RibbonParams::default(),
            SwarmParams::default(),
            WebParams::default(),
            LiquidParams::default(),
        )
    }
}
