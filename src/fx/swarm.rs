//! Sparkles that loosely flock around the pointer.

use super::entropy::Entropy;
use super::motion::{Point2D, Viewport};
use crate::surface::{Color, Glow, Surface};

pub const SPARKLE_COUNT: usize = 12;
pub const TARGET_SMOOTHING: f32 = 0.02;
pub const CHASE_SMOOTHING: f32 = 0.08;
pub const SCATTER: f32 = 80.0;

const FILL: Color = Color::hex(0xa855f7);
const HALO: Color = Color::hex(0xc084fc);

#[derive(Clone, Debug, PartialEq)]
pub struct Sparkle {
    pub position: Point2D,
    pub target: Point2D,
    pub radius: f32,
    pub glow_radius: f32,
    pub phase: f32,
}

impl Sparkle {
    pub fn spawn(viewport: &Viewport, rng: &mut dyn Entropy) -> Self {
        Self {
            position: rng.point_in(viewport.width, viewport.height),
            target: rng.point_in(viewport.width, viewport.height),
            radius: rng.between(2.0, 4.0),
            glow_radius: rng.between(16.0, 32.0),
            phase: rng.unit(),
        }
    }

    /// Move `position` toward the current target.
    pub fn chase(&mut self, factor: f32) {
        let target = self.target;
        self.position.smooth_toward(target, factor);
    }

    /// Twinkle in `[0.4, 1.0]`, independent per sparkle through `phase`.
    pub fn brightness(&self, now_ms: f64) -> f32 {
        let t = (now_ms / 400.0) as f32 + self.phase * 10.0;
        (0.7 + 0.3 * t.sin()).clamp(0.0, 1.0)
    }
}

pub struct SparkleSwarm {
    sparkles: Vec<Sparkle>,
}

impl SparkleSwarm {
    pub fn new(count: usize, viewport: &Viewport, rng: &mut dyn Entropy) -> Self {
        Self {
            sparkles: (0..count).map(|_| Sparkle::spawn(viewport, rng)).collect(),
        }
    }

    pub fn sparkles(&self) -> &[Sparkle] {
        &self.sparkles
    }

    pub fn sparkles_mut(&mut self) -> &mut [Sparkle] {
        &mut self.sparkles
    }

    pub fn step(&mut self, pointer: Point2D, viewport: &Viewport, rng: &mut dyn Entropy) {
        for s in &mut self.sparkles {
            if !s.position.is_finite() || !s.target.is_finite() {
                *s = Sparkle::spawn(viewport, rng);
                tracing::debug!("sparkle state went non-finite; respawned");
                continue;
            }
            let jitter = Point2D::new(rng.between(-SCATTER, SCATTER), rng.between(-SCATTER, SCATTER));
            s.target.smooth_toward(pointer + jitter, TARGET_SMOOTHING);
            s.chase(CHASE_SMOOTHING);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, now_ms: f64) {
        for s in &self.sparkles {
            let k = s.brightness(now_ms);
            surface.fill_circle(
                s.position,
                s.radius,
                FILL.with_alpha(k),
                Some(Glow::new(HALO.fade(k), s.glow_radius)),
            );
        }
    }
}
