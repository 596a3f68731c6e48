//! Stochastic lightning flashes.
//!
//! Two states only. While idle, every tick compares the time since the
//! previous trigger against a freshly drawn interval; once it is exceeded a
//! new bolt is generated at full opacity, which then decays by a fixed step
//! per tick. Reaching zero discards the bolt and returns to idle.

use super::entropy::Entropy;
use super::motion::{Point2D, Viewport};
use crate::surface::{Color, Glow, Surface};

pub const INTERVAL_MS: (f32, f32) = (1200.0, 3000.0);
pub const OPACITY_STEP: f32 = 0.08;
pub const SEGMENTS: (usize, usize) = (10, 20);
pub const JITTER: f32 = 20.0;

const STROKE_WIDTH: f32 = 2.5;
const STROKE: Color = Color::rgba(180, 180, 255, 0.9);
const GLOW: Glow = Glow::new(Color::rgba(180, 180, 255, 0.8), 24.0);

/// Jagged polyline from the top edge to the bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Bolt {
    pub points: Vec<Point2D>,
}

impl Bolt {
    pub fn generate(viewport: &Viewport, rng: &mut dyn Entropy) -> Self {
        let (w, h) = (viewport.width, viewport.height);
        let span = SEGMENTS.1 - SEGMENTS.0 + 1;
        let n = SEGMENTS.0 + rng.index(span);
        let mut x = rng.between(w * 0.2, w * 0.8);
        let mut y = 0.0;
        let step = h / n as f32;
        let mut points = Vec::with_capacity(n + 1);
        points.push(Point2D::new(x, y));
        for _ in 0..n {
            x += rng.between(-JITTER, JITTER);
            y += step;
            points.push(Point2D::new(x, y));
        }
        Self { points }
    }

    pub fn segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FlashState {
    Idle { last_flash_ms: f64 },
    Flashing { bolt: Bolt, opacity: f32 },
}

pub struct LightningFlash {
    state: FlashState,
    last_trigger_ms: f64,
    flashes: u64,
}

impl LightningFlash {
    pub fn new(now_ms: f64) -> Self {
        Self {
            state: FlashState::Idle {
                last_flash_ms: now_ms,
            },
            last_trigger_ms: now_ms,
            flashes: 0,
        }
    }

    pub fn state(&self) -> &FlashState {
        &self.state
    }

    pub fn is_flashing(&self) -> bool {
        matches!(self.state, FlashState::Flashing { .. })
    }

    pub fn opacity(&self) -> f32 {
        match self.state {
            FlashState::Flashing { opacity, .. } => opacity,
            FlashState::Idle { .. } => 0.0,
        }
    }

    pub fn flashes(&self) -> u64 {
        self.flashes
    }

    /// Advance one tick: maybe trigger while idle, otherwise decay.
    pub fn step(&mut self, now_ms: f64, viewport: &Viewport, rng: &mut dyn Entropy) {
        match &mut self.state {
            FlashState::Idle { last_flash_ms } => {
                // The threshold is redrawn on every idle tick.
                if now_ms - *last_flash_ms > draw_threshold(rng) as f64 {
                    self.last_trigger_ms = now_ms;
                    self.flashes += 1;
                    self.state = FlashState::Flashing {
                        bolt: Bolt::generate(viewport, rng),
                        opacity: 1.0,
                    };
                }
            }
            FlashState::Flashing { opacity, .. } => {
                *opacity -= OPACITY_STEP;
                if *opacity <= 0.0 {
                    self.state = FlashState::Idle {
                        last_flash_ms: self.last_trigger_ms,
                    };
                }
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if let FlashState::Flashing { bolt, opacity } = &self.state {
            let glow = Glow::new(GLOW.color.fade(*opacity), GLOW.radius);
            surface.stroke_polyline(&bolt.points, STROKE_WIDTH, STROKE.fade(*opacity), Some(glow));
        }
    }
}

fn draw_threshold(rng: &mut dyn Entropy) -> f32 {
    rng.between(INTERVAL_MS.0, INTERVAL_MS.1)
}
