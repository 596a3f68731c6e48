//! Pointer-replacement cursor: a glowing orb, a ghost trail that only shows
//! over interactive elements, and a short sparkle on every hover entry.

use super::motion::{Point2D, Viewport};
use super::trail::TrailBuffer;
use crate::host::Element;
use crate::surface::{Color, Glow, Surface};

pub const TRAIL_CAPACITY: usize = 12;
pub const CURSOR_SIZE: f32 = 28.0;
pub const SPARKLE_SIZE: f32 = 20.0;
pub const SPARKLE_LIFETIME_MS: f64 = 400.0;

const ORB: Color = Color::rgba(180, 100, 255, 0.85);
const ORB_HALO: Glow = Glow::new(Color::rgba(180, 100, 255, 0.45), 32.0);
const GHOST: Color = Color::rgba(180, 100, 255, 0.25);
const SPARKLE: Color = Color::rgba(200, 120, 255, 0.7);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedSparkle {
    pub position: Point2D,
    pub born_ms: f64,
}

impl TimedSparkle {
    pub fn age(&self, now_ms: f64) -> f64 {
        now_ms - self.born_ms
    }

    pub fn is_expired(&self, now_ms: f64) -> bool {
        self.age(now_ms) >= SPARKLE_LIFETIME_MS
    }

    /// `(opacity, scale)` at `now_ms`: 1 -> 0.7 over the first 80% of life
    /// while growing to 1.5x, then fading out to 0 at 2x.
    pub fn keyframe(&self, now_ms: f64) -> (f32, f32) {
        let t = (self.age(now_ms) / SPARKLE_LIFETIME_MS).clamp(0.0, 1.0) as f32;
        if t <= 0.8 {
            let u = t / 0.8;
            (1.0 - 0.3 * u, 1.0 + 0.5 * u)
        } else {
            let u = (t - 0.8) / 0.2;
            (0.7 * (1.0 - u), 1.5 + 0.5 * u)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorState {
    pub position: Point2D,
    pub is_over_interactive: bool,
    pub sparkles: Vec<TimedSparkle>,
}

pub struct PointerCursor {
    state: CursorState,
    trail: TrailBuffer,
}

impl PointerCursor {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            state: CursorState {
                position: viewport.center(),
                is_over_interactive: false,
                sparkles: Vec::new(),
            },
            trail: TrailBuffer::new(TRAIL_CAPACITY),
        }
    }

    pub fn state(&self) -> &CursorState {
        &self.state
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    /// Record a pointer move and the element found under it.
    pub fn on_pointer_move(&mut self, p: Point2D, hit: Option<&Element>, now_ms: f64) {
        self.state.position = p;
        let active = hit.is_some_and(Element::is_interactive);
        if active && !self.state.is_over_interactive {
            self.state.sparkles.push(TimedSparkle {
                position: p,
                born_ms: now_ms,
            });
        }
        self.state.is_over_interactive = active;
    }

    pub fn step(&mut self, now_ms: f64, viewport: &Viewport) {
        if !self.state.position.is_finite() {
            self.state.position = viewport.center();
            self.trail.clear();
            tracing::debug!("cursor position went non-finite; recentred");
        }
        self.trail.push(self.state.position);
        self.state.sparkles.retain(|s| !s.is_expired(now_ms));
    }

    pub fn draw(&self, surface: &mut dyn Surface, now_ms: f64) {
        let r = CURSOR_SIZE * 0.5;
        if self.state.is_over_interactive {
            let n = TRAIL_CAPACITY as f32;
            for (i, p) in self.trail.iter().enumerate() {
                let opacity = (i as f32 + 1.0) / n / 2.0;
                let c = GHOST.fade(opacity);
                surface.fill_circle(*p, r, c, Some(Glow::new(c, 6.0)));
            }
        }

        surface.fill_circle(self.state.position, r, ORB, Some(ORB_HALO));

        for s in &self.state.sparkles {
            if s.is_expired(now_ms) {
                continue;
            }
            let (opacity, scale) = s.keyframe(now_ms);
            let c = SPARKLE.fade(opacity);
            surface.fill_circle(s.position, SPARKLE_SIZE * 0.5 * scale, c, Some(Glow::new(c, 8.0)));
        }
    }
}
