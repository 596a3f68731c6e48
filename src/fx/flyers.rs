//! Butterfly-like flyers drifting across the upper part of the viewport.

use super::entropy::Entropy;
use super::motion::{Point2D, Viewport};
use crate::surface::{Color, Glow, StrokePaint, Surface};
use std::f32::consts::{PI, TAU};

pub const FLYER_COUNT: usize = 8;
/// Flyers stay inside the top 70% of the viewport.
pub const CEILING: f32 = 0.7;

pub const PALETTE: [Color; 8] = [
    Color::rgba(180, 100, 255, 0.85),
    Color::rgba(255, 200, 100, 0.85),
    Color::rgba(120, 200, 255, 0.85),
    Color::rgba(255, 120, 200, 0.85),
    Color::rgba(200, 255, 120, 0.85),
    Color::rgba(255, 255, 120, 0.85),
    Color::rgba(120, 255, 255, 0.85),
    Color::rgba(255, 120, 120, 0.85),
];

const BODY: Color = Color::rgba(34, 34, 34, 0.85);

#[derive(Clone, Debug, PartialEq)]
pub struct Flyer {
    /// Top-left corner of the flyer's bounding square.
    pub position: Point2D,
    pub heading: f32,
    pub speed: f32,
    pub size: f32,
    pub wing_phase: f32,
    pub color: Color,
    /// Seconds of wing-cycle offset.
    pub delay: f32,
}

impl Flyer {
    pub fn spawn(index: usize, viewport: &Viewport, rng: &mut dyn Entropy) -> Self {
        let size = rng.between(32.0, 56.0);
        let raw = Point2D::new(
            rng.between(0.0, viewport.width),
            rng.between(0.0, viewport.height * CEILING),
        );
        Self {
            position: clamp_into(raw, viewport, size),
            heading: rng.between(0.0, TAU),
            speed: rng.between(0.3, 1.2),
            size,
            wing_phase: 0.0,
            color: PALETTE[index % PALETTE.len()],
            delay: index as f32 * 2.0,
        }
    }

    pub fn step(&mut self, frame: u64, viewport: &Viewport) {
        let f = frame as f32;
        self.wing_phase = ((f + self.delay * 60.0) / 8.0).sin();

        let dir = Point2D::new(self.heading.cos(), self.heading.sin() * 0.7);
        let bob = Point2D::new(0.0, (f / 30.0).sin() * 0.7);
        let next = self.position + dir * self.speed + bob;

        let (max_x, max_y) = bounds(viewport, self.size);
        if next.x < 0.0 || next.x > max_x {
            self.heading = PI - self.heading;
        }
        if next.y < 0.0 || next.y > max_y {
            self.heading = -self.heading;
        }
        self.position = clamp_into(next, viewport, self.size);
    }

    pub fn center(&self) -> Point2D {
        self.position + Point2D::new(self.size * 0.5, self.size * 0.5)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        // Geometry is authored on a 64x64 box and scaled to `size`.
        let k = self.size / 64.0;
        let at = |x: f32, y: f32| self.position + Point2D::new(x * k, y * k);
        let halo = Glow::new(self.color.fade(0.5), 16.0 * k.max(0.5));

        surface.fill_ellipse(at(32.0, 32.0), 28.0 * k, 18.0 * k, self.color.fade(0.12), None);

        // Wing tips swing with the flap phase; the wing body sits between the
        // root at the torso and the swung control point.
        let spread = self.wing_phase * 10.0;
        let wings = [
            (at(16.0 - spread, 8.0), at(8.0, 32.0)),
            (at(48.0 + spread, 8.0), at(56.0, 32.0)),
        ];
        for (ctrl, tip) in wings {
            let root = at(32.0, 36.0);
            let upper = root.lerp(ctrl, 0.5).lerp(tip, 0.35);
            let lower = root.lerp(at(if tip.x < root.x { 16.0 } else { 48.0 }, 56.0), 0.5);
            let color = self.color.fade(0.7);
            surface.fill_ellipse(upper, 11.0 * k, 12.0 * k + spread.abs() * 0.3 * k, color, Some(halo));
            surface.fill_ellipse(lower, 8.0 * k, 7.0 * k, color, None);
        }

        surface.stroke_segment(
            at(32.0, 28.0),
            at(32.0, 44.0),
            8.0 * k,
            StrokePaint::Solid(BODY),
            None,
        );
        surface.stroke_polyline(
            &[at(32.0, 24.0), at(34.0, 18.0), at(30.0, 14.0), at(36.0, 10.0)],
            2.0 * k,
            Color::rgba(255, 255, 255, 0.7),
            Some(Glow::new(Color::rgba(255, 255, 255, 0.5), 2.5 * k)),
        );
    }
}

fn bounds(viewport: &Viewport, size: f32) -> (f32, f32) {
    (
        (viewport.width - size).max(0.0),
        (viewport.height * CEILING - size).max(0.0),
    )
}

fn clamp_into(p: Point2D, viewport: &Viewport, size: f32) -> Point2D {
    let (max_x, max_y) = bounds(viewport, size);
    Point2D::new(p.x.clamp(0.0, max_x), p.y.clamp(0.0, max_y))
}

pub struct FlyerFlock {
    flyers: Vec<Flyer>,
    frame: u64,
}

impl FlyerFlock {
    pub fn new(count: usize, viewport: &Viewport, rng: &mut dyn Entropy) -> Self {
        Self {
            flyers: (0..count).map(|i| Flyer::spawn(i, viewport, rng)).collect(),
            frame: 0,
        }
    }

    pub fn flyers(&self) -> &[Flyer] {
        &self.flyers
    }

    pub fn flyers_mut(&mut self) -> &mut [Flyer] {
        &mut self.flyers
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn step(&mut self, viewport: &Viewport, rng: &mut dyn Entropy) {
        self.frame += 1;
        for (i, f) in self.flyers.iter_mut().enumerate() {
            if !f.position.is_finite() || !f.heading.is_finite() {
                *f = Flyer::spawn(i, viewport, rng);
                tracing::debug!(index = i, "flyer state went non-finite; respawned");
                continue;
            }
            f.step(self.frame, viewport);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for f in &self.flyers {
            f.draw(surface);
        }
    }
}
