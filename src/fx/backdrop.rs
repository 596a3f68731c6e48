//! Full-surface background fills painted at the start of every tick.

use super::motion::{lerp, Point2D, Viewport};
use crate::surface::{Color, GradientStop, Paint, Surface};

#[derive(Clone, Debug, PartialEq)]
pub enum Backdrop {
    /// Transparent, so lower layers show through.
    Clear,
    Solid(Color),
    /// Violet linear gradient whose axis swings with the pointer.
    PointerGradient,
    /// Dark diagonal gradient with two radial neon washes.
    Storm,
}

/// Translucent fill painted above the flash layer for readability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Veil {
    pub color: Color,
    pub alpha: f32,
}

impl Veil {
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.fill(&Paint::Solid(self.color.fade(self.alpha)));
    }
}

const VIOLET_STOPS: [GradientStop; 5] = [
    GradientStop::new(0.0, Color::hex(0xa855f7)),
    GradientStop::new(0.25, Color::hex(0x7c3aed)),
    GradientStop::new(0.5, Color::hex(0x6d28d9)),
    GradientStop::new(0.75, Color::hex(0x5b21b6)),
    GradientStop::new(1.0, Color::hex(0x4c1d95)),
];

impl Backdrop {
    pub fn paint(&self, surface: &mut dyn Surface, viewport: &Viewport, pointer: Point2D) {
        surface.clear();
        match self {
            Self::Clear => {}
            Self::Solid(c) => surface.fill(&Paint::Solid(*c)),
            Self::PointerGradient => surface.fill(&pointer_gradient(viewport, pointer)),
            Self::Storm => {
                let (w, h) = (viewport.width, viewport.height);
                surface.fill(&Paint::Linear {
                    from: Point2D::ZERO,
                    to: Point2D::new(w, h),
                    stops: vec![
                        GradientStop::new(0.0, Color::hex(0x0a0020)),
                        GradientStop::new(0.5, Color::hex(0x1a0030)),
                        GradientStop::new(1.0, Color::hex(0x18003a)),
                    ],
                });
                surface.fill(&Paint::Radial {
                    center: Point2D::new(w * 0.7, h * 0.3),
                    inner: 80.0,
                    outer: w * 0.7,
                    stops: vec![
                        GradientStop::new(0.0, Color::rgba(0, 200, 255, 0.25)),
                        GradientStop::new(1.0, Color::TRANSPARENT),
                    ],
                });
                surface.fill(&Paint::Radial {
                    center: Point2D::new(w * 0.3, h * 0.7),
                    inner: 60.0,
                    outer: w * 0.6,
                    stops: vec![
                        GradientStop::new(0.0, Color::rgba(255, 0, 120, 0.18)),
                        GradientStop::new(1.0, Color::TRANSPARENT),
                    ],
                });
            }
        }
    }
}

/// Gradient axis endpoints move from (20%, 20%)-(80%, 80%) toward the
/// opposite corners as the pointer crosses the viewport.
pub fn pointer_gradient(viewport: &Viewport, pointer: Point2D) -> Paint {
    let (w, h) = (viewport.width.max(1.0), viewport.height.max(1.0));
    let u = pointer.x / w;
    let v = pointer.y / h;
    Paint::Linear {
        from: Point2D::new(lerp(w * 0.2, w * 0.8, u), lerp(h * 0.2, h * 0.8, v)),
        to: Point2D::new(lerp(w * 0.8, w * 0.2, u), lerp(h * 0.8, h * 0.2, v)),
        stops: VIOLET_STOPS.to_vec(),
    }
}
