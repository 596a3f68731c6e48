//! Drawing surfaces.
//!
//! Effects draw in logical pixels through the [`Surface`] trait. The CPU
//! implementation, [`PixelSurface`], keeps a straight-alpha RGBA8 backing
//! store sized `logical * density` and maps every coordinate through that
//! density so callers never see device pixels.

use crate::error::{FxError, FxResult};
use crate::fx::motion::{Point2D, Viewport};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn fade(self, k: f32) -> Self {
        Self {
            a: (self.a * k).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn mix(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(1e-6);
            return a.color.mix(b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

/// Full-surface fill.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        from: Point2D,
        to: Point2D,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Point2D,
        inner: f32,
        outer: f32,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn color_at(&self, p: Point2D) -> Color {
        match self {
            Self::Solid(c) => *c,
            Self::Linear { from, to, stops } => {
                let axis = *to - *from;
                let len2 = axis.x * axis.x + axis.y * axis.y;
                let t = if len2 > 1e-9 {
                    let rel = p - *from;
                    (rel.x * axis.x + rel.y * axis.y) / len2
                } else {
                    0.0
                };
                sample_stops(stops, t.clamp(0.0, 1.0))
            }
            Self::Radial {
                center,
                inner,
                outer,
                stops,
            } => {
                let span = (outer - inner).max(1e-6);
                let t = (p.distance(*center) - inner) / span;
                sample_stops(stops, t.clamp(0.0, 1.0))
            }
        }
    }
}

/// Soft halo drawn under a shape, the raster analogue of a canvas shadow blur.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub radius: f32,
}

impl Glow {
    pub const fn new(color: Color, radius: f32) -> Self {
        Self { color, radius }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StrokePaint {
    Solid(Color),
    /// Two stops running from the segment start to its end.
    Gradient(Color, Color),
}

impl StrokePaint {
    fn at(&self, t: f32) -> Color {
        match *self {
            Self::Solid(c) => c,
            Self::Gradient(a, b) => a.mix(b, t),
        }
    }

    pub fn fade(self, k: f32) -> Self {
        match self {
            Self::Solid(c) => Self::Solid(c.fade(k)),
            Self::Gradient(a, b) => Self::Gradient(a.fade(k), b.fade(k)),
        }
    }
}

pub trait Surface {
    fn viewport(&self) -> Viewport;
    /// Reallocate the backing store for a new viewport.
    fn resize(&mut self, viewport: Viewport);
    fn clear(&mut self);
    fn fill(&mut self, paint: &Paint);
    fn fill_circle(&mut self, center: Point2D, radius: f32, color: Color, glow: Option<Glow>);
    fn fill_ellipse(
        &mut self,
        center: Point2D,
        rx: f32,
        ry: f32,
        color: Color,
        glow: Option<Glow>,
    );
    fn stroke_segment(
        &mut self,
        from: Point2D,
        to: Point2D,
        width: f32,
        paint: StrokePaint,
        glow: Option<Glow>,
    );

    fn stroke_polyline(&mut self, points: &[Point2D], width: f32, color: Color, glow: Option<Glow>) {
        for pair in points.windows(2) {
            self.stroke_segment(pair[0], pair[1], width, StrokePaint::Solid(color), glow);
        }
    }
}

/// Largest backing store we are willing to allocate (device pixels).
const MAX_BACKING_PIXELS: usize = 4096 * 4096;

pub struct PixelSurface {
    viewport: Viewport,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Acquire a surface for `viewport`. Fails when the viewport has no area or
    /// would need an unreasonably large backing store.
    pub fn new(viewport: Viewport) -> FxResult<Self> {
        if !(viewport.width.is_finite() && viewport.height.is_finite()) {
            return Err(FxError::invalid_viewport(format!(
                "{}x{}",
                viewport.width, viewport.height
            )));
        }
        if viewport.is_empty() {
            return Err(FxError::surface_unavailable(format!(
                "viewport {}x{} has no drawable area",
                viewport.width, viewport.height
            )));
        }
        let (w, h) = viewport.backing_size();
        if w.saturating_mul(h) > MAX_BACKING_PIXELS {
            return Err(FxError::surface_unavailable(format!(
                "backing store {w}x{h} exceeds limit"
            )));
        }
        let mut s = Self {
            viewport,
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        s.resize(viewport);
        Ok(s)
    }

    pub fn backing_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn density(&self) -> f32 {
        let d = self.viewport.density;
        if d.is_finite() && d > 0.0 { d } else { 1.0 }
    }

    fn to_device(&self, p: Point2D) -> Point2D {
        p * self.density()
    }

    /// Device-pixel bounding box clipped to the backing store, inclusive-exclusive.
    fn bbox(&self, c: Point2D, rx: f32, ry: f32) -> Option<(usize, usize, usize, usize)> {
        if !c.is_finite() || !rx.is_finite() || !ry.is_finite() {
            return None;
        }
        let x0 = (c.x - rx).floor().max(0.0);
        let y0 = (c.y - ry).floor().max(0.0);
        let x1 = (c.x + rx).ceil().min(self.width as f32);
        let y1 = (c.y + ry).ceil().min(self.height as f32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    #[inline]
    fn blend(&mut self, x: usize, y: usize, c: Color, coverage: f32) {
        let sa = (c.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = (y * self.width + x) * 4;
        let px = &mut self.pixels[i..i + 4];
        let da = px[3] as f32 / 255.0;
        let oa = sa + da * (1.0 - sa);
        if oa <= 0.0 {
            return;
        }
        let ch = |s: u8, d: u8| {
            ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        px[0] = ch(c.r, px[0]);
        px[1] = ch(c.g, px[1]);
        px[2] = ch(c.b, px[2]);
        px[3] = (oa * 255.0).round() as u8;
    }

    /// Shared raster loop: `shape` maps a device pixel centre to
    /// `(coverage, signed distance outside the shape, stroke parameter)`.
    fn raster(
        &mut self,
        center: Point2D,
        reach_x: f32,
        reach_y: f32,
        paint: StrokePaint,
        glow: Option<(Color, f32)>,
        shape: impl Fn(Point2D) -> (f32, f32, f32),
    ) {
        let Some((x0, y0, x1, y1)) = self.bbox(center, reach_x, reach_y) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point2D::new(x as f32 + 0.5, y as f32 + 0.5);
                let (coverage, outside, t) = shape(p);
                if let Some((gc, gr)) = glow {
                    if gr > 0.0 && outside > 0.0 && outside < gr {
                        let k = 1.0 - outside / gr;
                        self.blend(x, y, gc, k * k * (1.0 - coverage));
                    }
                }
                if coverage > 0.0 {
                    self.blend(x, y, paint.at(t), coverage);
                }
            }
        }
    }
}

impl Surface for PixelSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let (w, h) = viewport.backing_size();
        let (w, h) = if w.saturating_mul(h) > MAX_BACKING_PIXELS {
            (0, 0)
        } else {
            (w, h)
        };
        self.width = w;
        self.height = h;
        self.pixels.clear();
        self.pixels.resize(w * h * 4, 0);
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill(&mut self, paint: &Paint) {
        let d = self.density();
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point2D::new((x as f32 + 0.5) / d, (y as f32 + 0.5) / d);
                let c = paint.color_at(p);
                self.blend(x, y, c, 1.0);
            }
        }
    }

    fn fill_circle(&mut self, center: Point2D, radius: f32, color: Color, glow: Option<Glow>) {
        let d = self.density();
        let c = self.to_device(center);
        let r = (radius * d).max(0.0);
        let g = glow.map(|g| (g.color, g.radius * d));
        let reach = r + g.map(|g| g.1).unwrap_or(0.0) + 1.0;
        self.raster(c, reach, reach, StrokePaint::Solid(color), g, |p| {
            let dist = p.distance(c);
            ((r + 0.5 - dist).clamp(0.0, 1.0), dist - r, 0.0)
        });
    }

    fn fill_ellipse(
        &mut self,
        center: Point2D,
        rx: f32,
        ry: f32,
        color: Color,
        glow: Option<Glow>,
    ) {
        let d = self.density();
        let c = self.to_device(center);
        let (rx, ry) = ((rx * d).max(1e-3), (ry * d).max(1e-3));
        let g = glow.map(|g| (g.color, g.radius * d));
        let extra = g.map(|g| g.1).unwrap_or(0.0) + 1.0;
        let minor = rx.min(ry);
        self.raster(c, rx + extra, ry + extra, StrokePaint::Solid(color), g, |p| {
            let n = Point2D::new((p.x - c.x) / rx, (p.y - c.y) / ry).length();
            let outside = (n - 1.0) * minor;
            ((0.5 - outside).clamp(0.0, 1.0), outside, 0.0)
        });
    }

    fn stroke_segment(
        &mut self,
        from: Point2D,
        to: Point2D,
        width: f32,
        paint: StrokePaint,
        glow: Option<Glow>,
    ) {
        if width <= 0.0 {
            return;
        }
        let d = self.density();
        let a = self.to_device(from);
        let b = self.to_device(to);
        let half = width * d * 0.5;
        let g = glow.map(|g| (g.color, g.radius * d));
        let reach = half + g.map(|g| g.1).unwrap_or(0.0) + 1.0;
        let mid = a.lerp(b, 0.5);
        let reach_x = (b.x - a.x).abs() * 0.5 + reach;
        let reach_y = (b.y - a.y).abs() * 0.5 + reach;
        let ab = b - a;
        let len2 = ab.x * ab.x + ab.y * ab.y;
        self.raster(mid, reach_x, reach_y, paint, g, |p| {
            let t = if len2 > 1e-9 {
                let ap = p - a;
                ((ap.x * ab.x + ap.y * ab.y) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dist = p.distance(a + ab * t);
            ((half + 0.5 - dist).clamp(0.0, 1.0), dist - half, t)
        });
    }
}
