use std::ops::{Add, AddAssign, Mul, Sub};

/// Position or velocity in logical viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t))
    }

    /// One step of exponential smoothing: `self + (target - self) * factor`.
    pub fn smooth_toward(&mut self, target: Self, factor: f32) {
        *self = self.lerp(target, factor);
    }
}

impl Add for Point2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point2D {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Wrap `v` into `[0, extent)`. Degenerate extents collapse to 0.
#[inline]
pub fn wrap(v: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    let r = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs.
    if r >= extent { 0.0 } else { r }
}

/// Logical viewport: size in logical pixels plus backing pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub density: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32, density: f32) -> Self {
        Self {
            width,
            height,
            density,
        }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.width * 0.5, self.height * 0.5)
    }

    /// Backing-store dimensions in device pixels.
    pub fn backing_size(&self) -> (usize, usize) {
        let d = if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            1.0
        };
        (
            (self.width.max(0.0) * d).round() as usize,
            (self.height.max(0.0) * d).round() as usize,
        )
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}
