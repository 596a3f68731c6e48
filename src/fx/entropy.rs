//! Random source used by every simulator.
//!
//! Production drivers run on a `fastrand::Rng` seeded from the OS; tests can
//! seed one explicitly or script exact draws with [`SequenceEntropy`].

use super::motion::Point2D;

pub trait Entropy {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f32;

    fn between(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform index in `[0, n)`; `n == 0` yields 0.
    fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.unit() * n as f32) as usize).min(n - 1)
    }

    fn point_in(&mut self, width: f32, height: f32) -> Point2D {
        Point2D::new(self.between(0.0, width), self.between(0.0, height))
    }
}

impl Entropy for fastrand::Rng {
    fn unit(&mut self) -> f32 {
        self.f32()
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct SequenceEntropy {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceEntropy {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values = values.into();
        if values.is_empty() {
            values.push(0.5);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 0.999_999);
        }
        Self { values, cursor: 0 }
    }

    pub fn constant(v: f32) -> Self {
        Self::new(vec![v])
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl Entropy for SequenceEntropy {
    fn unit(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
