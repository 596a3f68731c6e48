//! Free-floating glow particles.

use super::entropy::Entropy;
use super::motion::{wrap, Point2D, Viewport};
use crate::surface::{Color, Glow, Surface};

/// Viewports narrower than this (logical px) get the reduced particle count.
pub const NARROW_VIEWPORT: f32 = 600.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Leaving one edge re-enters from the opposite edge.
    Wrap,
    /// Leaving an edge flips that velocity component and clamps the position.
    Bounce,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub edge: EdgePolicy,
    pub count_wide: usize,
    pub count_narrow: usize,
    pub radius: (f32, f32),
    pub speed_x: f32,
    pub speed_y: f32,
    pub glow: (f32, f32),
    pub palette: Vec<Color>,
}

impl FieldConfig {
    /// Slow violet motes that wrap around the viewport.
    pub fn drift() -> Self {
        Self {
            edge: EdgePolicy::Wrap,
            count_wide: 48,
            count_narrow: 24,
            radius: (2.0, 6.0),
            speed_x: 0.15,
            speed_y: 0.1,
            glow: (12.0, 32.0),
            palette: vec![
                Color::rgba(180, 100, 255, 0.7),
                Color::rgba(140, 80, 255, 0.5),
                Color::rgba(200, 120, 255, 0.6),
            ],
        }
    }

    /// Small neon specks that bounce inside the viewport.
    pub fn storm() -> Self {
        Self {
            edge: EdgePolicy::Bounce,
            count_wide: 60,
            count_narrow: 30,
            radius: (0.5, 2.5),
            speed_x: 0.2,
            speed_y: 0.1,
            glow: (8.0, 8.0),
            palette: vec![
                Color::rgba(255, 0, 120, 0.5),
                Color::rgba(0, 200, 255, 0.5),
                Color::rgba(180, 0, 255, 0.5),
                Color::rgba(255, 255, 255, 0.3),
            ],
        }
    }

    pub fn count_for(&self, viewport: &Viewport) -> usize {
        if viewport.width < NARROW_VIEWPORT {
            self.count_narrow
        } else {
            self.count_wide
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point2D,
    pub velocity: Point2D,
    pub radius: f32,
    pub color: Color,
    pub glow_radius: f32,
}

pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    recovered: usize,
}

impl ParticleField {
    pub fn new(config: FieldConfig, viewport: &Viewport, rng: &mut dyn Entropy) -> Self {
        let count = config.count_for(viewport);
        let particles = (0..count)
            .map(|_| spawn(&config, viewport, rng))
            .collect();
        Self {
            config,
            particles,
            recovered: 0,
        }
    }

    /// Build a field from explicit particles (useful for scripted scenarios).
    pub fn with_particles(config: FieldConfig, particles: Vec<Particle>) -> Self {
        Self {
            config,
            particles,
            recovered: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn edge(&self) -> EdgePolicy {
        self.config.edge
    }

    /// Number of particles respawned after their state went non-finite.
    pub fn recovered(&self) -> usize {
        self.recovered
    }

    pub fn step(&mut self, viewport: &Viewport, rng: &mut dyn Entropy) {
        let (w, h) = (viewport.width, viewport.height);
        for p in &mut self.particles {
            if !p.position.is_finite() || !p.velocity.is_finite() {
                *p = spawn(&self.config, viewport, rng);
                self.recovered += 1;
                tracing::debug!("particle state went non-finite; respawned");
                continue;
            }
            match self.config.edge {
                EdgePolicy::Wrap => {
                    p.position += p.velocity;
                    p.position.x = wrap(p.position.x, w);
                    p.position.y = wrap(p.position.y, h);
                }
                EdgePolicy::Bounce => {
                    let next = p.position + p.velocity;
                    if next.x < 0.0 || next.x > w {
                        p.velocity.x = -p.velocity.x;
                    }
                    if next.y < 0.0 || next.y > h {
                        p.velocity.y = -p.velocity.y;
                    }
                    p.position = Point2D::new(next.x.clamp(0.0, w.max(0.0)), next.y.clamp(0.0, h.max(0.0)));
                }
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for p in &self.particles {
            surface.fill_circle(
                p.position,
                p.radius,
                p.color,
                Some(Glow::new(p.color, p.glow_radius)),
            );
        }
    }
}

fn spawn(config: &FieldConfig, viewport: &Viewport, rng: &mut dyn Entropy) -> Particle {
    let color = config
        .palette
        .get(rng.index(config.palette.len()))
        .copied()
        .unwrap_or(Color::rgb(255, 255, 255));
    Particle {
        position: rng.point_in(viewport.width, viewport.height),
        velocity: Point2D::new(
            rng.between(-config.speed_x, config.speed_x),
            rng.between(-config.speed_y, config.speed_y),
        ),
        radius: rng.between(config.radius.0, config.radius.1),
        color,
        glow_radius: rng.between(config.glow.0, config.glow.1),
    }
}
