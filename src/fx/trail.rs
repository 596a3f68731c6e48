//! Fading polyline behind the pointer.

use super::motion::Point2D;
use crate::surface::{Color, Glow, StrokePaint, Surface};
use std::collections::VecDeque;

/// Fixed-capacity FIFO of recent pointer positions, oldest first.
#[derive(Clone, Debug)]
pub struct TrailBuffer {
    points: VecDeque<Point2D>,
    capacity: usize,
}

impl TrailBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append `p`, evicting the oldest point past capacity. Non-finite points
    /// are dropped.
    pub fn push(&mut self, p: Point2D) {
        if !p.is_finite() {
            return;
        }
        self.points.push_back(p);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Point2D> + ExactSizeIterator {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<Point2D> {
        self.points.iter().copied().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailSampling {
    /// Append the latest known pointer position once per tick.
    EveryTick,
    /// Append on each pointer move event.
    OnMove,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailStyle {
    pub capacity: usize,
    pub sampling: TrailSampling,
    pub base_width: f32,
    pub width_step: f32,
    pub base_alpha: f32,
    pub alpha_step: f32,
    /// Colour at the older end of every segment.
    pub start: Color,
    /// Colour at the newer end of every segment.
    pub end: Color,
    pub glow: Glow,
}

impl TrailStyle {
    /// Bright violet-to-cyan streak that only grows while the pointer moves.
    pub fn neon() -> Self {
        Self {
            capacity: 18,
            sampling: TrailSampling::OnMove,
            base_width: 8.0,
            width_step: 6.0 / 18.0,
            base_alpha: 1.0,
            alpha_step: 0.08,
            start: Color::hex(0xa259ff),
            end: Color::hex(0x00f0ff),
            glow: Glow::new(Color::hex(0x00f0ff), 16.0),
        }
    }

    /// Wide translucent band sampled every tick.
    pub fn aura() -> Self {
        Self {
            capacity: 24,
            sampling: TrailSampling::EveryTick,
            base_width: 16.0,
            width_step: 0.5,
            base_alpha: 0.30,
            alpha_step: 0.005,
            start: Color::hex(0xa855f7),
            end: Color::hex(0xc084fc),
            glow: Glow::new(Color::hex(0xa855f7), 24.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSegment {
    pub from: Point2D,
    pub to: Point2D,
    pub width: f32,
    pub alpha: f32,
}

pub struct PointerTrail {
    style: TrailStyle,
    buffer: TrailBuffer,
}

impl PointerTrail {
    pub fn new(style: TrailStyle) -> Self {
        let buffer = TrailBuffer::new(style.capacity);
        Self { style, buffer }
    }

    pub fn style(&self) -> &TrailStyle {
        &self.style
    }

    pub fn buffer(&self) -> &TrailBuffer {
        &self.buffer
    }

    pub fn on_pointer_move(&mut self, p: Point2D) {
        if self.style.sampling == TrailSampling::OnMove {
            self.buffer.push(p);
        }
    }

    pub fn on_tick(&mut self, pointer: Point2D) {
        if self.style.sampling == TrailSampling::EveryTick {
            self.buffer.push(pointer);
        }
    }

    /// Segments between consecutive points, newest first. Width and alpha
    /// shrink by a fixed step per segment away from the head, floored at 0.
    pub fn segments(&self) -> Vec<TrailSegment> {
        let pts: Vec<Point2D> = self.buffer.iter().rev().copied().collect();
        pts.windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let i = i as f32;
                TrailSegment {
                    // Stroke runs oldest -> newest so the gradient keeps its direction.
                    from: pair[1],
                    to: pair[0],
                    width: (self.style.base_width - i * self.style.width_step).max(0.0),
                    alpha: (self.style.base_alpha - i * self.style.alpha_step).max(0.0),
                }
            })
            .collect()
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        // Paint oldest first so brighter segments land on top.
        for seg in self.segments().iter().rev() {
            if seg.width <= 0.0 || seg.alpha <= 0.0 {
                continue;
            }
            surface.stroke_segment(
                seg.from,
                seg.to,
                seg.width,
                StrokePaint::Gradient(self.style.start, self.style.end).fade(seg.alpha),
                Some(Glow::new(self.style.glow.color.fade(seg.alpha), self.style.glow.radius)),
            );
        }
    }
}
