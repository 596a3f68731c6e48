//! A stack of independently driven effect surfaces composited in z-order.

use crate::driver::{SurfaceDriver, TickOutcome};
use crate::fx::scenes::Scene;
use crate::host::{Host, InputEvent};
use crate::surface::PixelSurface;

pub struct Stage<H: Host + Clone> {
    name: String,
    drivers: Vec<SurfaceDriver<H, PixelSurface>>,
    composite: Vec<u8>,
    width: usize,
    height: usize,
}

impl<H: Host + Clone> Stage<H> {
    /// Mount one driver per scene, bottom first. Surfaces that cannot be
    /// acquired leave their layer inert; the rest of the stage still runs.
    pub fn mount(name: &str, host: &H, scenes: &[Scene], seed: Option<u64>, now_ms: f64) -> Self {
        let drivers = scenes
            .iter()
            .enumerate()
            .map(|(i, scene)| {
                let surface = match PixelSurface::new(host.viewport()) {
                    Ok(s) => Some(s),
                    Err(err) => {
                        tracing::warn!(scene = scene.name, %err, "surface acquisition failed");
                        None
                    }
                };
                let rng = match seed {
                    Some(s) => fastrand::Rng::with_seed(s.wrapping_add(i as u64)),
                    None => fastrand::Rng::new(),
                };
                SurfaceDriver::mount(host.clone(), surface, scene, Box::new(rng), now_ms)
            })
            .collect();
        Self {
            name: name.to_string(),
            drivers,
            composite: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn drivers(&self) -> &[SurfaceDriver<H, PixelSurface>] {
        &self.drivers
    }

    pub fn dispatch(&mut self, event: &InputEvent, now_ms: f64) {
        for d in &mut self.drivers {
            d.dispatch(event, now_ms);
        }
    }

    /// Tick every layer and flatten them onto an opaque black base.
    /// Returns the number of layers that drew.
    pub fn tick(&mut self, host: &H, now_ms: f64) -> usize {
        let (w, h) = host.viewport().backing_size();
        if (w, h) != (self.width, self.height) {
            self.width = w;
            self.height = h;
            self.composite.resize(w * h * 4, 0);
        }
        for px in self.composite.chunks_exact_mut(4) {
            px.copy_from_slice(&[0, 0, 0, 255]);
        }

        let mut drawn = 0;
        for d in &mut self.drivers {
            if d.tick(now_ms) != TickOutcome::Drawn {
                continue;
            }
            drawn += 1;
            if let Some(surface) = d.surface() {
                if surface.backing_size() == (w, h) {
                    composite_over(&mut self.composite, surface.pixels());
                }
            }
        }
        drawn
    }

    pub fn pixels(&self) -> &[u8] {
        &self.composite
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Unmount top layer first.
    pub fn unmount(&mut self) {
        for d in self.drivers.iter_mut().rev() {
            d.unmount();
        }
    }
}

impl<H: Host + Clone> Drop for Stage<H> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Source-over blend of a straight-alpha RGBA layer onto an opaque base.
pub fn composite_over(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = s[3] as u32;
        if a == 0 {
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            d[c] = ((s[c] as u32 * a + d[c] as u32 * inv + 127) / 255) as u8;
        }
        d[3] = 255;
    }
}
