//! Composite surface driver: one per mounted surface.
//!
//! The driver owns the surface, every simulator of its scene and the
//! listener subscription. The host's frame loop calls [`SurfaceDriver::tick`]
//! once per display refresh and forwards input through
//! [`SurfaceDriver::dispatch`]; input handlers only record state, all drawing
//! happens inside `tick`.
//!
//! Teardown is idempotent: [`SurfaceDriver::unmount`] stops the loop, detaches
//! listeners and restores the native pointer exactly once, and `Drop` calls it
//! so no exit path can leak host state.

use crate::fx::backdrop::{Backdrop, Veil};
use crate::fx::cursor::PointerCursor;
use crate::fx::entropy::Entropy;
use crate::fx::field::ParticleField;
use crate::fx::flyers::FlyerFlock;
use crate::fx::lightning::LightningFlash;
use crate::fx::motion::{Point2D, Viewport};
use crate::fx::scenes::Scene;
use crate::fx::swarm::SparkleSwarm;
use crate::fx::trail::PointerTrail;
use crate::host::{Host, InputEvent, ListenerId};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Mounted without a usable surface; never draws.
    Inert,
    Running,
    Stopped,
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Drawn,
    Skipped,
}

/// Per-scene simulators, drawn bottom to top in field order.
pub struct Layers {
    pub backdrop: Backdrop,
    pub field: Option<ParticleField>,
    pub trail: Option<PointerTrail>,
    pub lightning: Option<LightningFlash>,
    pub veil: Option<Veil>,
    pub swarm: Option<SparkleSwarm>,
    pub flyers: Option<FlyerFlock>,
    pub cursor: Option<PointerCursor>,
}

impl Layers {
    pub fn build(scene: &Scene, viewport: &Viewport, now_ms: f64, rng: &mut dyn Entropy) -> Self {
        Self {
            backdrop: scene.backdrop.clone(),
            field: scene
                .field
                .clone()
                .map(|cfg| ParticleField::new(cfg, viewport, rng)),
            trail: scene.trail.clone().map(PointerTrail::new),
            lightning: scene.lightning.then(|| LightningFlash::new(now_ms)),
            veil: scene.veil,
            swarm: scene.swarm.map(|n| SparkleSwarm::new(n, viewport, rng)),
            flyers: scene.flyers.map(|n| FlyerFlock::new(n, viewport, rng)),
            cursor: scene.cursor.then(|| PointerCursor::new(viewport)),
        }
    }

    fn on_pointer_move(&mut self, p: Point2D, hit: Option<&crate::host::Element>, now_ms: f64) {
        if let Some(trail) = self.trail.as_mut() {
            trail.on_pointer_move(p);
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.on_pointer_move(p, hit, now_ms);
        }
    }

    fn tick(
        &mut self,
        surface: &mut dyn Surface,
        viewport: &Viewport,
        pointer: Point2D,
        now_ms: f64,
        rng: &mut dyn Entropy,
    ) {
        self.backdrop.paint(surface, viewport, pointer);

        if let Some(field) = self.field.as_mut() {
            field.step(viewport, rng);
            field.draw(surface);
        }
        if let Some(trail) = self.trail.as_mut() {
            trail.on_tick(pointer);
            trail.draw(surface);
        }
        if let Some(flash) = self.lightning.as_mut() {
            flash.step(now_ms, viewport, rng);
            flash.draw(surface);
        }
        if let Some(veil) = self.veil.as_ref() {
            veil.draw(surface);
        }
        if let Some(swarm) = self.swarm.as_mut() {
            swarm.step(pointer, viewport, rng);
            swarm.draw(surface, now_ms);
        }
        if let Some(flyers) = self.flyers.as_mut() {
            flyers.step(viewport, rng);
            flyers.draw(surface);
        }
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.step(now_ms, viewport);
            cursor.draw(surface, now_ms);
        }
    }
}

pub struct SurfaceDriver<H: Host, S: Surface> {
    host: H,
    surface: Option<S>,
    scene_name: &'static str,
    layers: Option<Layers>,
    rng: Box<dyn Entropy>,
    state: DriverState,
    listener: Option<ListenerId>,
    pointer_hidden: bool,
    pointer: Point2D,
    viewport: Viewport,
    viewport_dirty: bool,
    ticks: u64,
}

impl<H: Host, S: Surface> SurfaceDriver<H, S> {
    /// Mount `scene` on `surface`. A missing surface yields an inert driver
    /// that never draws or subscribes to anything.
    pub fn mount(
        mut host: H,
        surface: Option<S>,
        scene: &Scene,
        mut rng: Box<dyn Entropy>,
        now_ms: f64,
    ) -> Self {
        let viewport = host.viewport();
        let Some(mut surface) = surface else {
            tracing::warn!(scene = scene.name, "no drawing surface; effect disabled");
            return Self {
                host,
                surface: None,
                scene_name: scene.name,
                layers: None,
                rng,
                state: DriverState::Inert,
                listener: None,
                pointer_hidden: false,
                pointer: viewport.center(),
                viewport,
                viewport_dirty: false,
                ticks: 0,
            };
        };

        if surface.viewport() != viewport {
            surface.resize(viewport);
        }
        let listener = host.attach_listeners();
        let pointer_hidden = scene.cursor;
        if pointer_hidden {
            host.set_native_pointer_hidden(true);
        }
        let layers = Layers::build(scene, &viewport, now_ms, rng.as_mut());
        tracing::info!(
            scene = scene.name,
            width = viewport.width,
            height = viewport.height,
            density = viewport.density,
            "mounted effect surface"
        );

        Self {
            host,
            surface: Some(surface),
            scene_name: scene.name,
            layers: Some(layers),
            rng,
            state: DriverState::Running,
            listener: Some(listener),
            pointer_hidden,
            pointer: viewport.center(),
            viewport,
            viewport_dirty: false,
            ticks: 0,
        }
    }

    pub fn scene_name(&self) -> &'static str {
        self.scene_name
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn pointer(&self) -> Point2D {
        self.pointer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn layers(&self) -> Option<&Layers> {
        self.layers.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Resume ticking after [`stop`](Self::stop). No effect once unmounted.
    pub fn start(&mut self) {
        if self.state == DriverState::Stopped {
            self.state = DriverState::Running;
        }
    }

    /// Cancel scheduled ticks without releasing anything.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Stopped;
        }
    }

    /// Record input. Ignored when no listeners are attached.
    pub fn dispatch(&mut self, event: &InputEvent, now_ms: f64) {
        if self.listener.is_none() {
            return;
        }
        let p = match event {
            InputEvent::Resize => {
                self.viewport_dirty = true;
                return;
            }
            InputEvent::PointerMove(p) => *p,
            InputEvent::TouchMove(points) => match points.first() {
                Some(p) => *p,
                None => return,
            },
        };
        if !p.is_finite() {
            return;
        }
        self.pointer = p;
        let hit = match self.layers.as_ref() {
            Some(l) if l.cursor.is_some() => self.host.element_at(p),
            _ => None,
        };
        if let Some(layers) = self.layers.as_mut() {
            layers.on_pointer_move(p, hit.as_ref(), now_ms);
        }
    }

    /// Run one frame. Returns [`TickOutcome::Skipped`] without touching the
    /// surface unless the driver is running.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        if self.state != DriverState::Running {
            return TickOutcome::Skipped;
        }
        let (Some(surface), Some(layers)) = (self.surface.as_mut(), self.layers.as_mut()) else {
            return TickOutcome::Skipped;
        };

        let viewport = self.host.viewport();
        if surface.viewport() != viewport {
            tracing::debug!(
                scene = self.scene_name,
                width = viewport.width,
                height = viewport.height,
                density = viewport.density,
                "resizing backing surface"
            );
            surface.resize(viewport);
        }
        self.viewport = viewport;
        self.viewport_dirty = false;

        layers.tick(surface, &viewport, self.pointer, now_ms, self.rng.as_mut());
        self.ticks += 1;
        TickOutcome::Drawn
    }

    /// Whether a resize arrived since the last tick.
    pub fn viewport_dirty(&self) -> bool {
        self.viewport_dirty
    }

    /// Stop for good and release host resources. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        if self.state == DriverState::Unmounted {
            return;
        }
        let was_inert = self.state == DriverState::Inert;
        self.state = DriverState::Unmounted;
        if let Some(id) = self.listener.take() {
            self.host.detach_listeners(id);
        }
        if self.pointer_hidden {
            self.host.set_native_pointer_hidden(false);
            self.pointer_hidden = false;
        }
        self.layers = None;
        if !was_inert {
            tracing::info!(scene = self.scene_name, ticks = self.ticks, "unmounted effect surface");
        }
    }
}

impl<H: Host, S: Surface> Drop for SurfaceDriver<H, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
