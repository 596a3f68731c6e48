//! Ambient canvas effects (particle fields, pointer trails, lightning,
//! sparkles, flyers and a replacement cursor) rendered into the terminal.

pub mod app;
pub mod capability;
pub mod config;
pub mod driver;
pub mod error;
pub mod fx;
pub mod host;
pub mod page;
pub mod render;
pub mod stage;
pub mod surface;
pub mod terminal;

pub use driver::{DriverState, Layers, SurfaceDriver, TickOutcome};
pub use error::{FxError, FxResult};
pub use host::{Element, Host, InputEvent, ListenerId};
pub use surface::{Color, Glow, Paint, PixelSurface, StrokePaint, Surface};
