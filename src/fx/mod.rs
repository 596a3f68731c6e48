pub mod backdrop;
pub mod cursor;
pub mod entropy;
pub mod field;
pub mod flyers;
pub mod lightning;
pub mod motion;
pub mod scenes;
pub mod swarm;
pub mod trail;

pub use backdrop::{Backdrop, Veil};
pub use cursor::{CursorState, PointerCursor, TimedSparkle};
pub use entropy::{Entropy, SequenceEntropy};
pub use field::{EdgePolicy, FieldConfig, Particle, ParticleField};
pub use flyers::{Flyer, FlyerFlock};
pub use lightning::{Bolt, FlashState, LightningFlash};
pub use motion::{Point2D, Viewport};
pub use scenes::{find_scene, make_scenes, stage_scenes, Scene};
pub use swarm::{Sparkle, SparkleSwarm};
pub use trail::{PointerTrail, TrailBuffer, TrailSampling, TrailSegment, TrailStyle};
