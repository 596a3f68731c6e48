//! Named layer compositions.

use super::backdrop::{Backdrop, Veil};
use super::field::FieldConfig;
use super::flyers::FLYER_COUNT;
use super::swarm::SPARKLE_COUNT;
use super::trail::TrailStyle;
use crate::error::{FxError, FxResult};
use crate::surface::Color;

/// Which layers one surface runs. Layers are always drawn in the order the
/// fields appear here.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub name: &'static str,
    pub backdrop: Backdrop,
    pub field: Option<FieldConfig>,
    pub trail: Option<TrailStyle>,
    pub lightning: bool,
    pub veil: Option<Veil>,
    pub swarm: Option<usize>,
    pub flyers: Option<usize>,
    pub cursor: bool,
}

impl Scene {
    pub fn empty(name: &'static str) -> Self {
        Self {
            name,
            backdrop: Backdrop::Clear,
            field: None,
            trail: None,
            lightning: false,
            veil: None,
            swarm: None,
            flyers: None,
            cursor: false,
        }
    }
}

pub fn make_scenes() -> Vec<Scene> {
    vec![
        Scene {
            backdrop: Backdrop::PointerGradient,
            trail: Some(TrailStyle::aura()),
            swarm: Some(SPARKLE_COUNT),
            ..Scene::empty("aurora")
        },
        Scene {
            trail: Some(TrailStyle::neon()),
            ..Scene::empty("neon-trail")
        },
        Scene {
            field: Some(FieldConfig::drift()),
            ..Scene::empty("drift")
        },
        Scene {
            backdrop: Backdrop::Storm,
            field: Some(FieldConfig::storm()),
            lightning: true,
            veil: Some(Veil {
                color: Color::hex(0x0a0020),
                alpha: 0.45,
            }),
            ..Scene::empty("storm")
        },
        Scene {
            flyers: Some(FLYER_COUNT),
            ..Scene::empty("butterflies")
        },
        Scene {
            cursor: true,
            ..Scene::empty("cursor")
        },
    ]
}

pub fn find_scene(name: &str) -> FxResult<Scene> {
    let key = name.trim().to_ascii_lowercase();
    make_scenes()
        .into_iter()
        .find(|s| s.name == key)
        .ok_or_else(|| FxError::unknown_scene(name))
}

/// Stacks of scenes, bottom first.
pub const STAGES: [(&str, &[&str]); 2] = [
    ("portfolio", &["aurora", "neon-trail", "cursor"]),
    ("thriller", &["storm", "butterflies", "cursor"]),
];

pub fn stage_scenes(stage: &str) -> FxResult<Vec<Scene>> {
    let key = stage.trim().to_ascii_lowercase();
    let Some((_, names)) = STAGES.iter().find(|(n, _)| *n == key) else {
        return Err(FxError::unknown_scene(format!("stage '{stage}'")));
    };
    names.iter().map(|n| find_scene(n)).collect()
}
