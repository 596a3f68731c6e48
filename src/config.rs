use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "ambient-fx", version, about = "Ambient canvas effects for the terminal")]
pub struct Config {
    /// Named stack of scenes to mount, bottom first.
    #[arg(long, default_value = "portfolio")]
    pub stage: String,

    /// Mount these scenes instead of a stage. Repeatable; first is bottom.
    #[arg(long = "scene")]
    pub scenes: Vec<String>,

    #[arg(long, value_enum, default_value_t = RendererMode::HalfBlock)]
    pub renderer: RendererMode,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Backing pixels per logical pixel.
    #[arg(long, default_value_t = 0.5)]
    pub density: f32,

    /// Seed every layer's random source for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub sync_updates: bool,

    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub auto_probe: bool,

    /// Write tracing output here. Logging is off without it.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub list_scenes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RendererMode {
    #[value(name = "half-block", alias = "halfblock", alias = "half_block", alias = "hb")]
    HalfBlock,
    Kitty,
}

impl Config {
    /// Density clamped to something the raster can afford.
    pub fn effective_density(&self) -> f32 {
        if self.density.is_finite() && self.density > 0.0 {
            self.density.clamp(0.25, 2.0)
        } else {
            1.0
        }
    }
}
