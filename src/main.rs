use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::sync::Mutex;

fn main() -> Result<()> {
    let cfg = ambient_fx::config::Config::parse();

    if let Some(path) = cfg.log_file.as_ref() {
        let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
        // stdout belongs to the renderer, so tracing only ever goes to a file.
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    if cfg.list_scenes {
        for scene in ambient_fx::fx::make_scenes() {
            println!("{}", scene.name);
        }
        for (stage, scenes) in ambient_fx::fx::scenes::STAGES {
            println!("stage {stage}: {}", scenes.join(" + "));
        }
        return Ok(());
    }

    ambient_fx::app::run(cfg)
}
