//! rt86 - renders the reference sphere scene.
//!
//! Usage: `rt86 [settings.json] [output]`
//!
//! Verbosity follows `RUST_LOG` (default `info`).

mod demo_scene;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rt86_renderer::render;

use crate::demo_scene::reference_scene;
use crate::settings::Settings;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load(&PathBuf::from(path))?,
        None => Settings::default(),
    };
    if let Some(output) = args.next() {
        settings.output = PathBuf::from(output);
    }

    let mut rng = match settings.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let scene = reference_scene(&mut rng).context("Failed to build the scene")?;
    info!("Scene of {} spheres built in {:?}", scene.len(), start.elapsed());

    let camera = settings
        .camera
        .build()
        .context("Invalid camera settings")?;

    let image = render(&camera, &scene, &settings.render, &mut rng);
    image.save(&settings.output)?;

    Ok(())
}
