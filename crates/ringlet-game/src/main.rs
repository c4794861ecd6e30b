//! ringlet: three textured tori spinning over a starfield.
//!
//! Scroll to tilt the rings, move the mouse to orbit the camera, click to
//! toggle their size. Digits `1`..`0` swap materials on the outer ring,
//! with `Shift` on the middle ring and with `Ctrl` on the inner ring.
//!
//! Run with: `cargo run -p ringlet-game`

use std::path::PathBuf;

use clap::Parser;
use ringlet_app::PlatformDirs;
use ringlet_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => Ok(PlatformDirs::resolve_with_root(dir)),
        None => PlatformDirs::resolve(),
    }
    .and_then(|dirs| dirs.create_dirs().map(|()| dirs));

    // Logging needs the configured level, so config problems are reported
    // once the subscriber is up.
    let (mut config, config_problem) = match &dirs {
        Ok(dirs) => match Config::load_or_create(&dirs.config_dir) {
            Ok(config) => (config, None),
            Err(e) => (Config::default(), Some(e.to_string())),
        },
        Err(e) => (Config::default(), Some(e.to_string())),
    };
    config.apply_cli_overrides(&args);

    let log_dir = dirs.as_ref().ok().map(|d| d.log_dir.clone());
    ringlet_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    if let Some(problem) = config_problem {
        warn!("Using default config: {problem}");
    }
    info!(
        "Window: {}x{} | Textures: {}",
        config.window.width,
        config.window.height,
        config.assets.texture_root.display()
    );

    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    if let Err(e) = ringlet_app::run(config, &base_dir) {
        error!("Event loop failed: {e}");
        std::process::exit(1);
    }
}
