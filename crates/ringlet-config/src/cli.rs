//! Command-line overrides for `config.ron`.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// ringlet command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "ringlet", about = "Three spinning tori over a starfield")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Directory containing one texture folder per material set.
    #[arg(long)]
    pub textures: Option<PathBuf>,

    /// RON material manifest to use instead of the built-in one.
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Seed for the star backdrop.
    #[arg(long)]
    pub star_seed: Option<u64>,

    /// Camera distance along Z from the center of the rings.
    #[arg(long)]
    pub camera_depth: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(ref dir) = args.textures {
            self.assets.texture_root = dir.clone();
        }
        if let Some(ref manifest) = args.manifest {
            self.assets.manifest = Some(manifest.clone());
        }
        if let Some(seed) = args.star_seed {
            self.scene.star_seed = seed;
        }
        if let Some(depth) = args.camera_depth {
            self.scene.camera_depth = depth;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            textures: Some(PathBuf::from("/srv/textures")),
            star_seed: Some(7),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.assets.texture_root, PathBuf::from("/srv/textures"));
        assert_eq!(config.scene.star_seed, 7);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.scene.camera_depth, 0.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "ringlet",
            "--camera-depth",
            "14.5",
            "--log-level",
            "debug",
            "--manifest",
            "sets.ron",
        ]);
        assert_eq!(args.camera_depth, Some(14.5));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.manifest, Some(PathBuf::from("sets.ron")));
    }
}
