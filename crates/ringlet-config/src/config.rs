//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Scene tuning: smoothing, camera, starfield, and click toggle.
    pub scene: SceneConfig,
    /// Texture and material manifest locations.
    pub assets: AssetConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Scene tuning constants.
///
/// Smoothing coefficients are applied once per rendered frame, so changing
/// the display refresh rate changes the apparent lag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Multiplier applied to raw wheel deltas before accumulation.
    pub scroll_speed: f32,
    /// Per-frame smoothing coefficient for the scroll offset, in (0, 1].
    pub scroll_smoothing: f32,
    /// Per-frame smoothing coefficient for the cursor offset, in (0, 1].
    pub mouse_smoothing: f32,
    /// Camera displacement (x, y) at a fully off-center cursor.
    pub gaze_range: (f32, f32),
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Camera position along Z. The camera always looks at the origin.
    pub camera_depth: f32,
    /// Number of stars in the backdrop.
    pub star_count: u32,
    /// Seed for star placement.
    pub star_seed: u64,
    /// Inner radius of the star shell.
    pub star_inner_radius: f32,
    /// Outer radius of the star shell.
    pub star_outer_radius: f32,
    /// Star sprite size in world units at unit distance.
    pub star_size: f32,
    /// Scale the click toggle shrinks to.
    pub toggle_min_scale: f32,
    /// Scale the click toggle grows to; also the "large" threshold.
    pub toggle_max_scale: f32,
    /// Duration of the scale tween in seconds.
    pub tween_seconds: f32,
    /// Curve the scale tween follows.
    pub toggle_easing: EasingCurve,
}

/// Named easing curves for the click toggle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EasingCurve {
    Linear,
    EaseOut,
    #[default]
    BounceOut,
}

/// Asset locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Root directory holding one sub-directory per material set.
    pub texture_root: PathBuf,
    /// Optional RON material manifest replacing the built-in one.
    pub manifest: Option<PathBuf>,
    /// Number of background threads decoding textures.
    pub loader_threads: usize,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Pixels per wheel line, used to convert line-based wheel deltas.
    pub wheel_line_height_px: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Mirror loading progress and material assignments into the window title.
    pub show_status_in_title: bool,
}

// --- Defaults ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
            title: "ringlet".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 0.005,
            scroll_smoothing: 0.1,
            mouse_smoothing: 0.07,
            gaze_range: (70.0, 30.0),
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            camera_depth: 0.0,
            star_count: 2000,
            star_seed: 0x5EED,
            star_inner_radius: 200.0,
            star_outer_radius: 500.0,
            star_size: 2.0,
            toggle_min_scale: 0.5,
            toggle_max_scale: 3.0,
            tween_seconds: 1.0,
            toggle_easing: EasingCurve::BounceOut,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_root: PathBuf::from("assets/texturas"),
            manifest: None,
            loader_threads: 4,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_line_height_px: 100.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_status_in_title: true,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Resolve the directory holding `config.ron`.
    ///
    /// An explicit override wins; otherwise the platform config directory is
    /// used (`~/.config/ringlet` on Linux).
    pub fn resolve_dir(override_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match override_dir {
            Some(dir) => Ok(dir.to_path_buf()),
            None => dirs::config_dir()
                .map(|d| d.join("ringlet"))
                .ok_or(ConfigError::NoConfigDir),
        }
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Reject values the scene cannot run with.
    ///
    /// Smoothing only converges without overshoot for coefficients in (0, 1],
    /// and the click toggle needs `0 < toggle_min_scale < toggle_max_scale`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scene = &self.scene;
        let coefficient = |field, value: f32| {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be in (0, 1]",
                })
            }
        };
        coefficient("scene.scroll_smoothing", scene.scroll_smoothing)?;
        coefficient("scene.mouse_smoothing", scene.mouse_smoothing)?;

        if scene.toggle_min_scale <= 0.0 || scene.toggle_min_scale.is_nan() {
            return Err(ConfigError::InvalidValue {
                field: "scene.toggle_min_scale",
                reason: "must be positive",
            });
        }
        if scene.toggle_max_scale > scene.toggle_min_scale {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "scene.toggle_max_scale",
                reason: "must be greater than toggle_min_scale",
            })
        }
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
