//! Configuration for ringlet.
//!
//! Runtime settings persist to disk as a RON file and can be overridden from
//! the command line via clap. Every section falls back to defaults for missing
//! fields, so older files keep loading as new settings appear.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AssetConfig, Config, DebugConfig, EasingCurve, InputConfig, SceneConfig, WindowConfig,
};
pub use error::ConfigError;
