//! Front-end configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `haunted.ron` in the working directory, or an explicit `--config` file
//! 3. Environment variables prefixed with `HAUNTED_`
//!
//! Command-line flags are applied on top by the binary.
//!
//! Example environment variable: `HAUNTED_ENV__SIZE=7`

use std::path::Path;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use hm_core::EnvConfig;

use crate::display::GraphicsMode;

/// Everything the `haunted` binary can be configured with.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub env: EnvConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Episode loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Seed for the first reset; later resets continue the stream
    pub seed: Option<u64>,
    /// Episodes to play in auto and headless modes
    pub episodes: u32,
    /// Play with a random policy instead of the keyboard
    pub auto: bool,
    /// No terminal UI; print a summary per episode
    pub headless: bool,
    /// Step limit per auto/headless episode, so a random walk always ends
    pub max_steps: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            episodes: 1,
            auto: false,
            headless: false,
            max_steps: 1000,
        }
    }
}

/// Terminal display settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub graphics: GraphicsMode,
    /// Force the light palette
    pub light: bool,
}

impl AppConfig {
    /// Load with the default file name `haunted.ron`, or `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let builder = match path {
            Some(path) => Self::defaults()?.add_source(
                File::from(path)
                    .format(FileFormat::Ron)
                    .required(true),
            ),
            None => Self::defaults()?.add_source(
                File::with_name("haunted")
                    .format(FileFormat::Ron)
                    .required(false),
            ),
        };
        let builder = builder.add_source(
            Environment::with_prefix("HAUNTED")
                .prefix_separator("_")
                .separator("__"),
        );
        Self::finish(builder)
            .with_context(|| match path {
                Some(path) => format!("Failed to load configuration from {}", path.display()),
                None => "Failed to load configuration".to_string(),
            })
    }

    /// Defaults overlaid with a RON document, no environment variables.
    pub fn from_ron_str(ron: &str) -> Result<Self> {
        Self::finish(Self::defaults()?.add_source(File::from_str(ron, FileFormat::Ron)))
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        let builder = Config::builder()
            .set_default("env.variant", "full")?
            .set_default("env.size", 5_i64)?
            .set_default("env.step_penalty", 0.1)?
            .set_default("run.episodes", 1_i64)?
            .set_default("run.max_steps", 1000_i64)?
            .set_default("ui.graphics", "auto")?;
        Ok(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;
        let app: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        app.env.validate().context("Invalid environment configuration")?;
        Ok(app)
    }
}
