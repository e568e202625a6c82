//! Environment construction options
//!
//! The two feature tiers (a bare goal-reaching grid and the full haunted
//! mansion with ghosts, candies and a step penalty) are one environment
//! parameterized by a capability set. [`Variant`] picks the preset; every
//! field can still be overridden individually.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

use crate::error::{EnvError, Result};
use crate::position::Position;

/// Default grid dimension.
pub const DEFAULT_SIZE: i32 = 5;

/// Default per-step penalty of the full variant.
pub const DEFAULT_STEP_PENALTY: f64 = 0.1;

/// Default number of ghosts of the full variant.
pub const DEFAULT_GHOST_COUNT: usize = 3;

/// Design coordinates of the candies of the full variant.
pub const DEFAULT_CANDIES: [Position; 2] = [Position::new(2, 2), Position::new(3, 0)];

bitflags! {
    /// Capabilities enabled for an environment
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Features: u8 {
        /// Static hazards placed at reset; stepping on one costs `ghost_penalty`.
        const GHOSTS = 0x01;
        /// Collectibles at fixed design coordinates.
        const CANDIES = 0x02;
        /// Constant cost subtracted on every step.
        const STEP_PENALTY = 0x04;
    }
}

/// Feature tier presets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Agent and door only; +1 on reaching the door.
    Simple,
    /// Ghosts, candies and a step penalty; +10 on reaching the door.
    #[default]
    Full,
}

impl Variant {
    pub const fn features(self) -> Features {
        match self {
            Variant::Simple => Features::empty(),
            Variant::Full => Features::all(),
        }
    }

    pub const fn goal_reward(self) -> f64 {
        match self {
            Variant::Simple => 1.0,
            Variant::Full => 10.0,
        }
    }
}

/// Whether a display collaborator is driven by the environment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, VariantNames, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Render through the attached adapter after every reset and on demand.
    Human,
    /// No display; `render` is a no-op.
    #[default]
    Headless,
}

/// Fixed environment metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub render_modes: &'static [&'static str],
    pub render_fps: u32,
}

pub const METADATA: Metadata = Metadata {
    render_modes: &["human"],
    render_fps: 1,
};

/// Construction options for [`crate::HauntedMansion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Feature tier preset.
    pub variant: Variant,
    /// Grid dimension N (grid is N x N).
    pub size: i32,
    pub render_mode: RenderMode,
    /// Subtracted every step when `STEP_PENALTY` is enabled.
    pub step_penalty: f64,
    /// Overrides the capabilities implied by `variant`.
    pub features: Option<Features>,
    /// Goal cell; defaults to the bottom-right corner.
    pub target: Option<Position>,
    pub ghost_count: usize,
    /// Candy design coordinates, restored on every reset.
    pub candies: Vec<Position>,
    /// Overrides the goal reward implied by `variant`.
    pub goal_reward: Option<f64>,
    pub ghost_penalty: f64,
    pub candy_reward: f64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl EnvConfig {
    /// The full haunted mansion: 3 ghosts, 2 candies, 0.1 step penalty.
    pub fn full() -> Self {
        Self {
            variant: Variant::Full,
            size: DEFAULT_SIZE,
            render_mode: RenderMode::Headless,
            step_penalty: DEFAULT_STEP_PENALTY,
            features: None,
            target: None,
            ghost_count: DEFAULT_GHOST_COUNT,
            candies: DEFAULT_CANDIES.to_vec(),
            goal_reward: None,
            ghost_penalty: 7.0,
            candy_reward: 3.0,
        }
    }

    /// Agent and door only.
    pub fn simple() -> Self {
        Self {
            variant: Variant::Simple,
            ..Self::full()
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Simple => Self::simple(),
            Variant::Full => Self::full(),
        }
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    pub fn with_step_penalty(mut self, step_penalty: f64) -> Self {
        self.step_penalty = step_penalty;
        self
    }

    pub fn with_target(mut self, target: Position) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = Some(features);
        self
    }

    /// Effective capability set.
    pub fn features(&self) -> Features {
        self.features.unwrap_or_else(|| self.variant.features())
    }

    pub fn goal_reward(&self) -> f64 {
        self.goal_reward.unwrap_or_else(|| self.variant.goal_reward())
    }

    /// Effective goal cell.
    pub fn target(&self) -> Position {
        self.target
            .unwrap_or_else(|| Position::new(self.size - 1, self.size - 1))
    }

    /// Number of ghosts actually placed (zero without `GHOSTS`).
    pub fn effective_ghost_count(&self) -> usize {
        if self.features().contains(Features::GHOSTS) {
            self.ghost_count
        } else {
            0
        }
    }

    /// Candy design coordinates actually used (empty without `CANDIES`).
    pub fn effective_candies(&self) -> &[Position] {
        if self.features().contains(Features::CANDIES) {
            &self.candies
        } else {
            &[]
        }
    }

    /// Check the options before an environment is built from them.
    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(EnvError::InvalidConfig(format!(
                "size must be at least 1, got {}",
                self.size
            )));
        }

        let target = self.target();
        if !target.in_bounds(self.size) {
            return Err(EnvError::InvalidConfig(format!(
                "target {} is outside the {}x{} grid",
                target, self.size, self.size
            )));
        }

        if !self.step_penalty.is_finite() || self.step_penalty < 0.0 {
            return Err(EnvError::InvalidConfig(format!(
                "step_penalty must be a non-negative number, got {}",
                self.step_penalty
            )));
        }

        for (name, value) in [
            ("goal_reward", self.goal_reward()),
            ("ghost_penalty", self.ghost_penalty),
            ("candy_reward", self.candy_reward),
        ] {
            if !value.is_finite() {
                return Err(EnvError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        let candies = self.effective_candies();
        for (i, candy) in candies.iter().enumerate() {
            if !candy.in_bounds(self.size) {
                return Err(EnvError::InvalidConfig(format!(
                    "candy {} at {} is outside the {}x{} grid",
                    i, candy, self.size, self.size
                )));
            }
            if candies[..i].contains(candy) {
                return Err(EnvError::InvalidConfig(format!(
                    "candy {} duplicates design coordinate {}",
                    i, candy
                )));
            }
        }

        Ok(())
    }
}
