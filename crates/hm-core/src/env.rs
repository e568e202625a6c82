//! The environment facade
//!
//! [`HauntedMansion`] owns the state, its random source and an optional
//! display collaborator, and exposes the reset / step / render / close
//! episode loop.

use serde::{Deserialize, Serialize};

use crate::action::{ACTION_COUNT, IntoAction};
use crate::config::{EnvConfig, METADATA, Metadata, RenderMode};
use crate::error::{EnvError, Result};
use crate::observation::{self, GridView, Info, Observation};
use crate::placement::{self, ResetOptions};
use crate::render::{Frame, RenderAdapter};
use crate::rng::GameRng;
use crate::spaces::{Discrete, ObservationSpace};
use crate::state::GridWorldState;
use crate::transition::{self, RewardRules};

/// Result of one `step` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub observation: Observation,
    pub reward: f64,
    pub terminated: bool,
    pub truncated: bool,
    pub info: Info,
}

/// Grid world where an agent escapes a haunted mansion.
pub struct HauntedMansion {
    config: EnvConfig,
    rules: RewardRules,
    state: GridWorldState,
    rng: GameRng,
    renderer: Option<Box<dyn RenderAdapter>>,
    steps: u64,
    episode_return: f64,
    last_reward: Option<f64>,
    terminated: bool,
}

impl core::fmt::Debug for HauntedMansion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HauntedMansion")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("rng", &self.rng)
            .field("renderer", &self.renderer.is_some())
            .field("steps", &self.steps)
            .field("episode_return", &self.episode_return)
            .field("terminated", &self.terminated)
            .finish()
    }
}

impl HauntedMansion {
    /// Build an environment with an entropy-seeded random source.
    pub fn new(config: EnvConfig) -> Result<Self> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Build an environment around an explicit random source.
    pub fn with_rng(config: EnvConfig, rng: GameRng) -> Result<Self> {
        config.validate()?;
        let state = GridWorldState::new(&config);
        let rules = RewardRules::from_config(&config);
        log::debug!(
            "created {} environment on a {}x{} grid (target {}, features {:?})",
            config.variant,
            config.size,
            config.size,
            state.target(),
            rules.features
        );
        Ok(Self {
            config,
            rules,
            state,
            rng,
            renderer: None,
            steps: 0,
            episode_return: 0.0,
            last_reward: None,
            terminated: false,
        })
    }

    /// Attach the display collaborator used in human mode, replacing any
    /// previous one.
    pub fn attach_renderer(&mut self, renderer: Box<dyn RenderAdapter>) {
        self.renderer = Some(renderer);
    }

    pub fn with_renderer(mut self, renderer: Box<dyn RenderAdapter>) -> Self {
        self.attach_renderer(renderer);
        self
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn state(&self) -> &GridWorldState {
        &self.state
    }

    /// Mutable access for scripted scenarios. Target and counts stay fixed;
    /// the setters on the state keep positions on the board.
    pub fn state_mut(&mut self) -> &mut GridWorldState {
        &mut self.state
    }

    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn episode_return(&self) -> f64 {
        self.episode_return
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn action_space(&self) -> Discrete {
        Discrete { n: ACTION_COUNT }
    }

    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::from_config(&self.config)
    }

    pub fn metadata(&self) -> Metadata {
        METADATA
    }

    /// Start a new episode.
    ///
    /// A seed restarts the random stream; without one the stream continues
    /// from the previous reset. In human mode the new layout is rendered
    /// before returning.
    pub fn reset(
        &mut self,
        seed: Option<u64>,
        options: Option<ResetOptions>,
    ) -> Result<(Observation, Info)> {
        if let Some(seed) = seed {
            self.rng.reseed(seed);
        }
        let options = options.unwrap_or_default();
        placement::place(&mut self.state, &mut self.rng, &options)?;

        self.steps = 0;
        self.episode_return = 0.0;
        self.last_reward = None;
        self.terminated = false;

        log::debug!(
            "reset (seed {:?}, stream seed {}): agent {}, distance {}",
            seed,
            self.rng.seed(),
            self.state.agent(),
            self.info().distance
        );

        if self.config.render_mode == RenderMode::Human {
            self.render()?;
        }
        Ok((self.observation(), self.info()))
    }

    /// Advance one step.
    ///
    /// Invalid actions are rejected before anything changes.
    pub fn step(&mut self, action: impl IntoAction) -> Result<Step> {
        let action = action.into_action()?;
        let t = transition::apply(&mut self.state, &self.rules, action);

        self.steps += 1;
        self.episode_return += t.reward;
        self.last_reward = Some(t.reward);
        self.terminated = t.terminated;

        log::trace!(
            "step {}: {} {} -> {} reward {:.2}{}{}",
            self.steps,
            action,
            t.from,
            t.to,
            t.reward,
            if t.hit_ghost { " (ghost)" } else { "" },
            if t.candies_collected > 0 { " (candy)" } else { "" }
        );
        if t.terminated {
            log::info!(
                "reached the door after {} steps, return {:.2}",
                self.steps,
                self.episode_return
            );
        }

        Ok(Step {
            observation: self.observation(),
            reward: t.reward,
            terminated: t.terminated,
            truncated: t.truncated,
            info: self.info(),
        })
    }

    pub fn observation(&self) -> Observation {
        observation::observation(&self.state, self.rules.features)
    }

    pub fn info(&self) -> Info {
        observation::info(&self.state)
    }

    pub fn grid_view(&self) -> GridView {
        GridView::from_state(&self.state)
    }

    /// Snapshot for display collaborators.
    pub fn frame(&self) -> Frame {
        Frame {
            view: self.grid_view(),
            observation: self.observation(),
            info: self.info(),
            steps: self.steps,
            episode_return: self.episode_return,
            last_reward: self.last_reward,
            terminated: self.terminated,
        }
    }

    /// Draw the current state through the attached adapter.
    ///
    /// No-op in headless mode or when no adapter is attached.
    pub fn render(&mut self) -> Result<()> {
        if self.config.render_mode != RenderMode::Human {
            return Ok(());
        }
        let frame = self.frame();
        match self.renderer.as_mut() {
            Some(renderer) => renderer.render(&frame),
            None => {
                log::trace!("render requested but no adapter is attached");
                Ok(())
            }
        }
    }

    /// Release display resources. Safe to call repeatedly.
    pub fn close(&mut self) -> Result<()> {
        match self.renderer.take() {
            Some(mut renderer) => {
                log::debug!("closing render adapter");
                renderer.close()
            }
            None => Ok(()),
        }
    }
}

impl Drop for HauntedMansion {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            log::warn!("failed to close render adapter: {err}");
        }
    }
}

/// Map an adapter's own error type into [`EnvError::Render`].
pub fn render_error(err: impl core::fmt::Display) -> EnvError {
    EnvError::Render(err.to_string())
}
