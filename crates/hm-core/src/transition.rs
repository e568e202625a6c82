//! Step logic
//!
//! Moves the agent one cell, clamped to the board, then scores the move:
//!
//! 1. Reaching the goal pays the goal reward and nothing else.
//! 2. Otherwise landing on a ghost costs `ghost_penalty`.
//! 3. Every active candy on the new cell pays `candy_reward` and is removed.
//! 4. The step penalty is subtracted unconditionally, goal step included.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::config::{EnvConfig, Features};
use crate::position::Position;
use crate::state::GridWorldState;

/// Reward constants and capabilities the transition needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardRules {
    pub features: Features,
    pub goal_reward: f64,
    pub ghost_penalty: f64,
    pub candy_reward: f64,
    pub step_penalty: f64,
}

impl RewardRules {
    pub fn from_config(config: &EnvConfig) -> Self {
        Self {
            features: config.features(),
            goal_reward: config.goal_reward(),
            ghost_penalty: config.ghost_penalty,
            candy_reward: config.candy_reward,
            step_penalty: config.step_penalty,
        }
    }
}

/// What happened during one transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: Position,
    pub to: Position,
    pub reward: f64,
    pub terminated: bool,
    /// Always false; the environment has no step limit.
    pub truncated: bool,
    /// The move was (partly) absorbed by a wall.
    pub bumped: bool,
    pub hit_ghost: bool,
    pub candies_collected: usize,
}

/// Apply `action` to `state` and score the result.
pub fn apply(state: &mut GridWorldState, rules: &RewardRules, action: Action) -> Transition {
    let from = state.agent();
    let wanted = from.offset(action.delta());
    let to = wanted.clamped(state.size());
    state.set_agent_unchecked(to);

    let terminated = to == state.target();
    let mut reward = 0.0;
    let mut hit_ghost = false;
    let mut candies_collected = 0;

    if terminated {
        reward += rules.goal_reward;
    } else {
        if rules.features.contains(Features::GHOSTS) && state.ghost_at(to) {
            hit_ghost = true;
            reward -= rules.ghost_penalty;
        }
        if rules.features.contains(Features::CANDIES) {
            candies_collected = state.collect_candies_at(to);
            reward += rules.candy_reward * candies_collected as f64;
        }
    }

    if rules.features.contains(Features::STEP_PENALTY) {
        reward -= rules.step_penalty;
    }

    Transition {
        from,
        to,
        reward,
        terminated,
        truncated: false,
        bumped: wanted != to,
        hit_ghost,
        candies_collected,
    }
}
