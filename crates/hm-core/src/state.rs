//! Grid world state
//!
//! Holds the immutable board (size, goal, candy design coordinates) and the
//! mutable positions of the agent, ghosts and candies.

use serde::{Deserialize, Serialize};

use crate::config::EnvConfig;
use crate::error::{EnvError, Result};
use crate::position::Position;

/// Everything the simulation knows about one environment instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWorldState {
    size: i32,
    target: Position,
    agent: Position,
    ghosts: Vec<Position>,
    candies: Vec<Position>,
    candy_design: Vec<Position>,
}

impl GridWorldState {
    /// Build the pre-reset state: agent and ghosts off-board, candies at
    /// their design coordinates.
    pub fn new(config: &EnvConfig) -> Self {
        let candy_design = config.effective_candies().to_vec();
        Self {
            size: config.size,
            target: config.target(),
            agent: Position::SENTINEL,
            ghosts: vec![Position::SENTINEL; config.effective_ghost_count()],
            candies: candy_design.clone(),
            candy_design,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn ghosts(&self) -> &[Position] {
        &self.ghosts
    }

    pub fn candies(&self) -> &[Position] {
        &self.candies
    }

    /// Where candies go back to on reset.
    pub fn candy_design(&self) -> &[Position] {
        &self.candy_design
    }

    /// Candies still on the board.
    pub fn active_candies(&self) -> impl Iterator<Item = &Position> + '_ {
        self.candies.iter().filter(|c| !c.is_sentinel())
    }

    pub fn ghost_at(&self, pos: Position) -> bool {
        self.ghosts.iter().any(|g| *g == pos)
    }

    pub fn agent_at_target(&self) -> bool {
        self.agent == self.target
    }

    /// Move the agent to `pos`, which must be on the board.
    pub fn place_agent(&mut self, pos: Position) -> Result<()> {
        self.check_in_bounds("agent", pos)?;
        self.agent = pos;
        Ok(())
    }

    /// Move ghost `index` to `pos`, which must be on the board.
    pub fn place_ghost(&mut self, index: usize, pos: Position) -> Result<()> {
        self.check_in_bounds("ghost", pos)?;
        let len = self.ghosts.len();
        let slot = self.ghosts.get_mut(index).ok_or_else(|| {
            EnvError::InvalidConfig(format!("ghost index {index} out of range ({len} ghosts)"))
        })?;
        *slot = pos;
        Ok(())
    }

    /// Replace every ghost at once. The count is fixed for the lifetime of
    /// the state.
    pub(crate) fn set_ghosts(&mut self, ghosts: Vec<Position>) {
        debug_assert_eq!(ghosts.len(), self.ghosts.len());
        self.ghosts = ghosts;
    }

    pub(crate) fn set_agent_unchecked(&mut self, pos: Position) {
        self.agent = pos;
    }

    /// Put every candy back at its design coordinate.
    pub fn restore_candies(&mut self) {
        self.candies.clone_from(&self.candy_design);
    }

    /// Remove every active candy at `pos`; returns how many were collected.
    pub fn collect_candies_at(&mut self, pos: Position) -> usize {
        let mut collected = 0;
        for candy in self.candies.iter_mut() {
            if !candy.is_sentinel() && *candy == pos {
                *candy = Position::SENTINEL;
                collected += 1;
            }
        }
        collected
    }

    fn check_in_bounds(&self, what: &str, pos: Position) -> Result<()> {
        if pos.in_bounds(self.size) {
            Ok(())
        } else {
            Err(EnvError::InvalidConfig(format!(
                "{what} position {pos} is outside the {size}x{size} grid",
                size = self.size
            )))
        }
    }
}
