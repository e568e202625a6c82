//! Reset-time placement
//!
//! Draws a fresh episode layout: the agent anywhere on the board, each ghost
//! by rejection sampling away from the agent, the goal, the candy design
//! coordinates and the ghosts already placed. Candies go back to their
//! design coordinates.
//!
//! Rejection sampling is capped at [`MAX_PLACEMENT_ATTEMPTS`] draws per ghost,
//! and a capacity check runs before any draw, so a board too small for its
//! occupants fails with [`EnvError::DegenerateConfiguration`] instead of
//! looping forever.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{EnvError, Result};
use crate::position::Position;
use crate::rng::GameRng;
use crate::state::GridWorldState;

/// Draws allowed per ghost before placement gives up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 4096;

/// Per-reset overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResetOptions {
    /// Start the agent here instead of drawing its cell.
    pub agent_start: Option<Position>,
}

impl ResetOptions {
    pub fn with_agent_start(pos: Position) -> Self {
        Self {
            agent_start: Some(pos),
        }
    }
}

/// Lay out a new episode on `state`.
///
/// On error the state is left untouched.
pub fn place(state: &mut GridWorldState, rng: &mut GameRng, options: &ResetOptions) -> Result<()> {
    let size = state.size();
    let ghost_count = state.ghosts().len();

    check_capacity(state)?;

    let agent = match options.agent_start {
        Some(pos) if pos.in_bounds(size) => pos,
        Some(pos) => {
            return Err(EnvError::InvalidConfig(format!(
                "agent start {pos} is outside the {size}x{size} grid"
            )));
        }
        None => rng.random_cell(size),
    };

    let mut ghosts: Vec<Position> = Vec::with_capacity(ghost_count);
    for slot in 0..ghost_count {
        let ghost = draw_ghost(state, rng, agent, &ghosts).ok_or_else(|| {
            log::warn!(
                "ghost {} could not be placed after {} draws on a {}x{} grid",
                slot,
                MAX_PLACEMENT_ATTEMPTS,
                size,
                size
            );
            EnvError::DegenerateConfiguration {
                size,
                ghosts: ghost_count,
                attempts: MAX_PLACEMENT_ATTEMPTS,
            }
        })?;
        ghosts.push(ghost);
    }

    state.set_agent_unchecked(agent);
    state.set_ghosts(ghosts);
    state.restore_candies();

    log::debug!(
        "placed agent at {} with ghosts {:?} (target {})",
        agent,
        state.ghosts(),
        state.target()
    );
    Ok(())
}

/// True if a ghost may stand on `cell` given what is already placed.
pub fn ghost_cell_allowed(
    state: &GridWorldState,
    agent: Position,
    placed: &[Position],
    cell: Position,
) -> bool {
    cell != agent
        && cell != state.target()
        && !state.candy_design().contains(&cell)
        && !placed.contains(&cell)
}

fn draw_ghost(
    state: &GridWorldState,
    rng: &mut GameRng,
    agent: Position,
    placed: &[Position],
) -> Option<Position> {
    (0..MAX_PLACEMENT_ATTEMPTS)
        .map(|_| rng.random_cell(state.size()))
        .find(|&cell| ghost_cell_allowed(state, agent, placed, cell))
}

/// Fail fast when the board cannot fit every ghost, assuming the agent
/// takes up one of the free cells.
fn check_capacity(state: &GridWorldState) -> Result<()> {
    let ghost_count = state.ghosts().len();
    if ghost_count == 0 {
        return Ok(());
    }

    let size = state.size();
    let cells = (size as usize) * (size as usize);
    let reserved: HashSet<Position> = state
        .candy_design()
        .iter()
        .copied()
        .chain(std::iter::once(state.target()))
        .filter(|p| p.in_bounds(size))
        .collect();
    // Budget one cell for the agent.
    let free = cells.saturating_sub(reserved.len() + 1);

    if free < ghost_count {
        log::warn!(
            "{} ghost(s) need {} free cell(s) but a {}x{} grid leaves {}",
            ghost_count,
            ghost_count,
            size,
            size,
            free
        );
        return Err(EnvError::DegenerateConfiguration {
            size,
            ghosts: ghost_count,
            attempts: 0,
        });
    }
    Ok(())
}
