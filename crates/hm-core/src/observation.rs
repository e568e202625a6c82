//! Observation and info projections
//!
//! Pure views over [`GridWorldState`]: building them never mutates the state
//! and building them twice gives the same value.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Features;
use crate::position::Position;
use crate::state::GridWorldState;

/// What the agent sees after a reset or step.
///
/// `ghosts` and `candies` are present only when the matching capability is
/// enabled; collected candies show up as [`Position::SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub agent: [i32; 2],
    pub target: [i32; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghosts: Option<Vec<[i32; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candies: Option<Vec<[i32; 2]>>,
}

/// Auxiliary episode information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// L1 distance between agent and target.
    pub distance: f64,
}

pub fn observation(state: &GridWorldState, features: Features) -> Observation {
    let grid = |positions: &[Position]| -> Vec<[i32; 2]> {
        positions.iter().map(|p| p.to_array()).collect()
    };
    Observation {
        agent: state.agent().to_array(),
        target: state.target().to_array(),
        ghosts: features
            .contains(Features::GHOSTS)
            .then(|| grid(state.ghosts())),
        candies: features
            .contains(Features::CANDIES)
            .then(|| grid(state.candies())),
    }
}

pub fn info(state: &GridWorldState) -> Info {
    Info {
        distance: f64::from(state.agent().manhattan(&state.target())),
    }
}

/// What occupies a cell, topmost entity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    Door,
    Ghost,
    Candy,
    Agent,
}

impl Tile {
    pub const fn to_ascii(self) -> char {
        match self {
            Tile::Floor => '.',
            Tile::Door => 'D',
            Tile::Ghost => 'G',
            Tile::Candy => 'c',
            Tile::Agent => '@',
        }
    }
}

/// Renderer-agnostic picture of the board.
///
/// Layers are stacked floor, door, ghosts, candies, agent; later layers hide
/// earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    size: i32,
    tiles: Vec<Tile>,
}

impl GridView {
    pub fn from_state(state: &GridWorldState) -> Self {
        let size = state.size();
        let mut view = Self {
            size,
            tiles: vec![Tile::Floor; (size as usize) * (size as usize)],
        };
        view.paint(state.target(), Tile::Door);
        for ghost in state.ghosts() {
            view.paint(*ghost, Tile::Ghost);
        }
        for candy in state.candies() {
            view.paint(*candy, Tile::Candy);
        }
        view.paint(state.agent(), Tile::Agent);
        view
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    /// Tile at `(x, y)`, or `None` off the board.
    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        Position::new(x, y)
            .in_bounds(self.size)
            .then(|| self.tiles[self.index(x, y)])
    }

    /// Rows from top (`y = 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.size.max(1) as usize)
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.size as usize) + x as usize
    }

    fn paint(&mut self, pos: Position, tile: Tile) {
        // Sentinels and anything off-board are simply not drawn.
        if pos.in_bounds(self.size) {
            let idx = self.index(pos.x, pos.y);
            self.tiles[idx] = tile;
        }
    }
}

impl fmt::Display for GridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|t| t.to_ascii()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
