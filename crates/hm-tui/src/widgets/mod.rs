//! Ratatui widgets for the board and the episode status

pub mod grid;
pub mod status;

pub use grid::{CELL_WIDTH, GridWidget};
pub use status::StatusWidget;
