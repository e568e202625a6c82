//! hm-tui: Terminal UI layer using ratatui
//!
//! Provides the terminal front-end for the Haunted Mansion environment.

pub mod app;
pub mod config;
pub mod display;
pub mod input;
pub mod renderer;
pub mod theme;
pub mod widgets;

pub use app::{App, EpisodeSummary};
pub use config::AppConfig;
pub use display::GraphicsMode;
pub use input::Command;
pub use renderer::{RenderError, TerminalRenderer, WINDOW_TITLE};
pub use theme::Theme;
