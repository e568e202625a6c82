//! hm-core: Haunted Mansion grid-world environment
//!
//! An agent starts somewhere on an N x N board and has to reach the door.
//! The full variant adds ghosts to avoid, candies to collect and a per-step
//! penalty. This crate holds all environment logic with no I/O; drawing is
//! delegated to a [`RenderAdapter`] supplied by the caller.

pub mod action;
pub mod config;
pub mod env;
pub mod error;
pub mod observation;
pub mod placement;
pub mod position;
pub mod render;
pub mod rng;
pub mod spaces;
pub mod state;
pub mod transition;

pub use action::{ACTION_COUNT, Action, IntoAction};
pub use config::{EnvConfig, Features, METADATA, Metadata, RenderMode, Variant};
pub use env::{HauntedMansion, Step};
pub use error::{EnvError, Result};
pub use observation::{GridView, Info, Observation, Tile};
pub use placement::ResetOptions;
pub use position::Position;
pub use render::{Frame, RecordingAdapter, RenderAdapter};
pub use rng::GameRng;
pub use spaces::{BoxSpace, Discrete, ObservationSpace};
pub use state::GridWorldState;
