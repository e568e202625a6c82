//! Display collaborator seam
//!
//! The core never draws anything itself. In human mode it hands a [`Frame`]
//! to whatever [`RenderAdapter`] the caller attached.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::observation::{GridView, Info, Observation};

/// Snapshot handed to a render adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub view: GridView,
    pub observation: Observation,
    pub info: Info,
    /// Steps taken since the last reset.
    pub steps: u64,
    /// Sum of rewards since the last reset.
    pub episode_return: f64,
    pub last_reward: Option<f64>,
    pub terminated: bool,
}

/// Something that can show frames, e.g. a terminal or a window.
pub trait RenderAdapter {
    /// Draw one frame. Must finish before returning.
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// Release display resources. Called at most once per adapter.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Adapter that keeps every frame it is given.
///
/// Clones share one recording, so a caller can keep a handle after moving
/// the adapter into an environment.
#[derive(Debug, Default, Clone)]
pub struct RecordingAdapter {
    inner: Rc<RefCell<Recording>>,
}

#[derive(Debug, Default)]
struct Recording {
    frames: Vec<Frame>,
    closes: usize,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.inner.borrow().frames.clone()
    }

    pub fn frame_count(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.inner.borrow().frames.last().cloned()
    }

    /// How many times `close` was called.
    pub fn close_count(&self) -> usize {
        self.inner.borrow().closes
    }
}

impl RenderAdapter for RecordingAdapter {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.inner.borrow_mut().frames.push(frame.clone());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.inner.borrow_mut().closes += 1;
        Ok(())
    }
}
