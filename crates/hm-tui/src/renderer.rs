//! Terminal render adapter
//!
//! Draws frames with ratatui. [`TerminalRenderer::stdout`] takes over the
//! real terminal (raw mode, alternate screen, window title) and gives it back
//! on `close` or drop. [`TerminalRenderer::with_backend`] draws into any
//! backend and leaves the host terminal alone.

use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use thiserror::Error;

use hm_core::{EnvError, Frame, RenderAdapter};

use crate::display::{GlyphSet, GraphicsMode, detect_glyph_set};
use crate::theme::Theme;
use crate::widgets::{GridWidget, StatusWidget};

/// Window title and board caption.
pub const WINDOW_TITLE: &str = "Trick or ReTreat: Escape the Mansion!";

/// Failures while driving the terminal.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl From<RenderError> for EnvError {
    fn from(err: RenderError) -> Self {
        EnvError::Render(err.to_string())
    }
}

/// [`RenderAdapter`] backed by a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    theme: Theme,
    glyphs: Box<dyn GlyphSet>,
    /// Raw mode and the alternate screen were entered and must be undone.
    owns_screen: bool,
    closed: bool,
}

impl TerminalRenderer<CrosstermBackend<Stdout>> {
    /// Take over stdout.
    pub fn stdout(theme: Theme, graphics: GraphicsMode) -> Result<Self, RenderError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE)) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        let mut renderer = Self::with_backend(CrosstermBackend::new(stdout), theme, graphics)?;
        renderer.owns_screen = true;
        renderer.terminal.hide_cursor()?;
        log::debug!("terminal renderer attached to stdout");
        Ok(renderer)
    }
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn with_backend(
        backend: B,
        theme: Theme,
        graphics: GraphicsMode,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            theme,
            glyphs: detect_glyph_set(graphics),
            owns_screen: false,
            closed: false,
        })
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Draw one frame: board on top, status lines below.
    pub fn draw(&mut self, frame: &Frame) -> Result<(), RenderError> {
        let theme = &self.theme;
        let glyphs = self.glyphs.as_ref();
        self.terminal.draw(|f| {
            let (grid_w, grid_h) = GridWidget::required_size(frame.view.size());
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(grid_h),
                    Constraint::Length(2),
                    Constraint::Min(0),
                ])
                .split(f.area());

            let grid_area = Rect {
                width: grid_w.max(WINDOW_TITLE.len() as u16 + 2).min(chunks[0].width),
                ..chunks[0]
            };
            f.render_widget(
                GridWidget::new(&frame.view, theme, glyphs).title(WINDOW_TITLE),
                grid_area,
            );
            f.render_widget(StatusWidget::new(frame, theme), chunks[1]);
        })?;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        if self.owns_screen {
            self.owns_screen = false;
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            log::debug!("terminal restored");
        }
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<B: Backend> RenderAdapter for TerminalRenderer<B> {
    fn render(&mut self, frame: &Frame) -> hm_core::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.draw(frame).map_err(EnvError::from)
    }

    fn close(&mut self) -> hm_core::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.restore().map_err(EnvError::from)
    }
}

impl<B: Backend> Drop for TerminalRenderer<B> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Err(err) = self.restore() {
                log::warn!("failed to restore terminal: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_render_error_maps_into_env_error() {
        let err = RenderError::Io(io::Error::other("gone"));
        assert_eq!(
            EnvError::from(err),
            EnvError::Render("terminal I/O failed: gone".into())
        );
    }

    #[test]
    fn test_close_is_idempotent() {
        let backend = TestBackend::new(40, 10);
        let mut renderer =
            TerminalRenderer::with_backend(backend, Theme::dark(), GraphicsMode::Classic).unwrap();
        renderer.close().unwrap();
        renderer.close().unwrap();
        assert!(renderer.is_closed());
    }
}
