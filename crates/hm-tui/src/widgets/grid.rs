//! Board display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use hm_core::{GridView, Tile};

use crate::display::GlyphSet;
use crate::theme::Theme;

/// Terminal columns per board cell. The second column stays blank so the
/// board looks roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Widget for rendering the board inside a titled border.
pub struct GridWidget<'a> {
    view: &'a GridView,
    theme: &'a Theme,
    glyphs: &'a dyn GlyphSet,
    title: &'a str,
}

impl<'a> GridWidget<'a> {
    pub fn new(view: &'a GridView, theme: &'a Theme, glyphs: &'a dyn GlyphSet) -> Self {
        Self {
            view,
            theme,
            glyphs,
            title: "",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Outer size needed to show the whole board, border included.
    pub fn required_size(size: i32) -> (u16, u16) {
        let n = u16::try_from(size.max(0)).unwrap_or(u16::MAX);
        (
            n.saturating_mul(CELL_WIDTH).saturating_add(2),
            n.saturating_add(2),
        )
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(Span::styled(
                self.title,
                Style::default().fg(self.theme.accent).bold(),
            ));

        let inner = block.inner(area);
        block.render(area, buf);

        let cols = (inner.width / CELL_WIDTH) as i32;
        let rows = inner.height as i32;

        for (y, row) in self.view.rows().enumerate().take(rows.max(0) as usize) {
            for (x, tile) in row.iter().enumerate().take(cols.max(0) as usize) {
                let mut style = Style::default().fg(self.theme.tile_color(*tile));
                if *tile == Tile::Agent {
                    style = style.bold();
                }
                let pos = Position::new(inner.x + x as u16 * CELL_WIDTH, inner.y + y as u16);
                if let Some(cell) = buf.cell_mut(pos) {
                    cell.set_char(self.glyphs.tile_char(*tile));
                    cell.set_style(style);
                }
            }
        }
    }
}
