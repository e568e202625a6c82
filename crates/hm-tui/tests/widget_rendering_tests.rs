use hm_core::{EnvConfig, GameRng, GridView, HauntedMansion, Position, RenderAdapter, ResetOptions};
use hm_tui::display::{ClassicGlyphs, FancyGlyphs};
use hm_tui::widgets::{CELL_WIDTH, GridWidget, StatusWidget};
use hm_tui::{GraphicsMode, TerminalRenderer, Theme, WINDOW_TITLE};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position as Cell, Rect};
use ratatui::widgets::Widget;

/// Full 5x5 board: agent (1, 0), ghosts (0, 4) (4, 2) (2, 4), candies at
/// their design cells, door (4, 4).
fn sample_env() -> HauntedMansion {
    let mut env = HauntedMansion::with_rng(EnvConfig::full(), GameRng::new(7)).unwrap();
    env.reset(None, Some(ResetOptions::with_agent_start(Position::new(1, 0))))
        .unwrap();
    for (i, ghost) in [(0, 4), (4, 2), (2, 4)].into_iter().enumerate() {
        env.state_mut().place_ghost(i, ghost.into()).unwrap();
    }
    env
}

fn symbol_at(buf: &Buffer, x: u16, y: u16) -> String {
    buf.cell(Cell::new(x, y)).unwrap().symbol().to_string()
}

/// Board row `y` as rendered, one char per cell.
fn board_row(buf: &Buffer, y: u16, size: u16) -> String {
    (0..size)
        .map(|x| symbol_at(buf, 1 + x * CELL_WIDTH, 1 + y))
        .collect()
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width).map(|x| symbol_at(buf, x, y)).collect()
}

#[test]
fn test_grid_widget_classic_glyphs() {
    let env = sample_env();
    let view = GridView::from_state(env.state());
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 12, 7);
    let mut buf = Buffer::empty(area);

    GridWidget::new(&view, &theme, &ClassicGlyphs).render(area, &mut buf);

    let rows: Vec<String> = (0..5).map(|y| board_row(&buf, y, 5)).collect();
    assert_eq!(rows, [".@.c.", ".....", "..c.G", ".....", "G.G.D"]);
    // Spacer column stays blank.
    assert_eq!(symbol_at(&buf, 2, 1), " ");
}

#[test]
fn test_grid_widget_fancy_glyphs() {
    let env = sample_env();
    let view = GridView::from_state(env.state());
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 12, 7);
    let mut buf = Buffer::empty(area);

    GridWidget::new(&view, &theme, &FancyGlyphs).render(area, &mut buf);

    assert_eq!(symbol_at(&buf, 1 + CELL_WIDTH, 1), "☺");
    assert_eq!(symbol_at(&buf, 1 + 4 * CELL_WIDTH, 5), "▣");
    assert_eq!(symbol_at(&buf, 1, 5), "ᗣ");
}

#[test]
fn test_grid_widget_clips_to_area() {
    let env = sample_env();
    let view = GridView::from_state(env.state());
    let theme = Theme::dark();
    // Room for two cells by two rows only.
    let area = Rect::new(0, 0, 6, 4);
    let mut buf = Buffer::empty(area);

    GridWidget::new(&view, &theme, &ClassicGlyphs).render(area, &mut buf);
    assert_eq!(board_row(&buf, 0, 2), ".@");
    assert_eq!(board_row(&buf, 1, 2), "..");
}

#[test]
fn test_required_size() {
    assert_eq!(GridWidget::required_size(5), (12, 7));
    assert_eq!(GridWidget::required_size(1), (4, 3));
}

#[test]
fn test_status_widget_lines() {
    let mut env = sample_env();
    env.step(hm_core::Action::Right).unwrap();
    let frame = env.frame();
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 60, 2);
    let mut buf = Buffer::empty(area);

    StatusWidget::new(&frame, &theme).render(area, &mut buf);

    let line1 = row_text(&buf, 0);
    assert!(line1.starts_with("Steps:1 Return:-0.10 Dist:6 Last:-0.10 Candy:2/2"));
    assert!(row_text(&buf, 1).contains("r: reset"));
}

#[test]
fn test_status_widget_after_escape() {
    let mut env = HauntedMansion::with_rng(EnvConfig::simple(), GameRng::new(1)).unwrap();
    env.reset(None, Some(ResetOptions::with_agent_start(Position::new(4, 3))))
        .unwrap();
    env.step(1).unwrap();
    let frame = env.frame();
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 60, 2);
    let mut buf = Buffer::empty(area);

    StatusWidget::new(&frame, &theme).render(area, &mut buf);
    assert!(row_text(&buf, 1).starts_with("Escaped the mansion!"));
}

#[test]
fn test_terminal_renderer_draws_title_and_board() {
    let env = sample_env();
    let mut renderer =
        TerminalRenderer::with_backend(TestBackend::new(50, 12), Theme::dark(), GraphicsMode::Classic)
            .unwrap();

    renderer.render(&env.frame()).unwrap();

    let buf = renderer.terminal().backend().buffer();
    assert!(row_text(buf, 0).contains(WINDOW_TITLE));
    assert_eq!(board_row(buf, 0, 5), ".@.c.");
    assert_eq!(board_row(buf, 4, 5), "G.G.D");
    assert!(row_text(buf, 7).starts_with("Steps:0"));

    renderer.close().unwrap();
    renderer.close().unwrap();
    // Frames after close are dropped.
    renderer.render(&env.frame()).unwrap();
}
