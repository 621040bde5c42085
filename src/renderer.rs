use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{CELL_WIDTH, GLYPH_CELL, Theme};
use crate::engine::{GameState, Phase};
use crate::grid::{Grid, Position};
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, grid: Grid, info: HudInfo<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, &info);

    let Some(board) = board_rect(play_area, grid) else {
        render_too_small(frame, play_area, grid, info.theme);
        return;
    };

    let block = Block::bordered()
        .border_style(Style::new().fg(info.theme.border))
        .style(Style::new().bg(info.theme.background));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, state, grid, info.theme);
    render_snake(frame, inner, state, grid, info.theme);

    match state.phase() {
        Phase::Ready => render_start_menu(frame, board, state.high_score, info.theme),
        Phase::Paused => render_pause_menu(frame, board, info.theme),
        Phase::GameOver => render_game_over_menu(
            frame,
            board,
            state.score,
            state.high_score,
            info.game_over,
            info.theme,
        ),
        Phase::Running => {}
    }
}

/// Returns the bordered board centered in `area`, or `None` if it does not fit.
#[must_use]
pub fn board_rect(area: Rect, grid: Grid) -> Option<Rect> {
    let width = grid.size().checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let height = grid.size().checked_add(2)?;
    if width > area.width || height > area.height {
        return None;
    }

    Some(Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    })
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: Grid, theme: &Theme) {
    let needed_width = u32::from(grid.size()) * u32::from(CELL_WIDTH) + 2;
    let needed_height = u32::from(grid.size()) + 3;
    let lines = vec![
        Line::styled(
            "Terminal too small",
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(format!("need {needed_width}x{needed_height}")),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, grid: Grid, theme: &Theme) {
    let Some(food) = state.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, grid, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_CELL, Style::new().fg(theme.food));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, grid: Grid, theme: &Theme) {
    let buffer = frame.buffer_mut();

    // Body first so the head always wins its cell.
    for segment in state.snake.segments().skip(1) {
        if let Some((x, y)) = logical_to_terminal(inner, grid, *segment) {
            buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(theme.snake_body));
        }
    }

    if let Some((x, y)) = logical_to_terminal(inner, grid, state.snake.head()) {
        buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(theme.snake_head));
    }
}

fn logical_to_terminal(inner: Rect, grid: Grid, position: Position) -> Option<(u16, u16)> {
    if !grid.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
