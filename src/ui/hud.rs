use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::engine::{GameOverCause, GameState, Phase};

/// Supplemental values displayed alongside the board.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo<'a> {
    pub theme: &'a Theme,
    /// Cause of the game that just ended, if any.
    pub game_over: Option<GameOverCause>,
}

/// Renders the one-line HUD and returns the remaining play area below it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState,
    info: &HudInfo<'_>,
) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let [scores_area, status_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(hud_area);

    frame.render_widget(
        Paragraph::new(score_line(state.score, state.high_score, info.theme))
            .alignment(Alignment::Left),
        scores_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(status_text(state.phase())))
            .alignment(Alignment::Right)
            .style(Style::default().fg(info.theme.hud_label)),
        status_area,
    );

    play_area
}

fn score_line(score: u32, high_score: u32, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.hud_label);
    let value = Style::default().fg(theme.hud_value);
    let high_value = if score > 0 && score == high_score {
        value.fg(theme.snake_head).add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::styled(" Score: ", label),
        Span::styled(score.to_string(), value),
        Span::styled("  │  High: ", label),
        Span::styled(high_score.to_string(), high_value),
    ])
}

fn status_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Ready => "[Space] start ",
        Phase::Running => "[Space] pause ",
        Phase::Paused => "paused ",
        Phase::GameOver => "game over ",
    }
}
