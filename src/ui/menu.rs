use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::engine::GameOverCause;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, theme: &Theme) {
    let high_score_line = format!("High score: {high_score}");
    let lines = [
        "SNAKE",
        "",
        high_score_line.as_str(),
        "",
        "[Space] Start",
        "[Q] Quit",
        "",
        "Arrows/WASD to move",
    ];

    render_popup(frame, area, " start ", &lines, theme);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = ["PAUSED", "", "[Space] Resume", "[R] Restart", "[Q] Quit"];

    render_popup(frame, area, " pause ", &lines, theme);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    cause: Option<GameOverCause>,
    theme: &Theme,
) {
    let score_line = format!("Your score: {score}");
    let high_score_line = format!("High score: {high_score}");
    let cause_line = match cause {
        Some(GameOverCause::SelfCollision) => "You ran into yourself",
        Some(GameOverCause::BoardFilled) => "Board filled!",
        None => "",
    };
    let new_high = if score > 0 && score == high_score {
        "New high score!"
    } else {
        ""
    };
    let lines = [
        "GAME OVER",
        "",
        score_line.as_str(),
        high_score_line.as_str(),
        cause_line,
        new_high,
        "",
        "[Space]/[R] Play again",
        "[Q] Quit",
    ];

    render_popup(frame, area, " game over ", &lines, theme);
}

/// First line is the title; the rest is body text.
fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: &[&str], theme: &Theme) {
    let popup = popup_rect(area, lines);
    frame.render_widget(Clear, popup);

    let text: Vec<Line<'_>> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                let title = Style::default()
                    .fg(theme.menu_title)
                    .add_modifier(Modifier::BOLD);
                Line::styled(*line, title)
            } else {
                Line::from(*line)
            }
        })
        .collect();

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(theme.menu_footer)),
        ),
        popup,
    );
}

fn popup_rect(area: Rect, lines: &[&str]) -> Rect {
    let text_width = lines.iter().map(|line| line.width()).max().unwrap_or(0);
    let width = u16::try_from(text_width + 6).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
