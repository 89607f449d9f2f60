use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CellState, Fade, GameLoop, GameStatus, Position, Tile};
use crate::metrics::GameMetrics;

const FOOD_RGB: (u8, u8, u8) = (230, 60, 60);
const EMPTY_RGB: (u8, u8, u8) = (60, 60, 60);
const SNAKE_RGB: (u8, u8, u8) = (80, 200, 80);

/// Linear blend from `to` (amount 0) towards `from` (amount 1)
fn blend(from: (u8, u8, u8), to: (u8, u8, u8), amount: f32) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (b as f32 + (a as f32 - b as f32) * amount).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Styled glyph for one tile
fn tile_span(tile: &Tile, head: Position) -> Span<'static> {
    match (tile.state, tile.fade) {
        (CellState::Snake, _) if tile.position == head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        // Freshly eaten food still glows red under the snake
        (CellState::Snake, Some(Fade::Death(death))) => {
            Span::styled("□ ", Style::default().fg(blend(FOOD_RGB, SNAKE_RGB, death)))
        }
        (CellState::Snake, _) => Span::styled("□ ", Style::default().fg(Color::Green)),
        (CellState::Food, fade) => {
            let birth = match fade {
                Some(Fade::Birth(birth)) => birth,
                _ => 0.0,
            };
            Span::styled(
                "O ",
                Style::default()
                    .fg(blend(EMPTY_RGB, FOOD_RGB, birth))
                    .add_modifier(Modifier::BOLD),
            )
        }
        (CellState::Empty, Some(Fade::Death(death))) => {
            Span::styled("o ", Style::default().fg(blend(FOOD_RGB, EMPTY_RGB, death)))
        }
        (CellState::Empty, _) => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: Rng>(
        &self,
        frame: &mut Frame,
        game: &GameLoop<R>,
        metrics: &GameMetrics,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(game, metrics, paused);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match game.status() {
            GameStatus::Running => {
                let grid = self.render_grid(game_area, game);
                frame.render_widget(grid, game_area);
            }
            status => {
                let game_over = self.render_game_over(status, game.score());
                frame.render_widget(game_over, game_area);
            }
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid<R: Rng>(&self, _area: Rect, game: &GameLoop<R>) -> Paragraph<'static> {
        let cols = game.grid().cols();
        let head = game.snake().head();

        let spans: Vec<Span<'static>> = game.tiles().map(|tile| tile_span(&tile, head)).collect();
        let lines: Vec<Line<'static>> = spans
            .chunks(cols.max(1))
            .map(|row| Line::from(row.to_vec()))
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<R: Rng>(
        &self,
        game: &GameLoop<R>,
        metrics: &GameMetrics,
        paused: bool,
    ) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                game.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ];

        if paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, status: GameStatus, score: u32) -> Paragraph<'static> {
        let (title, color) = match status {
            GameStatus::Won => ("YOU WIN", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Magenta)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(state: CellState, fade: Option<Fade>) -> Tile {
        Tile {
            position: Position::new(1, 1),
            state,
            fade,
        }
    }

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(blend(FOOD_RGB, EMPTY_RGB, 1.0), Color::Rgb(230, 60, 60));
        assert_eq!(blend(FOOD_RGB, EMPTY_RGB, 0.0), Color::Rgb(60, 60, 60));
        assert_eq!(blend(FOOD_RGB, EMPTY_RGB, 2.0), Color::Rgb(230, 60, 60));
    }

    #[test]
    fn test_food_fades_in() {
        let head = Position::new(0, 0);
        let newborn = tile_span(&tile(CellState::Food, Some(Fade::Birth(1.0))), head);
        let grown = tile_span(&tile(CellState::Food, Some(Fade::Birth(0.0))), head);

        assert_eq!(newborn.style.fg, Some(Color::Rgb(60, 60, 60)));
        assert_eq!(grown.style.fg, Some(Color::Rgb(230, 60, 60)));
    }

    #[test]
    fn test_head_glyph() {
        let span = tile_span(&tile(CellState::Snake, None), Position::new(1, 1));
        assert_eq!(span.content, "■ ");
        assert_eq!(span.style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_empty_glyph() {
        let span = tile_span(&tile(CellState::Empty, None), Position::new(0, 0));
        assert_eq!(span.content, ". ");
    }
}
