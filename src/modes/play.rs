use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{GameConfig, GameLoop, GameStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal game
pub struct PlayMode {
    game: GameLoop,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    paused: bool,
    should_quit: bool,
    outcome_recorded: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let game = GameLoop::new(config).context("Failed to start game")?;

        Ok(Self {
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            paused: false,
            should_quit: false,
            outcome_recorded: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        if let Err(err) = &result {
            error!("Game loop failed: {err:#}");
        }

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render (and poll the simulation clock) at 30 FPS; the game's own
        // timer decides how many ticks each frame runs
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                _ = render_timer.tick() => {
                    self.update_game(Instant::now())?;
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics, self.paused);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quitting with score {}", self.game.score());
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    if !self.paused {
                        self.game.request_heading(direction);
                    }
                }
                KeyAction::Pause => self.toggle_pause(),
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn update_game(&mut self, now: Instant) -> Result<()> {
        if !self.paused && self.game.status().is_running() {
            self.game.poll(now).context("Simulation step failed")?;
        }
        self.record_outcome();
        Ok(())
    }

    /// Count a finished game once, including one that was already won
    /// before its first tick
    fn record_outcome(&mut self) {
        if self.outcome_recorded {
            return;
        }

        let won = match self.game.status() {
            GameStatus::Running => return,
            GameStatus::Won => true,
            GameStatus::Lost(_) => false,
        };
        self.metrics.on_game_over(self.game.score(), won);
        self.outcome_recorded = true;
    }

    fn toggle_pause(&mut self) {
        if self.game.status().is_terminal() {
            return;
        }

        self.paused = !self.paused;
        if self.paused {
            self.metrics.on_pause();
        } else {
            self.game.rebase_clock();
            self.metrics.on_resume();
        }
    }

    fn reset_game(&mut self) -> Result<()> {
        self.game.restart().context("Failed to restart game")?;
        self.metrics.on_game_start();
        self.paused = false;
        self.outcome_recorded = false;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = PlayMode::new(GameConfig::default()).unwrap();
        assert_eq!(mode.game.status(), GameStatus::Running);
        assert_eq!(mode.game.score(), 0);
        assert!(!mode.paused);
    }

    #[test]
    fn test_invalid_config() {
        assert!(PlayMode::new(GameConfig::new(0, 0)).is_err());
    }

    #[test]
    fn test_turn_key_buffers_heading() {
        let mut mode = PlayMode::new(GameConfig::default()).unwrap();
        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(
            mode.game.pending_heading(),
            Some(crate::game::Direction::Up)
        );
    }

    #[test]
    fn test_pause_blocks_updates() {
        let mut mode = PlayMode::new(GameConfig::default()).unwrap();
        let start = Instant::now();
        mode.update_game(start).unwrap();

        mode.handle_event(key(KeyCode::Char('p'))).unwrap();
        assert!(mode.paused);
        mode.update_game(start + Duration::from_secs(1)).unwrap();
        assert_eq!(mode.game.steps(), 0);

        mode.handle_event(key(KeyCode::Char('p'))).unwrap();
        assert!(!mode.paused);
        mode.update_game(start + Duration::from_secs(2)).unwrap();
        assert_eq!(mode.game.steps(), 0);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = PlayMode::new(GameConfig::default()).unwrap();
        mode.game.advance_time(Duration::from_secs(1)).unwrap();
        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        assert_eq!(mode.game.steps(), 0);
        assert_eq!(mode.game.status(), GameStatus::Running);
    }

    #[test]
    fn test_game_won_at_start_is_counted_once() {
        // A 1x1 board is filled by the spawned snake
        let config = GameConfig {
            initial_snake_length: 1,
            ..GameConfig::new(1, 1)
        };
        let mut mode = PlayMode::new(config).unwrap();
        assert_eq!(mode.game.status(), GameStatus::Won);

        let start = Instant::now();
        mode.update_game(start).unwrap();
        mode.update_game(start + Duration::from_secs(1)).unwrap();
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.games_won, 1);

        mode.handle_event(key(KeyCode::Char('r'))).unwrap();
        mode.update_game(start + Duration::from_secs(2)).unwrap();
        assert_eq!(mode.metrics.games_played, 2);
        assert_eq!(mode.metrics.games_won, 2);
    }

    #[test]
    fn test_lost_game_is_counted_once() {
        let config = GameConfig {
            tick_rate_hz: 10.0,
            ..GameConfig::new(6, 3)
        };
        let mut mode = PlayMode::new(config).unwrap();
        let start = Instant::now();
        mode.update_game(start).unwrap();

        // Heading up from the middle row hits the wall on the second tick
        mode.handle_event(key(KeyCode::Up)).unwrap();
        mode.update_game(start + Duration::from_secs(1)).unwrap();
        mode.update_game(start + Duration::from_secs(2)).unwrap();

        assert!(matches!(mode.game.status(), GameStatus::Lost(_)));
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.games_won, 0);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = PlayMode::new(GameConfig::default()).unwrap();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }
}
