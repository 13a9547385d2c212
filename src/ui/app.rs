use crate::config::UiConfig;
use crate::error::MoveError;
use crate::game::{DropOutcome, GameEngine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Duration;

pub struct App {
    engine: GameEngine,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    poll_interval: Duration,
}

impl App {
    pub fn new(engine: GameEngine, ui: &UiConfig) -> Self {
        let selected_column = engine.width() / 2; // Start in middle
        App {
            engine,
            selected_column,
            should_quit: false,
            message: Some("Press Enter to drop a piece".to_string()),
            poll_interval: Duration::from_millis(ui.poll_interval_ms),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.engine.width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                self.drop_piece(column);
            }
            KeyCode::Char('r') => {
                self.engine.restart();
                self.selected_column = self.engine.width() / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop the current player's piece and describe the result
    fn drop_piece(&mut self, column: usize) {
        let player = self.engine.current_player();
        match self.engine.attempt_drop(column) {
            Ok(DropOutcome::Continue(_)) => {
                self.selected_column = column;
            }
            Ok(DropOutcome::Win(winner)) => {
                self.selected_column = column;
                self.message = Some(format!("Player {} won!", self.engine.profile(winner)));
            }
            Ok(DropOutcome::Draw) => {
                self.selected_column = column;
                self.message = Some("Tie!".to_string());
            }
            Ok(DropOutcome::Full) => {
                self.message = Some(format!(
                    "Column {} is full, {} picks again",
                    column + 1,
                    self.engine.profile(player)
                ));
            }
            Err(MoveError::InvalidColumn { width, .. }) => {
                self.message = Some(format!("Pick a column between 1 and {width}"));
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.engine, self.selected_column, &self.message);
    }
}
