use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Movement intent for the player.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Stopped,
}

impl Direction {
    /// Returns the unit `(dx, dy)` step for this direction.
    ///
    /// Rows grow downwards, so `Up` decreases `y`.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Stopped => (0, 0),
        }
    }

    /// Returns true for every direction except `Stopped`.
    #[must_use]
    pub fn is_moving(self) -> bool {
        self != Self::Stopped
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Help,
    Quit,
    /// A key press with no binding.
    Unmapped,
}

/// Keyboard handling options.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct InputConfig {
    /// Treat unbound keys as an explicit stop request.
    pub stop_on_unmapped: bool,
}

/// Polls crossterm for key presses and translates them into [`GameInput`].
#[derive(Debug, Clone)]
pub struct InputHandler {
    config: InputConfig,
}

impl InputHandler {
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self { config }
    }

    /// Waits up to `timeout` for one key press.
    ///
    /// Non-key events and key releases/repeats yield `Ok(None)`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(self.translate(key))),
            _ => Ok(None),
        }
    }

    /// Maps a key press, applying the unbound-key policy.
    #[must_use]
    pub fn translate(&self, key: KeyEvent) -> GameInput {
        match map_key(key) {
            GameInput::Unmapped if self.config.stop_on_unmapped => {
                GameInput::Direction(Direction::Stopped)
            }
            other => other,
        }
    }
}

/// Maps one key press onto a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> GameInput {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return GameInput::Quit;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Char('h' | 'H' | '?') => GameInput::Help,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => GameInput::Unmapped,
    }
}
