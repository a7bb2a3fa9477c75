//! Pellet-eating grid game for the terminal.
//!
//! [`game::GameState`] is the whole simulation: a grid of walls and pellets,
//! the player position, score/level, and the pending direction. Everything
//! else here draws that state or feeds it input.

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scene;
pub mod terminal_runtime;
pub mod ticker;
pub mod ui;
