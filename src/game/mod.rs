//! Core Connect Four game logic: board representation, player types, and the
//! game engine that applies drops and detects wins and draws.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, Line, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_DIMENSION, WIN_LENGTH};
pub use engine::{DropOutcome, GameEngine, GameOutcome};
pub use player::{Player, PlayerProfile};
pub use crate::error::MoveError;
