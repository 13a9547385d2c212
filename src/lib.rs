//! # Connect Four
//!
//! Rules and turn logic for two-player Connect Four, with a terminal front end
//! built on Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, game engine
//! - [`ui`] — Terminal UI: translates key presses into drops and outcomes
//!   into messages
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
