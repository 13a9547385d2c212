//! Terminal UI for playing Connect Four. The UI only talks to the game through
//! [`GameEngine`](crate::game::GameEngine)'s public API.

mod app;
mod game_view;

pub use app::App;
