pub mod cli_renderer;
pub mod entity;
pub mod error;
pub mod game;
pub mod grid;
pub mod renderer;

mod capture;

pub use cli_renderer::CliRenderer;
pub use entity::{Direction, LandEnemy, Player, Position, SeaEnemy};
pub use error::GameError;
pub use game::{Game, GameConfig, Snapshot};
pub use grid::{Cell, Grid};
pub use renderer::{Input, Renderer};
