//! Grid maze-chase simulation.
//!
//! [`Game`] owns all session state and advances it one [`Game::tick`] at a
//! time. The caller owns the clock (see [`timer::FixedStep`]), forwards
//! input through [`Game::set_queued_direction`], [`Game::toggle_pause`] and
//! [`Game::start_or_reset`], and polls [`Game::snapshot`] to draw.
//!
//! ```
//! use pacman_sim::{config::Variant, Dir, Game, Phase};
//!
//! let mut game = Game::new(Variant::Classic.maze(), Variant::Classic.config()).unwrap();
//! game.start_or_reset();
//! game.set_queued_direction(Dir::Left);
//! game.tick();
//! assert_eq!(game.phase(), Phase::Playing);
//! ```

pub mod components;
pub mod config;
pub mod game;
pub mod ghost;
pub mod level;
pub mod maze;
pub mod movement;
pub mod pellets;
pub mod player;
pub mod timer;

pub use components::{Dir, Mode, PelletKind, Pos};
pub use config::{ConfigError, GameConfig};
pub use game::{Game, GameEvent, Phase, Snapshot};
pub use maze::{Maze, MazeError, Tile};
