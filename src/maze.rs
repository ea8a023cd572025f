//! Immutable maze grid built from a text layout.
//!
//! Layout characters:
//!
//! | char | tile |
//! |------|------|
//! | `#`  | wall |
//! | ` `  | floor |
//! | `.`  | pellet |
//! | `o`  | power pellet |
//! | `-`  | ghost-house gate |
//! | `P`  | player start (floor) |
//! | `G`  | ghost start (floor) |

use thiserror::Error;

use crate::components::{PelletKind, Pos};
use crate::movement::Walker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Pellet,
    Power,
    Gate,
}

impl Tile {
    pub fn pellet(self) -> Option<PelletKind> {
        match self {
            Tile::Pellet => Some(PelletKind::Normal),
            Tile::Power => Some(PelletKind::Power),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze layout has no rows")]
    Empty,
    #[error("row {row} is {len} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown cell {ch:?} at ({x}, {y})")]
    UnknownCell { ch: char, x: usize, y: usize },
    #[error("maze must mark exactly one player start, found {0}")]
    PlayerStart(usize),
    #[error("maze marks no ghost starts")]
    NoGhosts,
    #[error("maze holds no pellets")]
    NoPellets,
}

#[derive(Debug, Clone)]
pub struct Maze {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    player_start: Pos,
    ghost_starts: Vec<Pos>,
    ghosts_pass_gates: bool,
}

impl Maze {
    /// Parse a layout, one string per row.
    ///
    /// Every row must have the same width. Exactly one `P`, at least one
    /// `G` and at least one pellet are required. Gates are open to ghosts;
    /// see [`Maze::with_closed_gates`].
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, MazeError> {
        let first = rows.first().ok_or(MazeError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(MazeError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut player_starts = Vec::new();
        let mut ghost_starts = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(MazeError::Ragged {
                    row: y,
                    len,
                    expected: width,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let tile = match ch {
                    '#' => Tile::Wall,
                    ' ' => Tile::Floor,
                    '.' => Tile::Pellet,
                    'o' => Tile::Power,
                    '-' => Tile::Gate,
                    'P' => {
                        player_starts.push(Pos { x, y });
                        Tile::Floor
                    }
                    'G' => {
                        ghost_starts.push(Pos { x, y });
                        Tile::Floor
                    }
                    _ => return Err(MazeError::UnknownCell { ch, x, y }),
                };
                tiles.push(tile);
            }
        }

        if player_starts.len() != 1 {
            return Err(MazeError::PlayerStart(player_starts.len()));
        }
        if ghost_starts.is_empty() {
            return Err(MazeError::NoGhosts);
        }
        if !tiles.iter().any(|t| t.pellet().is_some()) {
            return Err(MazeError::NoPellets);
        }

        Ok(Self {
            width,
            height: rows.len(),
            tiles,
            player_start: player_starts[0],
            ghost_starts,
            ghosts_pass_gates: true,
        })
    }

    /// Make gates block ghosts as well as the player.
    pub fn with_closed_gates(mut self) -> Self {
        self.ghosts_pass_gates = false;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn player_start(&self) -> Pos {
        self.player_start
    }

    pub fn ghost_starts(&self) -> &[Pos] {
        &self.ghost_starts
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Tile at an in-bounds position.
    ///
    /// # Panics
    ///
    /// Panics when `pos` lies outside the grid.
    pub fn tile(&self, pos: Pos) -> Tile {
        assert!(
            self.in_bounds(pos),
            "maze lookup at ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        self.tiles[pos.y * self.width + pos.x]
    }

    /// Wall test from the player's side: true outside the grid, on walls
    /// and on gates. Gates always block the player; [`Maze::with_closed_gates`]
    /// makes them block ghosts too.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.blocks(pos, Walker::Player)
    }

    pub fn blocks(&self, pos: Pos, walker: Walker) -> bool {
        if !self.in_bounds(pos) {
            return true;
        }
        match self.tile(pos) {
            Tile::Wall => true,
            Tile::Gate => walker == Walker::Player || !self.ghosts_pass_gates,
            _ => false,
        }
    }

    /// Every pellet-bearing cell in row-major order.
    pub fn pellet_cells(&self) -> impl Iterator<Item = (Pos, PelletKind)> + '_ {
        self.tiles.iter().enumerate().filter_map(move |(idx, tile)| {
            tile.pellet().map(|kind| {
                (
                    Pos {
                        x: idx % self.width,
                        y: idx / self.width,
                    },
                    kind,
                )
            })
        })
    }
}
