use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Dir, Mode, Pos};
use crate::maze::Maze;
use crate::movement::{attempt_move, Walker};

/// Display identity. Has no effect on behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostKind {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl GhostKind {
    const ORDER: [GhostKind; 4] = [
        GhostKind::Blinky,
        GhostKind::Pinky,
        GhostKind::Inky,
        GhostKind::Clyde,
    ];

    /// Kind for the ghost spawned at `index`, cycling through the four.
    pub fn for_index(index: usize) -> Self {
        Self::ORDER[index % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub kind: GhostKind,
    pub pos: Pos,
    pub spawn: Pos,
}

impl Ghost {
    pub fn new(index: usize, spawn: Pos) -> Self {
        Self {
            kind: GhostKind::for_index(index),
            pos: spawn,
            spawn,
        }
    }

    pub fn respawn(&mut self) {
        self.pos = self.spawn;
    }
}

/// How every ghost in a session picks its next step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GhostPolicy {
    /// Step that locally minimizes (pursuit) or maximizes (reversed) the
    /// Manhattan distance to the player.
    #[default]
    Greedy,
    /// Uniformly random open step, ignoring the player and the mode.
    Wander,
}

impl GhostPolicy {
    pub fn decide(
        self,
        ghost: Pos,
        target: Pos,
        mode: Mode,
        maze: &Maze,
        rng: &mut impl Rng,
    ) -> Option<Dir> {
        match self {
            GhostPolicy::Greedy => choose_direction(ghost, target, mode, maze),
            GhostPolicy::Wander => wander_direction(ghost, maze, rng),
        }
    }
}

/// Greedy chase/flee step.
///
/// Directions are scanned in [`Dir::ALL`] order and blocked ones are
/// skipped. Only a strictly better distance replaces the current best, so
/// the earliest direction wins a tie. `None` when every direction is
/// blocked.
pub fn choose_direction(ghost: Pos, target: Pos, mode: Mode, maze: &Maze) -> Option<Dir> {
    let mut best: Option<(Dir, usize)> = None;
    for dir in Dir::ALL {
        let next = attempt_move(ghost, Some(dir), maze, Walker::Ghost);
        if next == ghost {
            continue;
        }
        let d = next.manhattan(target);
        let better = match (best, mode) {
            (None, _) => true,
            (Some((_, b)), Mode::Pursuit) => d < b,
            (Some((_, b)), Mode::Reversed) => d > b,
        };
        if better {
            best = Some((dir, d));
        }
    }
    best.map(|(dir, _)| dir)
}

pub fn wander_direction(ghost: Pos, maze: &Maze, rng: &mut impl Rng) -> Option<Dir> {
    let options: Vec<Dir> = Dir::ALL
        .into_iter()
        .filter(|&dir| attempt_move(ghost, Some(dir), maze, Walker::Ghost) != ghost)
        .collect();
    options.choose(rng).copied()
}
