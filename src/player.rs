use crate::components::{Dir, Pos};
use crate::maze::Maze;
use crate::movement::{attempt_move, can_move, Walker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub dir: Option<Dir>,
    pub queued: Option<Dir>,
    /// Promotion attempts the queued direction has failed so far.
    queued_misses: u32,
    spawn: Pos,
    spawn_dir: Option<Dir>,
}

impl Player {
    pub fn new(spawn: Pos, dir: Option<Dir>) -> Self {
        Self {
            pos: spawn,
            dir,
            queued: None,
            queued_misses: 0,
            spawn,
            spawn_dir: dir,
        }
    }

    /// Replace whatever direction was queued before.
    pub fn queue(&mut self, dir: Dir) {
        self.queued = Some(dir);
        self.queued_misses = 0;
    }

    /// Promote the queued direction if it opens a path, then move one step.
    ///
    /// A queued direction that stays blocked is dropped after
    /// `buffer_ticks` failed attempts.
    pub fn step(&mut self, maze: &Maze, buffer_ticks: u32) {
        if let Some(next) = self.queued {
            if can_move(self.pos, next, maze, Walker::Player) {
                self.dir = Some(next);
                self.queued = None;
                self.queued_misses = 0;
            } else {
                self.queued_misses += 1;
                if self.queued_misses >= buffer_ticks {
                    self.queued = None;
                    self.queued_misses = 0;
                }
            }
        }
        self.pos = attempt_move(self.pos, self.dir, maze, Walker::Player);
    }

    pub fn respawn(&mut self) {
        *self = Self::new(self.spawn, self.spawn_dir);
    }
}
