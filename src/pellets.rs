use std::collections::BTreeMap;

use crate::components::{PelletKind, Pos};
use crate::maze::Maze;

/// Pellets still on the board, keyed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PelletTracker {
    remaining: BTreeMap<Pos, PelletKind>,
}

impl PelletTracker {
    /// Scan `maze` for pellets. With `power` off, power cells count as
    /// normal pellets.
    pub fn from_maze(maze: &Maze, power: bool) -> Self {
        let remaining = maze
            .pellet_cells()
            .map(|(pos, kind)| {
                let kind = if power { kind } else { PelletKind::Normal };
                (pos, kind)
            })
            .collect();
        Self { remaining }
    }

    /// Remove the pellet at `pos`, reporting what it was.
    pub fn consume(&mut self, pos: Pos) -> Option<PelletKind> {
        self.remaining.remove(&pos)
    }

    pub fn kind_at(&self, pos: Pos) -> Option<PelletKind> {
        self.remaining.get(&pos).copied()
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, PelletKind)> + '_ {
        self.remaining.iter().map(|(pos, kind)| (*pos, *kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level;
    use proptest::prelude::*;

    const ROW: &[&str] = &["#P.o G#"];

    #[test]
    fn consume_reports_kind_once() {
        let maze = Maze::parse(ROW).unwrap();
        let mut pellets = PelletTracker::from_maze(&maze, true);
        assert_eq!(pellets.remaining(), 2);

        assert_eq!(pellets.consume(Pos::new(3, 0)), Some(PelletKind::Power));
        assert_eq!(pellets.consume(Pos::new(3, 0)), None);
        assert_eq!(pellets.remaining(), 1);

        assert_eq!(pellets.consume(Pos::new(1, 0)), None);
        assert_eq!(pellets.remaining(), 1);

        assert_eq!(pellets.consume(Pos::new(2, 0)), Some(PelletKind::Normal));
        assert!(pellets.is_empty());
    }

    #[test]
    fn power_disabled_downgrades_power_cells() {
        let maze = Maze::parse(ROW).unwrap();
        let pellets = PelletTracker::from_maze(&maze, false);
        assert_eq!(pellets.kind_at(Pos::new(3, 0)), Some(PelletKind::Normal));
        assert!(pellets.iter().all(|(_, kind)| kind == PelletKind::Normal));
    }

    proptest! {
        #[test]
        fn consume_is_idempotent(x in 0usize..19, y in 0usize..21) {
            let maze = level::classic();
            let mut pellets = PelletTracker::from_maze(&maze, true);
            let pos = Pos::new(x, y);
            let before = pellets.remaining();

            let first = pellets.consume(pos);
            let after_first = pellets.remaining();
            prop_assert_eq!(first.is_some(), before == after_first + 1);

            prop_assert_eq!(pellets.consume(pos), None);
            prop_assert_eq!(pellets.remaining(), after_first);
        }

        #[test]
        fn tracked_cells_hold_pellet_tiles(power in any::<bool>()) {
            let maze = level::classic();
            let pellets = PelletTracker::from_maze(&maze, power);
            for (pos, _) in pellets.iter() {
                prop_assert!(maze.tile(pos).pellet().is_some());
            }
        }
    }
}
