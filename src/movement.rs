//! Grid movement shared by the player and the ghosts.

use crate::components::{Dir, Pos};
use crate::maze::Maze;

/// Who is moving. Gates are passable for ghosts only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walker {
    Player,
    Ghost,
}

/// Cell one step from `pos` in `dir`.
///
/// The column wraps around the maze width (tunnel). `None` when the step
/// would leave the top or bottom edge.
pub fn neighbour(pos: Pos, dir: Dir, maze: &Maze) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let ny = pos.y as isize + dy;
    if ny < 0 || ny >= maze.height() as isize {
        return None;
    }
    let nx = (pos.x as isize + dx).rem_euclid(maze.width() as isize);
    Some(Pos {
        x: nx as usize,
        y: ny as usize,
    })
}

pub fn can_move(pos: Pos, dir: Dir, maze: &Maze, walker: Walker) -> bool {
    neighbour(pos, dir, maze).is_some_and(|next| !maze.blocks(next, walker))
}

/// Position after trying to step once in `dir`.
///
/// Returns `pos` unchanged when idle or when the target cell blocks `walker`.
pub fn attempt_move(pos: Pos, dir: Option<Dir>, maze: &Maze, walker: Walker) -> Pos {
    let Some(dir) = dir else {
        return pos;
    };
    match neighbour(pos, dir, maze) {
        Some(next) if !maze.blocks(next, walker) => next,
        _ => pos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level;
    use proptest::prelude::*;

    const TUNNEL: &[&str] = &[
        "#####", //
        " P.G ", //
        "#-###", //
        "#   #", //
        "#####",
    ];

    #[test]
    fn open_step_moves_one_cell() {
        let maze = Maze::parse(TUNNEL).unwrap();
        let next = attempt_move(Pos::new(1, 1), Some(Dir::Right), &maze, Walker::Player);
        assert_eq!(next, Pos::new(2, 1));
    }

    #[test]
    fn wall_rejects_move() {
        let maze = Maze::parse(TUNNEL).unwrap();
        let start = Pos::new(2, 1);
        assert_eq!(attempt_move(start, Some(Dir::Up), &maze, Walker::Player), start);
        assert_eq!(attempt_move(start, Some(Dir::Down), &maze, Walker::Ghost), start);
    }

    #[test]
    fn idle_stays_put() {
        let maze = Maze::parse(TUNNEL).unwrap();
        let start = Pos::new(1, 1);
        assert_eq!(attempt_move(start, None, &maze, Walker::Player), start);
    }

    #[test]
    fn columns_wrap_through_tunnel() {
        let maze = Maze::parse(TUNNEL).unwrap();
        assert_eq!(
            attempt_move(Pos::new(0, 1), Some(Dir::Left), &maze, Walker::Player),
            Pos::new(4, 1)
        );
        assert_eq!(
            attempt_move(Pos::new(4, 1), Some(Dir::Right), &maze, Walker::Ghost),
            Pos::new(0, 1)
        );
    }

    #[test]
    fn rows_never_wrap() {
        let maze = Maze::parse(&[" P.G "]).unwrap();
        assert_eq!(neighbour(Pos::new(1, 0), Dir::Up, &maze), None);
        assert_eq!(neighbour(Pos::new(1, 0), Dir::Down, &maze), None);
        assert_eq!(
            attempt_move(Pos::new(1, 0), Some(Dir::Up), &maze, Walker::Player),
            Pos::new(1, 0)
        );
    }

    #[test]
    fn gate_passable_for_ghost_only() {
        let maze = Maze::parse(TUNNEL).unwrap();
        let above_gate = Pos::new(1, 1);
        assert!(!can_move(above_gate, Dir::Down, &maze, Walker::Player));
        assert!(can_move(above_gate, Dir::Down, &maze, Walker::Ghost));
        assert_eq!(
            attempt_move(above_gate, Some(Dir::Down), &maze, Walker::Ghost),
            Pos::new(1, 2)
        );
    }

    proptest! {
        #[test]
        fn moves_land_adjacent_and_open(
            x in 0usize..19,
            y in 0usize..21,
            dir_idx in 0usize..5,
            ghost in any::<bool>(),
        ) {
            let maze = level::classic();
            let pos = Pos::new(x, y);
            let dir = Dir::ALL.get(dir_idx).copied();
            let walker = if ghost { Walker::Ghost } else { Walker::Player };
            let next = attempt_move(pos, dir, &maze, walker);

            prop_assert!(next.y < maze.height());
            prop_assert!(next.x < maze.width());
            if next != pos {
                prop_assert!(!maze.blocks(next, walker));
                let dy = next.y.abs_diff(pos.y);
                let dx = next.x.abs_diff(pos.x);
                let wrapped = dx == maze.width() - 1 && dy == 0;
                prop_assert!(dx + dy == 1 || wrapped);
            }
        }
    }
}
