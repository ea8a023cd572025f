use crate::maze::Maze;

/// 19x21 maze with a side tunnel on row 9 and a gated ghost house.
pub const CLASSIC: &[&str] = &[
    "###################",
    "#o.......#.......o#",
    "#.##.###.#.###.##.#",
    "#.................#",
    "#.##.#.#####.#.##.#",
    "#....#...#...#....#",
    "####.###.#.###.####",
    "####.#...G...#.####",
    "####.#.##-##.#.####",
    "    .  #GGG#  .    ",
    "####.#.#####.#.####",
    "####.#.......#.####",
    "####.#.#####.#.####",
    "#........#........#",
    "#.##.###.#.###.##.#",
    "#o.#.....P.....#.o#",
    "##.#.#.#####.#.#.##",
    "#....#...#...#....#",
    "#.######.#.######.#",
    "#.................#",
    "###################",
];

/// 15x11 open maze without power pellets or gates.
pub const SIMPLE: &[&str] = &[
    "###############",
    "#......#......#",
    "#.###.###.###.#",
    "#.............#",
    "#.#.##GGG##.#.#",
    " ...#.....#... ",
    "#.#.#######.#.#",
    "#......P......#",
    "#.###.###.###.#",
    "#......#......#",
    "###############",
];

pub fn classic() -> Maze {
    Maze::parse(CLASSIC).expect("classic layout is valid")
}

pub fn simple() -> Maze {
    Maze::parse(SIMPLE).expect("simple layout is valid")
}

/// Number of pellets a layout starts with.
pub fn count_pellets(maze: &Maze) -> usize {
    maze.pellet_cells().count()
}
