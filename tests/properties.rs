//! Invariants that must hold under arbitrary player input.

use proptest::prelude::*;

use pacman_sim::config::Variant;
use pacman_sim::{Dir, Game, GameEvent, Phase, Tile};

#[derive(Debug, Clone, Copy)]
enum Input {
    Turn(Dir),
    Pause,
    Wait,
}

fn dir() -> impl Strategy<Value = Dir> {
    prop_oneof![
        Just(Dir::Up),
        Just(Dir::Down),
        Just(Dir::Left),
        Just(Dir::Right),
    ]
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        6 => dir().prop_map(Input::Turn),
        1 => Just(Input::Pause),
        3 => Just(Input::Wait),
    ]
}

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::Classic), Just(Variant::Simple)]
}

proptest! {
    #[test]
    fn session_invariants_hold(
        variant in variant(),
        seed in any::<u64>(),
        inputs in prop::collection::vec(input(), 1..300),
    ) {
        let mut config = variant.config();
        config.seed = seed;
        let mut game = Game::new(variant.maze(), config).unwrap();
        game.start_or_reset();

        let mut score = game.score();
        let mut lives = game.lives();
        let mut pellets = game.pellets().remaining();
        let mut finished = false;

        for input in inputs {
            match input {
                Input::Turn(dir) => game.set_queued_direction(dir),
                Input::Pause => game.toggle_pause(),
                Input::Wait => {}
            }
            let before = game.snapshot();
            let events = game.tick();

            if finished || (game.phase() == Phase::Paused && before.phase == Phase::Paused) {
                prop_assert!(events.is_empty());
                prop_assert_eq!(game.snapshot(), before);
            }

            prop_assert!(game.score() >= score);
            prop_assert!(game.lives() <= lives);
            prop_assert!(game.pellets().remaining() <= pellets);
            prop_assert_ne!(game.phase(), Phase::Menu);

            let maze = game.maze();
            prop_assert!(!maze.is_wall(game.player().pos));
            for ghost in game.ghosts() {
                prop_assert!(maze.in_bounds(ghost.pos));
                prop_assert_ne!(maze.tile(ghost.pos), Tile::Wall);
            }

            let terminal = events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver | GameEvent::Won))
                .count();
            prop_assert!(terminal <= 1);
            if terminal == 1 {
                prop_assert!(matches!(game.phase(), Phase::GameOver | Phase::Won));
            }
            if game.phase() == Phase::GameOver {
                prop_assert_eq!(game.lives(), 0);
            }
            if game.phase() == Phase::Won {
                prop_assert!(game.pellets().is_empty());
            }

            finished = matches!(game.phase(), Phase::GameOver | Phase::Won);
            score = game.score();
            lives = game.lives();
            pellets = game.pellets().remaining();
        }
    }
}
