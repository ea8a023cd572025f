//! The game state machine: phases, the per-tick simulation and snapshots.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace};

use crate::components::{Dir, Mode, PelletKind, Pos};
use crate::config::{ConfigError, EatenGhost, GameConfig, OnClear, GHOST_SCORE};
use crate::ghost::{Ghost, GhostKind};
use crate::maze::Maze;
use crate::movement::{attempt_move, Walker};
use crate::pellets::PelletTracker;
use crate::player::Player;
use crate::timer::Countdown;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
    Won,
}

/// Something notable that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PelletEaten { pos: Pos },
    PowerPelletEaten { pos: Pos },
    GhostEaten { ghost: usize },
    LifeLost { lives_left: u32 },
    PowerExpired,
    LevelCleared { level: u32 },
    GameOver,
    Won,
}

/// Everything a session mutates. Replaced wholesale on start and reset.
#[derive(Debug, Clone)]
struct Session {
    player: Player,
    ghosts: Vec<Ghost>,
    pellets: PelletTracker,
    score: u32,
    lives: u32,
    mode: Mode,
    power: Countdown,
    level: u32,
    tick: u64,
}

impl Session {
    fn new(maze: &Maze, config: &GameConfig) -> Self {
        Self {
            player: Player::new(maze.player_start(), config.start_dir),
            ghosts: maze
                .ghost_starts()
                .iter()
                .enumerate()
                .map(|(idx, &spawn)| Ghost::new(idx, spawn))
                .collect(),
            pellets: PelletTracker::from_maze(maze, config.power_enabled()),
            score: 0,
            lives: config.lives,
            mode: Mode::Pursuit,
            power: Countdown::default(),
            level: 1,
            tick: 0,
        }
    }

    fn reset_positions(&mut self) {
        self.player.respawn();
        for ghost in &mut self.ghosts {
            ghost.respawn();
        }
    }
}

/// Read-only copy of the state a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub mode: Mode,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub player: Pos,
    pub player_dir: Option<Dir>,
    pub ghosts: Vec<(GhostKind, Pos)>,
    pub pellets: Vec<(Pos, PelletKind)>,
    pub power_remaining: Duration,
}

pub struct Game {
    maze: Maze,
    config: GameConfig,
    phase: Phase,
    session: Session,
    rng: StdRng,
}

impl Game {
    pub fn new(maze: Maze, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session::new(&maze, &config);
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            maze,
            config,
            phase: Phase::Menu,
            session,
            rng,
        })
    }

    // Input API. Always accepted; requests that do not apply to the current
    // phase are ignored.

    /// Queue a turn for the player's next step.
    pub fn set_queued_direction(&mut self, dir: Dir) {
        self.session.player.queue(dir);
    }

    pub fn toggle_pause(&mut self) {
        let next = match self.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            _ => return,
        };
        info!(from = ?self.phase, to = ?next, "pause toggled");
        self.phase = next;
    }

    /// Start a fresh session from any phase.
    pub fn start_or_reset(&mut self) {
        self.session = Session::new(&self.maze, &self.config);
        info!(from = ?self.phase, "session started");
        self.phase = Phase::Playing;
    }

    pub fn return_to_menu(&mut self) {
        if self.phase == Phase::Menu {
            return;
        }
        self.session = Session::new(&self.maze, &self.config);
        info!(from = ?self.phase, "returned to menu");
        self.phase = Phase::Menu;
    }

    /// Advance the simulation by one tick. Does nothing unless playing.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }

        self.session.tick += 1;
        let tick = self.session.tick;
        let player_turn = tick % u64::from(self.config.player_step_interval) == 0;
        let ghost_turn = tick % u64::from(self.config.ghost_step_interval) == 0;

        let player_from = self.session.player.pos;
        if player_turn {
            self.move_player();
        }
        let armed = self.consume_tile(&mut events);

        let ghosts_from: Vec<Pos> = self.session.ghosts.iter().map(|g| g.pos).collect();
        if ghost_turn {
            self.update_ghosts();
        }

        self.handle_collisions(player_from, &ghosts_from, &mut events);
        if self.phase != Phase::Playing {
            return events;
        }

        self.check_cleared(&mut events);
        if self.phase != Phase::Playing {
            return events;
        }

        if !armed {
            self.tick_power_timer(&mut events);
        }
        trace!(
            tick,
            player = ?self.session.player.pos,
            score = self.session.score,
            "tick"
        );
        events
    }

    fn move_player(&mut self) {
        self.session
            .player
            .step(&self.maze, self.config.input_buffer_ticks);
    }

    /// Returns true when a power pellet (re)armed the countdown.
    fn consume_tile(&mut self, events: &mut Vec<GameEvent>) -> bool {
        let pos = self.session.player.pos;
        let Some(kind) = self.session.pellets.consume(pos) else {
            return false;
        };
        self.session.score += kind.score();
        match kind {
            PelletKind::Normal => {
                events.push(GameEvent::PelletEaten { pos });
                false
            }
            PelletKind::Power => {
                let Some(duration) = self.config.power_duration else {
                    return false;
                };
                self.session.mode = Mode::Reversed;
                self.session.power.arm(duration);
                debug!(?pos, ?duration, "power mode");
                events.push(GameEvent::PowerPelletEaten { pos });
                true
            }
        }
    }

    fn update_ghosts(&mut self) {
        let target = self.session.player.pos;
        let mode = self.session.mode;
        for ghost in &mut self.session.ghosts {
            let dir = self
                .config
                .ghost_policy
                .decide(ghost.pos, target, mode, &self.maze, &mut self.rng);
            ghost.pos = attempt_move(ghost.pos, dir, &self.maze, Walker::Ghost);
        }
    }

    fn handle_collisions(
        &mut self,
        player_from: Pos,
        ghosts_from: &[Pos],
        events: &mut Vec<GameEvent>,
    ) {
        let player = self.session.player.pos;
        let hits: Vec<usize> = self
            .session
            .ghosts
            .iter()
            .zip(ghosts_from)
            .enumerate()
            .filter(|&(_, (ghost, &from))| {
                let swapped = ghost.pos == player_from && from == player;
                ghost.pos == player || swapped
            })
            .map(|(idx, _)| idx)
            .collect();
        if hits.is_empty() {
            return;
        }

        match self.session.mode {
            Mode::Reversed => {
                for idx in hits {
                    self.session.score += GHOST_SCORE;
                    if self.config.eaten_ghost == EatenGhost::Respawn {
                        self.session.ghosts[idx].respawn();
                    }
                    debug!(ghost = idx, "ghost eaten");
                    events.push(GameEvent::GhostEaten { ghost: idx });
                }
            }
            Mode::Pursuit => {
                self.session.lives = self.session.lives.saturating_sub(1);
                let lives_left = self.session.lives;
                debug!(lives_left, "life lost");
                events.push(GameEvent::LifeLost { lives_left });
                if lives_left == 0 {
                    info!(score = self.session.score, "game over");
                    self.phase = Phase::GameOver;
                    events.push(GameEvent::GameOver);
                } else {
                    self.session.reset_positions();
                }
            }
        }
    }

    fn check_cleared(&mut self, events: &mut Vec<GameEvent>) {
        if !self.session.pellets.is_empty() {
            return;
        }
        match self.config.on_clear {
            OnClear::Win => {
                info!(score = self.session.score, "maze cleared, game won");
                self.phase = Phase::Won;
                events.push(GameEvent::Won);
            }
            OnClear::Refill => {
                let level = self.session.level;
                self.session.level += 1;
                self.session.pellets =
                    PelletTracker::from_maze(&self.maze, self.config.power_enabled());
                self.session.reset_positions();
                self.session.mode = Mode::Pursuit;
                self.session.power.cancel();
                info!(level, "maze cleared, restocking");
                events.push(GameEvent::LevelCleared { level });
            }
        }
    }

    fn tick_power_timer(&mut self, events: &mut Vec<GameEvent>) {
        if self.session.power.advance(self.config.tick_period) {
            self.session.mode = Mode::Pursuit;
            debug!("power mode expired");
            events.push(GameEvent::PowerExpired);
        }
    }

    // Output API.

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.session;
        Snapshot {
            phase: self.phase,
            mode: s.mode,
            score: s.score,
            lives: s.lives,
            level: s.level,
            player: s.player.pos,
            player_dir: s.player.dir,
            ghosts: s.ghosts.iter().map(|g| (g.kind, g.pos)).collect(),
            pellets: s.pellets.iter().collect(),
            power_remaining: s.power.remaining(),
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn lives(&self) -> u32 {
        self.session.lives
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn player(&self) -> &Player {
        &self.session.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.session.ghosts
    }

    pub fn pellets(&self) -> &PelletTracker {
        &self.session.pellets
    }

    pub fn power_remaining(&self) -> Duration {
        self.session.power.remaining()
    }

    pub fn ticks(&self) -> u64 {
        self.session.tick
    }
}
