//! Rules that differ between game variants, plus the environment settings
//! read by the terminal front end.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::components::Dir;
use crate::ghost::GhostPolicy;
use crate::level;
use crate::maze::{Maze, MazeError};

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;

pub const DEFAULT_TICK_MS: u64 = 100;
pub const DEFAULT_RENDER_FPS: u64 = 60;
pub const DEFAULT_POWER_MS: u64 = 7000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown variant {0:?}, expected \"classic\" or \"simple\"")]
    UnknownVariant(String),
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// What happens to a ghost the player eats in power mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EatenGhost {
    /// Teleport back to its spawn cell.
    #[default]
    Respawn,
    /// Stay put. Scores again on every tick it still overlaps the player.
    Stay,
}

/// What happens when the last pellet is eaten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnClear {
    #[default]
    Win,
    /// Restock every pellet, reset positions and keep playing.
    Refill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub lives: u32,
    /// Simulated time covered by one tick.
    pub tick_period: Duration,
    /// Power mode length. `None` disables power pellets entirely.
    pub power_duration: Option<Duration>,
    pub eaten_ghost: EatenGhost,
    pub on_clear: OnClear,
    pub ghost_policy: GhostPolicy,
    /// The player moves on every n-th tick.
    pub player_step_interval: u32,
    /// Ghosts move on every n-th tick.
    pub ghost_step_interval: u32,
    /// Player steps a blocked queued direction is retried before it is
    /// dropped. 1 discards it after the first blocked step.
    pub input_buffer_ticks: u32,
    pub start_dir: Option<Dir>,
    pub seed: u64,
}

impl GameConfig {
    pub fn classic() -> Self {
        Self {
            lives: 3,
            tick_period: Duration::from_millis(DEFAULT_TICK_MS),
            power_duration: Some(Duration::from_millis(DEFAULT_POWER_MS)),
            eaten_ghost: EatenGhost::Respawn,
            on_clear: OnClear::Win,
            ghost_policy: GhostPolicy::Greedy,
            player_step_interval: 1,
            ghost_step_interval: 1,
            input_buffer_ticks: 1,
            start_dir: Some(Dir::Right),
            seed: 0,
        }
    }

    /// Single life, no power pellets, random ghosts; player every 200 ms
    /// and ghosts every 300 ms at the default tick.
    pub fn simple() -> Self {
        Self {
            lives: 1,
            power_duration: None,
            eaten_ghost: EatenGhost::Stay,
            ghost_policy: GhostPolicy::Wander,
            player_step_interval: 2,
            ghost_step_interval: 3,
            ..Self::classic()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lives == 0 {
            return Err(ConfigError::Zero("lives"));
        }
        if self.tick_period.is_zero() {
            return Err(ConfigError::Zero("tick_period"));
        }
        if self.power_duration.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::Zero("power_duration"));
        }
        if self.player_step_interval == 0 {
            return Err(ConfigError::Zero("player_step_interval"));
        }
        if self.ghost_step_interval == 0 {
            return Err(ConfigError::Zero("ghost_step_interval"));
        }
        if self.input_buffer_ticks == 0 {
            return Err(ConfigError::Zero("input_buffer_ticks"));
        }
        Ok(())
    }

    pub fn power_enabled(&self) -> bool {
        self.power_duration.is_some()
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    #[default]
    Classic,
    Simple,
}

impl Variant {
    pub fn config(self) -> GameConfig {
        match self {
            Variant::Classic => GameConfig::classic(),
            Variant::Simple => GameConfig::simple(),
        }
    }

    pub fn maze(self) -> Maze {
        match self {
            Variant::Classic => level::classic(),
            Variant::Simple => level::simple(),
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Variant::Classic),
            "simple" => Ok(Variant::Simple),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Front-end settings taken from `PACMAN_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub variant: Variant,
    pub tick_ms: u64,
    pub render_fps: u64,
    pub seed: Option<u64>,
    pub log_file: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let variant = match lookup("PACMAN_VARIANT") {
            Some(v) => v.parse()?,
            None => Variant::default(),
        };
        let tick_ms = read_positive(&lookup, "PACMAN_TICK_MS")?.unwrap_or(DEFAULT_TICK_MS);
        let render_fps = read_positive(&lookup, "PACMAN_FPS")?.unwrap_or(DEFAULT_RENDER_FPS);
        let seed = match lookup("PACMAN_SEED") {
            Some(v) => Some(v.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: "PACMAN_SEED",
                value: v,
            })?),
            None => None,
        };
        let log_file = lookup("PACMAN_LOG").filter(|v| !v.is_empty());
        Ok(Self {
            variant,
            tick_ms,
            render_fps,
            seed,
            log_file,
        })
    }

    /// Variant rules with the tick period and seed overridden.
    pub fn game_config(&self) -> GameConfig {
        let mut config = self.variant.config();
        config.tick_period = Duration::from_millis(self.tick_ms);
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}

fn read_positive(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Zero(var)),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ConfigError::InvalidEnv { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn builtin_configs_validate() {
        GameConfig::classic().validate().unwrap();
        GameConfig::simple().validate().unwrap();
        assert!(GameConfig::classic().power_enabled());
        assert!(!GameConfig::simple().power_enabled());
        assert_eq!(GameConfig::classic().input_buffer_ticks, 1);
        assert_eq!(GameConfig::simple().input_buffer_ticks, 1);
    }

    #[test]
    fn zero_fields_rejected() {
        let config = GameConfig {
            ghost_step_interval: 0,
            ..GameConfig::classic()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Zero("ghost_step_interval"))
        ));

        let config = GameConfig {
            power_duration: Some(Duration::ZERO),
            ..GameConfig::classic()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Zero("power_duration"))));
    }

    #[test]
    fn defaults_without_env() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.variant, Variant::Classic);
        assert_eq!(s.tick_ms, DEFAULT_TICK_MS);
        assert_eq!(s.render_fps, DEFAULT_RENDER_FPS);
        assert_eq!(s.seed, None);
        assert_eq!(s.log_file, None);
        assert_eq!(s.game_config(), GameConfig::classic());
    }

    #[test]
    fn env_overrides_apply() {
        let s = settings(&[
            ("PACMAN_VARIANT", "Simple"),
            ("PACMAN_TICK_MS", "50"),
            ("PACMAN_SEED", "99"),
            ("PACMAN_LOG", "/tmp/pacman.log"),
        ])
        .unwrap();
        assert_eq!(s.variant, Variant::Simple);
        let config = s.game_config();
        assert_eq!(config.tick_period, Duration::from_millis(50));
        assert_eq!(config.seed, 99);
        assert_eq!(config.lives, 1);
        assert_eq!(s.log_file.as_deref(), Some("/tmp/pacman.log"));
    }

    #[test]
    fn bad_env_values_are_errors() {
        assert!(matches!(
            settings(&[("PACMAN_VARIANT", "arcade")]),
            Err(ConfigError::UnknownVariant(_))
        ));
        assert!(matches!(
            settings(&[("PACMAN_TICK_MS", "0")]),
            Err(ConfigError::Zero("PACMAN_TICK_MS"))
        ));
        assert!(matches!(
            settings(&[("PACMAN_FPS", "fast")]),
            Err(ConfigError::InvalidEnv { var: "PACMAN_FPS", .. })
        ));
        assert!(matches!(
            settings(&[("PACMAN_SEED", "-1")]),
            Err(ConfigError::InvalidEnv { var: "PACMAN_SEED", .. })
        ));
    }
}
