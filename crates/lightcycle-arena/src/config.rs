use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use lightcycle_core::{Direction, GridCoordinate, GridDimensions, PlayerColor, PlayerId};

use crate::arena::{SpawnPoint, default_spawn};

/// Largest arena side. Cell coordinates are `i32`, so every in-bounds cell and the
/// wall cell one step past it stay representable.
pub const MAX_ARENA_SIDE: u32 = i32::MAX as u32;

/// Rejected configuration. Raised at construction so a running round never sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyArena { width: u32, height: u32 },
    ArenaTooLarge { width: u32, height: u32 },
    ZeroCellSize,
    ZeroTickPeriod,
    StartOutOfBounds {
        player: PlayerId,
        start: GridCoordinate,
    },
    SharedStart(GridCoordinate),
    NoStartHeading(PlayerId),
    EmptyKey(PlayerId),
    DuplicateKey(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyArena { width, height } => {
                write!(f, "arena must be at least 1x1 cells, got {width}x{height}")
            },
            Self::ArenaTooLarge { width, height } => write!(
                f,
                "arena of {width}x{height} cells exceeds the {MAX_ARENA_SIDE} cell limit per side"
            ),
            Self::ZeroCellSize => write!(f, "cell_size must be > 0"),
            Self::ZeroTickPeriod => write!(f, "tick_period_ms must be > 0"),
            Self::StartOutOfBounds { player, start } => write!(
                f,
                "{player} start ({}, {}) lies outside the arena",
                start.col, start.row
            ),
            Self::SharedStart(start) => write!(
                f,
                "both players start on the same cell ({}, {})",
                start.col, start.row
            ),
            Self::NoStartHeading(player) => {
                write!(f, "{player} start heading must be Up, Down, Left or Right")
            },
            Self::EmptyKey(player) => write!(f, "{player} has an empty control key"),
            Self::DuplicateKey(code) => write!(f, "key {code:?} is bound more than once"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Key codes (`KeyboardEvent.code` names) steering one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl ControlScheme {
    pub fn wasd() -> Self {
        Self {
            up: "KeyW".to_string(),
            down: "KeyS".to_string(),
            left: "KeyA".to_string(),
            right: "KeyD".to_string(),
        }
    }

    pub fn arrows() -> Self {
        Self {
            up: "ArrowUp".to_string(),
            down: "ArrowDown".to_string(),
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
        }
    }

    pub fn bindings(&self) -> [(&str, Direction); 4] {
        [
            (self.up.as_str(), Direction::Up),
            (self.down.as_str(), Direction::Down),
            (self.left.as_str(), Direction::Left),
            (self.right.as_str(), Direction::Right),
        ]
    }
}

/// Per-seat overrides. Anything left unset falls back to the seat default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start: Option<GridCoordinate>,
    pub heading: Option<Direction>,
    pub color: Option<PlayerColor>,
    pub controls: Option<ControlScheme>,
}

/// Data-driven configuration for the arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Pixel size of one grid cell (render scale only).
    pub cell_size: u32,
    /// Arena width in cells.
    pub arena_width: u32,
    /// Arena height in cells.
    pub arena_height: u32,
    /// Fixed simulation step.
    pub tick_period_ms: u64,
    /// Key code that starts a round while idle or ended.
    pub start_key: String,
    pub player1: PlayerConfig,
    pub player2: PlayerConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            arena_width: 100,
            arena_height: 60,
            tick_period_ms: 80,
            start_key: "Enter".to_string(),
            player1: PlayerConfig::default(),
            player2: PlayerConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// Load config from environment or TOML file, falling back to defaults.
    pub fn load() -> Self {
        let env_path = std::env::var("LIGHTCYCLE_ARENA_CONFIG").ok();
        Self::load_from(env_path.as_deref(), |path| std::fs::read_to_string(path).ok())
    }

    /// Try `env_path`, then `config/arena.toml`, reading through `read`. Files that fail
    /// to parse are logged and skipped.
    pub fn load_from(env_path: Option<&str>, read: impl Fn(&str) -> Option<String>) -> Self {
        for path in env_path.into_iter().chain(["config/arena.toml"]) {
            let Some(contents) = read(path) else {
                continue;
            };
            match Self::from_toml_str(&contents) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(path, error = %e, "Ignoring arena config"),
            }
        }
        Self::default()
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn grid(&self) -> GridDimensions {
        GridDimensions::new(self.arena_width, self.arena_height)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn player(&self, player: PlayerId) -> &PlayerConfig {
        match player {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerConfig {
        match player {
            PlayerId::One => &mut self.player1,
            PlayerId::Two => &mut self.player2,
        }
    }

    pub fn spawn(&self, player: PlayerId) -> SpawnPoint {
        let fallback = default_spawn(self.grid(), player);
        let overrides = self.player(player);
        SpawnPoint {
            start: overrides.start.unwrap_or(fallback.start),
            heading: overrides.heading.unwrap_or(fallback.heading),
        }
    }

    pub fn color(&self, player: PlayerId) -> PlayerColor {
        self.player(player)
            .color
            .unwrap_or_else(|| PlayerColor::for_player(player))
    }

    pub fn controls(&self, player: PlayerId) -> ControlScheme {
        self.player(player)
            .controls
            .clone()
            .unwrap_or_else(|| match player {
                PlayerId::One => ControlScheme::wasd(),
                PlayerId::Two => ControlScheme::arrows(),
            })
    }

    /// Reject settings that would make the simulation meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_width == 0 || self.arena_height == 0 {
            return Err(ConfigError::EmptyArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.arena_width > MAX_ARENA_SIDE || self.arena_height > MAX_ARENA_SIDE {
            return Err(ConfigError::ArenaTooLarge {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }

        let grid = self.grid();
        for player in PlayerId::ALL {
            let spawn = self.spawn(player);
            if !grid.contains(spawn.start) {
                return Err(ConfigError::StartOutOfBounds {
                    player,
                    start: spawn.start,
                });
            }
            if spawn.heading == Direction::None {
                return Err(ConfigError::NoStartHeading(player));
            }
        }
        let p1_start = self.spawn(PlayerId::One).start;
        if p1_start == self.spawn(PlayerId::Two).start {
            return Err(ConfigError::SharedStart(p1_start));
        }

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(self.start_key.clone());
        for player in PlayerId::ALL {
            for (code, _) in self.controls(player).bindings() {
                if code.is_empty() {
                    return Err(ConfigError::EmptyKey(player));
                }
                if !seen.insert(code.to_string()) {
                    return Err(ConfigError::DuplicateKey(code.to_string()));
                }
            }
        }

        Ok(())
    }
}
