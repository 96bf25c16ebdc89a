use serde::Deserialize;

use lightcycle_arena::config::ArenaConfig;

/// Top-level host configuration, loaded from `lightcycle.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub arena: ArenaConfig,
    pub log: LogConfig,
}

/// Logging knobs for the port implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log every frame at info level instead of debug.
    pub frames: bool,
}

impl HostConfig {
    /// Load config from `lightcycle.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let content = std::fs::read_to_string("lightcycle.toml").ok();
        let mut config = Self::from_file_contents(content.as_deref(), ArenaConfig::load);
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Resolve the host file's contents. A missing or malformed file falls back to host
    /// defaults with the arena from `fallback_arena`.
    pub fn from_file_contents(
        content: Option<&str>,
        fallback_arena: impl FnOnce() -> ArenaConfig,
    ) -> Self {
        match content.map(Self::from_toml_str) {
            Some(Ok(cfg)) => {
                tracing::info!("Loaded configuration from lightcycle.toml");
                return cfg;
            },
            Some(Err(e)) => {
                tracing::warn!("Failed to parse lightcycle.toml: {e}, using defaults");
            },
            None => tracing::info!("No lightcycle.toml found, using defaults"),
        }
        Self {
            arena: fallback_arena(),
            log: LogConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply `LIGHTCYCLE_*` overrides. Unparseable or empty values are ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("LIGHTCYCLE_TICK_MS")
            && let Ok(n) = val.parse::<u64>()
        {
            self.arena.tick_period_ms = n;
        }
        if let Some(val) = var("LIGHTCYCLE_ARENA_WIDTH")
            && let Ok(n) = val.parse::<u32>()
        {
            self.arena.arena_width = n;
        }
        if let Some(val) = var("LIGHTCYCLE_ARENA_HEIGHT")
            && let Ok(n) = val.parse::<u32>()
        {
            self.arena.arena_height = n;
        }
        if let Some(val) = var("LIGHTCYCLE_CELL_SIZE")
            && let Ok(n) = val.parse::<u32>()
        {
            self.arena.cell_size = n;
        }
        if let Some(key) = var("LIGHTCYCLE_START_KEY")
            && !key.is_empty()
        {
            self.arena.start_key = key;
        }
    }
}
