//! Runtime configuration for driving levels headless.
use std::env;
use std::time::Duration;

use hexfall_core::GameConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Simulated time per tick.
    pub tick: Duration,
    /// Upper bound on ticks spent waiting for one turn to finish.
    pub max_ticks_per_turn: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            tick: Duration::from_millis(50),
            max_ticks_per_turn: 2_000,
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HEXFALL_TICK_MS` - Simulated milliseconds per tick (default: 50, minimum 1)
    /// - `HEXFALL_MAX_TICKS` - Tick budget per turn (default: 2000)
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Applies environment overrides on top of `self`. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Some(ms) = read_env::<u64>("HEXFALL_TICK_MS") {
            self.tick = Duration::from_millis(ms.max(1));
        }
        if let Some(ticks) = read_env::<u32>("HEXFALL_MAX_TICKS") {
            self.max_ticks_per_turn = ticks;
        }
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
