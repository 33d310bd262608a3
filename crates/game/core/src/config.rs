use std::time::Duration;

/// Game configuration constants and tunable parameters.
///
/// Every field has a default matching the shipped levels, so partial TOML
/// files only need to name what they override.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Distance from a hex centre to any of its corners, in world units.
    pub hex_size: f32,
    /// Grid columns; axial `q` spans `-width/2 ..`.
    pub grid_width: u32,
    /// Grid rows; axial `r` spans `-height/2 ..`.
    pub grid_height: u32,
    /// Maximum hex steps a single push may travel. Clamped to [`Self::MAX_PUSH_STEPS`].
    pub push_max_steps: usize,
    /// Radius probed around a candidate hex centre when looking for obstacles.
    pub obstacle_probe_radius: f32,
    /// Fraction of `hex_size` treated as a cell's footprint when snapshotting.
    pub footprint_ratio: f32,
    /// Maximum distance between a recorded and a live actor for them to match on restore.
    pub restore_match_radius: f32,
    /// Interval between "is anything still moving" polls, in milliseconds.
    pub settle_poll_ms: u64,
    /// Delay after the last wave settles before the match layer is notified, in milliseconds.
    pub post_settle_grace_ms: u64,
    /// Maximum chain-reaction waves per turn.
    pub chain_wave_cap: u32,
    /// Turns a dead hostage may stay dead before the match is lost.
    pub hostage_grace_turns: u32,
    /// Shots available for the level.
    pub ammunition: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound on push path length (storage for [`crate::PushResult::path`]).
    pub const MAX_PUSH_STEPS: usize = 30;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_HEX_SIZE: f32 = 0.55;
    pub const DEFAULT_GRID_WIDTH: u32 = 21;
    pub const DEFAULT_GRID_HEIGHT: u32 = 11;
    pub const DEFAULT_OBSTACLE_PROBE_RADIUS: f32 = 0.3;
    pub const DEFAULT_FOOTPRINT_RATIO: f32 = 0.4;
    pub const DEFAULT_RESTORE_MATCH_RADIUS: f32 = 0.3;
    pub const DEFAULT_SETTLE_POLL_MS: u64 = 100;
    pub const DEFAULT_POST_SETTLE_GRACE_MS: u64 = 200;
    pub const DEFAULT_CHAIN_WAVE_CAP: u32 = 20;
    pub const DEFAULT_HOSTAGE_GRACE_TURNS: u32 = 2;
    pub const DEFAULT_AMMUNITION: u32 = 10;

    pub fn new() -> Self {
        Self {
            hex_size: Self::DEFAULT_HEX_SIZE,
            grid_width: Self::DEFAULT_GRID_WIDTH,
            grid_height: Self::DEFAULT_GRID_HEIGHT,
            push_max_steps: Self::MAX_PUSH_STEPS,
            obstacle_probe_radius: Self::DEFAULT_OBSTACLE_PROBE_RADIUS,
            footprint_ratio: Self::DEFAULT_FOOTPRINT_RATIO,
            restore_match_radius: Self::DEFAULT_RESTORE_MATCH_RADIUS,
            settle_poll_ms: Self::DEFAULT_SETTLE_POLL_MS,
            post_settle_grace_ms: Self::DEFAULT_POST_SETTLE_GRACE_MS,
            chain_wave_cap: Self::DEFAULT_CHAIN_WAVE_CAP,
            hostage_grace_turns: Self::DEFAULT_HOSTAGE_GRACE_TURNS,
            ammunition: Self::DEFAULT_AMMUNITION,
        }
    }

    pub fn with_ammunition(mut self, ammunition: u32) -> Self {
        self.ammunition = ammunition;
        self
    }

    pub fn with_grid(mut self, width: u32, height: u32) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Radius around a cell centre that counts as "inside" the cell.
    pub fn footprint_radius(&self) -> f32 {
        self.hex_size * self.footprint_ratio
    }

    pub fn settle_poll_interval(&self) -> Duration {
        Duration::from_millis(self.settle_poll_ms)
    }

    pub fn post_settle_grace(&self) -> Duration {
        Duration::from_millis(self.post_settle_grace_ms)
    }

    /// Push step cap after clamping to the compile-time bound.
    pub fn effective_push_steps(&self) -> usize {
        self.push_max_steps.min(Self::MAX_PUSH_STEPS)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
