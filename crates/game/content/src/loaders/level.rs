//! Level loader.
//!
//! Loads [`LevelDefinition`]s from RON files and checks their placements
//! against the grid they describe.

use std::path::Path;

use hexfall_core::{GameConfig, LevelDefinition};

use crate::loaders::{LoadResult, read_file};

const DEMO_LEVEL: &str = include_str!("../../data/levels/demo.ron");

/// Loader for level definitions from RON files.
pub struct LevelLoader;

impl LevelLoader {
    /// Load and validate a level from a RON file.
    pub fn load(path: &Path, base: &GameConfig) -> LoadResult<LevelDefinition> {
        let content = read_file(path)?;
        Self::parse(&content, base)
            .map_err(|e| anyhow::anyhow!("Invalid level {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, base: &GameConfig) -> LoadResult<LevelDefinition> {
        let level: LevelDefinition = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse level RON: {}", e))?;
        level.validate(base)?;
        tracing::debug!(name = %level.name, actors = level.actors.len(), "level loaded");
        Ok(level)
    }

    /// The level bundled with the crate.
    pub fn demo(base: &GameConfig) -> LoadResult<LevelDefinition> {
        Self::parse(DEMO_LEVEL, base)
    }
}
