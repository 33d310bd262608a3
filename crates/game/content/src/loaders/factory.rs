//! Content factory for loading levels and configuration from a data directory.

use std::path::{Path, PathBuf};

use hexfall_core::{GameConfig, LevelDefinition};

use crate::loaders::{ConfigLoader, LevelLoader, LoadResult};

/// Loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── levels/
///     ├── demo.ron
///     └── courtyard.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load `config.toml`, falling back to defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load `levels/<name>.ron`.
    pub fn load_level(&self, name: &str, base: &GameConfig) -> LoadResult<LevelDefinition> {
        let path = self.levels_dir().join(format!("{name}.ron"));
        LevelLoader::load(&path, base)
    }

    /// Names of every level file in `levels/`, sorted.
    pub fn level_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.levels_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn levels_dir(&self) -> PathBuf {
        self.data_dir.join("levels")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundled() -> ContentFactory {
        ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    #[test]
    fn loads_bundled_content() {
        let factory = bundled();
        let config = factory.load_config().unwrap();
        let names = factory.level_names().unwrap();
        assert!(names.contains(&"demo".to_owned()));

        let level = factory.load_level("demo", &config).unwrap();
        assert_eq!(level.name, "demo");
    }

    #[test]
    fn empty_directory_uses_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.level_names().is_err());
        assert!(factory.load_level("missing", &GameConfig::default()).is_err());
    }
}
