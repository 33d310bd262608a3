//! Game configuration loader.

use std::path::Path;

use hexfall_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Keys that are absent keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.hex_size.is_finite() && config.hex_size > 0.0) {
            anyhow::bail!("hex_size must be a positive number, got {}", config.hex_size);
        }
        if config.grid_width == 0 || config.grid_height == 0 {
            anyhow::bail!(
                "grid must have at least one cell, got {}x{}",
                config.grid_width,
                config.grid_height
            );
        }
        if config.push_max_steps > GameConfig::MAX_PUSH_STEPS {
            tracing::warn!(
                requested = config.push_max_steps,
                cap = GameConfig::MAX_PUSH_STEPS,
                "push_max_steps above the compile-time cap will be clamped"
            );
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ammunition = 4\nchain_wave_cap = 5").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.ammunition, 4);
        assert_eq!(config.chain_wave_cap, 5);
        assert_eq!(config.hex_size, GameConfig::DEFAULT_HEX_SIZE);
        assert_eq!(config.grid_width, GameConfig::DEFAULT_GRID_WIDTH);
    }

    #[test]
    fn rejects_degenerate_values() {
        assert!(ConfigLoader::parse("hex_size = 0.0").is_err());
        assert!(ConfigLoader::parse("grid_width = 0").is_err());
        assert!(ConfigLoader::parse("ammunition = \"lots\"").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
