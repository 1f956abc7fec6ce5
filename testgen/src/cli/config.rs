//! Configuration loading for the CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use testgen_core::Config;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "testgen.toml";

/// Load configuration from `path`, else `./testgen.toml`, else defaults
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => from_file(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                from_file(default_path)
            } else {
                debug!("No {} found, using default configuration", DEFAULT_CONFIG_FILE);
                Ok(Config::default())
            }
        }
    }
}

/// Load configuration from a TOML file
pub fn from_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    debug!("Loaded configuration from {}: {:?}", path.display(), config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use testgen_core::test_gen::StrategyPolicy;

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("testgen.toml");
        fs::write(&path, "framework = \"junit5\"\nstrategy = \"always-provider\"\n").unwrap();

        let config = from_file(&path).unwrap();
        assert_eq!(config.framework, "junit5");
        assert_eq!(config.strategy, StrategyPolicy::AlwaysProvider);
        assert_eq!(config.source_segment, "main");
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("testgen.toml");
        fs::write(&path, "strategy = \"sometimes\"\n").unwrap();

        let err = from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        assert!(from_file(&temp_dir.path().join("missing.toml")).is_err());
    }
}
