use std::path::{Path, PathBuf};

use lore_core::StoreConfig;
use serde::Deserialize;

/// Store roots as seen by the CLI.
///
/// Precedence: command-line flags > `LORE_*` environment > config file
/// (`LORE_CONFIG`, default `lore.toml`) > built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub presets_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("LORE_CONFIG").unwrap_or_else(|_| "lore.toml".to_string());
        Self::load_from(Path::new(&config_path))
    }

    fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = StoreConfig::default();
        let builder = config::Config::builder()
            .set_default("data_dir", defaults.user_root.to_string_lossy().into_owned())?
            .set_default(
                "presets_dir",
                defaults.preset_root.to_string_lossy().into_owned(),
            )?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        builder
            .add_source(
                config::Environment::with_prefix("LORE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, presets_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = presets_dir {
            self.presets_dir = dir;
        }
        self
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data_dir, &self.presets_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load_from(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.presets_dir, PathBuf::from("presets"));
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("lore.toml");
        std::fs::write(&path, "data_dir = \"/srv/lore\"\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/lore"));
        assert_eq!(settings.presets_dir, PathBuf::from("presets"));
    }

    #[test]
    fn flags_win() {
        let settings = Settings {
            data_dir: PathBuf::from("data"),
            presets_dir: PathBuf::from("presets"),
        }
        .with_overrides(Some(PathBuf::from("mine")), None);
        assert_eq!(settings.data_dir, PathBuf::from("mine"));
        assert_eq!(settings.store_config().preset_root, PathBuf::from("presets"));
    }
}
