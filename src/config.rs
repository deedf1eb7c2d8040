use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Title prefix of the container folder created on bookmark import
    #[serde(default = "default_import_folder_prefix")]
    pub import_folder_prefix: String,

    /// Filename prefix of exported documents
    #[serde(default = "default_export_filename_prefix")]
    pub export_filename_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            import_folder_prefix: default_import_folder_prefix(),
            export_filename_prefix: default_export_filename_prefix(),
        }
    }
}

fn default_import_folder_prefix() -> String {
    "Tabby Grabby Import".to_string()
}

fn default_export_filename_prefix() -> String {
    "tabby-grabby-export".to_string()
}

pub fn get_config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(path).join("tabby-grabby");
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config/tabby-grabby");
    }

    #[cfg(target_os = "windows")]
    if let Ok(appdata) = std::env::var("APPDATA") {
        return PathBuf::from(appdata).join("tabby-grabby");
    }

    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

impl Config {
    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default location
    /// (~/.config/tabby-grabby/config.yml), falling back to defaults
    pub fn load() -> Self {
        let config_path = get_config_dir().join("config.yml");

        if config_path.exists() {
            match Self::load_from_path(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("failed to load config from {config_path:?}: {e}; using defaults");
                    Self::default()
                }
            }
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file path
    pub fn save_to_path(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.import_folder_prefix, "Tabby Grabby Import");
        assert_eq!(config.export_filename_prefix, "tabby-grabby-export");
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        let original = Config {
            import_folder_prefix: "Session Import".to_string(),
            export_filename_prefix: "session".to_string(),
        };

        original.save_to_path(config_path).unwrap();
        let loaded = Config::load_from_path(config_path).unwrap();

        assert_eq!(original.import_folder_prefix, loaded.import_folder_prefix);
        assert_eq!(original.export_filename_prefix, loaded.export_filename_prefix);
    }

    #[test]
    fn test_load_partial_config() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path();

        fs::write(config_path, "import_folder_prefix: Archive\n").unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.import_folder_prefix, "Archive");
        // Missing field falls back to its default
        assert_eq!(config.export_filename_prefix, "tabby-grabby-export");
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "invalid: yaml: content:").unwrap();

        assert!(Config::load_from_path(temp_file.path()).is_err());
    }
}
