mod loader;
pub mod value;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use value::{ConfigValue, FromConfigValue};

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "xtend.yaml";

/// Default directory name for base entities and repositories.
pub const ENTITY_DIRECTORY: &str = "Entity";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
    /// The destination folder does not exist.
    DestinationNotFound(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
            ConfigError::DestinationNotFound(path) => write!(
                f,
                "The provided destination folder '{}' does not exist!",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw configuration loaded from a YAML file and `XTEND_*` environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. the YAML file (optional)
/// 2. environment variables (`XTEND_ENTITY_DIRECTORY` overrides `xtend.entity.directory`)
#[derive(Debug, Clone, Default)]
pub struct XtendConfig {
    values: HashMap<String, ConfigValue>,
}

impl XtendConfig {
    /// Load the given YAML file (if present) and overlay the process environment.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_file(path, &mut values)?;
        loader::overlay_env(std::env::vars(), &mut values);
        Ok(XtendConfig { values })
    }

    /// Create a config from a YAML string, without environment overlay.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        loader::load_yaml_str(yaml, &mut values)?;
        Ok(XtendConfig { values })
    }

    /// Create an empty config (every key falls back to its default).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, falling back to `default` only when the key is absent.
    ///
    /// A present but unconvertible value is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }
}

/// The conventions a generation run is executed with.
///
/// Every path and namespace of a module's mirror package is derived from
/// these values plus the module itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateConfig {
    /// Base folder under which the application directory is created.
    pub destination: PathBuf,
    /// Folder scanned for installed modules.
    pub modules_dir: PathBuf,
    /// Namespace (and directory name) of the mirror packages.
    pub application_namespace: String,
    pub entity_directory: String,
    pub repository_directory: String,
    pub extended_entity_directory: String,
    pub extended_repository_directory: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            destination: PathBuf::from("."),
            modules_dir: PathBuf::from("vendor"),
            application_namespace: "Application".to_string(),
            entity_directory: ENTITY_DIRECTORY.to_string(),
            repository_directory: ENTITY_DIRECTORY.to_string(),
            extended_entity_directory: ENTITY_DIRECTORY.to_string(),
            extended_repository_directory: ENTITY_DIRECTORY.to_string(),
        }
    }
}

impl GenerateConfig {
    /// Resolve the conventions from raw configuration.
    ///
    /// The extended directory names default to their source counterparts.
    pub fn from_config(config: &XtendConfig) -> Result<Self, ConfigError> {
        let defaults = GenerateConfig::default();

        let destination: String = config.get_or("xtend.destination", ".".to_string())?;
        let modules_dir: String = config.get_or("xtend.modules.directory", "vendor".to_string())?;
        let application_namespace =
            config.get_or("xtend.application.namespace", defaults.application_namespace)?;
        let entity_directory: String =
            config.get_or("xtend.entity.directory", defaults.entity_directory)?;
        let repository_directory: String =
            config.get_or("xtend.repository.directory", defaults.repository_directory)?;
        let extended_entity_directory =
            config.get_or("xtend.extended.entity.directory", entity_directory.clone())?;
        let extended_repository_directory = config.get_or(
            "xtend.extended.repository.directory",
            repository_directory.clone(),
        )?;

        Ok(GenerateConfig {
            destination: PathBuf::from(destination),
            modules_dir: PathBuf::from(modules_dir),
            application_namespace,
            entity_directory,
            repository_directory,
            extended_entity_directory,
            extended_repository_directory,
        })
    }

    /// Replace the destination folder (the `--dest` override).
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Canonicalize the destination folder, failing if it does not exist.
    pub fn resolve_destination(mut self) -> Result<Self, ConfigError> {
        match std::fs::canonicalize(&self.destination) {
            Ok(path) if path.is_dir() => {
                self.destination = path;
                Ok(self)
            }
            _ => Err(ConfigError::DestinationNotFound(self.destination)),
        }
    }

    /// The folder holding every mirror package: `<destination>/<application namespace>`.
    pub fn application_dir(&self) -> PathBuf {
        self.destination.join(&self.application_namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_config_is_empty() {
        let config = GenerateConfig::from_config(&XtendConfig::empty()).unwrap();
        assert_eq!(config, GenerateConfig::default());
        assert_eq!(config.application_dir(), PathBuf::from("./Application"));
    }

    #[test]
    fn extended_directories_follow_source_overrides() {
        let config = XtendConfig::from_yaml_str(
            "xtend:\n  entity:\n    directory: Model\n  repository:\n    directory: Model/Repository\n",
        )
        .unwrap();
        let config = GenerateConfig::from_config(&config).unwrap();

        assert_eq!(config.entity_directory, "Model");
        assert_eq!(config.extended_entity_directory, "Model");
        assert_eq!(config.repository_directory, "Model/Repository");
        assert_eq!(config.extended_repository_directory, "Model/Repository");
    }

    #[test]
    fn extended_directories_can_be_set_independently() {
        let config = XtendConfig::from_yaml_str(
            "xtend:\n  extended:\n    entity:\n      directory: Custom\n",
        )
        .unwrap();
        let config = GenerateConfig::from_config(&config).unwrap();

        assert_eq!(config.entity_directory, "Entity");
        assert_eq!(config.extended_entity_directory, "Custom");
    }

    #[test]
    fn list_value_is_a_type_mismatch() {
        let config = XtendConfig::from_yaml_str("xtend:\n  destination: [a, b]\n").unwrap();
        let err = GenerateConfig::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    }

    #[test]
    fn missing_destination_is_rejected() {
        let err = GenerateConfig::default()
            .with_destination("/definitely/not/a/real/folder")
            .resolve_destination()
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn existing_destination_is_canonicalized() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = GenerateConfig::default()
            .with_destination(tmp.path())
            .resolve_destination()
            .unwrap();
        assert!(config.destination.is_absolute());
    }
}
