use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

/// Load and parse a YAML file, flattening it into the values map.
///
/// A missing file leaves the map untouched.
pub(crate) fn load_yaml_file(
    path: &Path,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        flatten_yaml("", &yaml, values);
    }
    Ok(())
}

/// Parse a YAML string and flatten it into the values map.
pub(crate) fn load_yaml_str(
    content: &str,
    values: &mut HashMap<String, ConfigValue>,
) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten_yaml("", &yaml, values);
    Ok(())
}

/// Overlay `XTEND_*` environment variables.
///
/// Convention: `xtend.entity.directory` <-> `XTEND_ENTITY_DIRECTORY`.
pub(crate) fn overlay_env(
    vars: impl IntoIterator<Item = (String, String)>,
    values: &mut HashMap<String, ConfigValue>,
) {
    for (env_key, env_val) in vars {
        if !env_key.starts_with("XTEND_") {
            continue;
        }
        let config_key = env_key.to_lowercase().replace('_', ".");
        values.insert(config_key, ConfigValue::String(env_val));
    }
}

/// Flatten a YAML tree into dot-separated keys.
pub(crate) fn flatten_yaml(
    prefix: &str,
    value: &serde_yaml::Value,
    out: &mut HashMap<String, ConfigValue>,
) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key_str = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    other => format!("{other:?}"),
                };
                let full_key = if prefix.is_empty() {
                    key_str
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(&full_key, v, out);
            }
        }
        leaf => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), ConfigValue::from_yaml(leaf));
            }
        }
    }
}
