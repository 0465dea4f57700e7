//! Command implementations for the `xtend` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

use std::path::Path;

use xtend_core::{discover_modules, GenerateConfig, Module, XtendConfig};

/// Extension generation — `xtend generate [MODULE]...`.
///
/// Runs the module scaffolding, Doctrine ORM, ODM, PHPCR and serializer
/// generators for every requested module and prints one status line per file.
pub mod generate;

/// Module inspection — `xtend inspect <MODULE>`.
///
/// Prints, per technology, the resolved folders, the mapping skeletons,
/// the entity names derived from them and the base repository files.
pub mod inspect;

/// Module listing — `xtend list`.
pub mod list;

/// Load the conventions from the config file and `XTEND_*` variables.
///
/// A missing config file leaves every convention at its default.
pub fn load_config(path: &Path) -> Result<GenerateConfig, Box<dyn std::error::Error>> {
    let raw = XtendConfig::load(path)?;
    Ok(GenerateConfig::from_config(&raw)?)
}

/// Find an installed module by name.
pub(crate) fn find_module(
    config: &GenerateConfig,
    name: &str,
) -> Result<Module, Box<dyn std::error::Error>> {
    discover_modules(&config.modules_dir)?
        .into_iter()
        .find(|module| module.name == name)
        .ok_or_else(|| {
            format!("The module '{name}' does not exist or is not installed!").into()
        })
}
