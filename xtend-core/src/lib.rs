//! # xtend-core
//!
//! Generation of application-level extensions for vendor modules.
//!
//! A module ships base persistence classes and mapping skeletons. xtend
//! produces a mirror package holding thin subclasses and copies of the
//! mapping definitions, so they can be customized without touching vendor
//! code. Generation never overwrites an existing file.
//!
//! ## Architecture
//!
//! - [`module`] — module discovery and [`ModuleMetadata`] (paths and namespaces of the mirror package)
//! - [`technology`] — per-technology folders and discovery ([`TechnologyMetadata`])
//! - [`generator`] — the [`ExtensionGenerator`]s run for every module
//! - [`render`] — placeholder substitution ([`TemplateRenderer`])
//! - [`fs`] — filesystem access ([`Filesystem`], [`LocalFs`], [`MemoryFs`])
//! - [`config`] — conventions loaded from `xtend.yaml` and `XTEND_*` variables

pub mod config;
pub mod fs;
pub mod generator;
pub mod module;
pub mod render;
pub mod technology;
pub mod templates;

pub use config::{ConfigError, GenerateConfig, XtendConfig};
pub use fs::{Filesystem, LocalFs, MemoryFs};
pub use generator::{
    default_generators, ExtensionGenerator, FileReport, FileStatus, GenerateError, Pass,
};
pub use module::{discover_modules, Module, ModuleError, ModuleMetadata};
pub use render::{MustacheRenderer, TemplateRenderer};
pub use technology::{Technology, TechnologyMetadata};
