//! Installed modules and the metadata of their mirror packages.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::GenerateConfig;
use crate::fs::Filesystem;

/// File marking a directory as a module.
pub const MANIFEST_FILE: &str = "module.yaml";

/// How deep below the modules folder manifests are searched for.
const MAX_DISCOVERY_DEPTH: usize = 3;

/// Error raised while discovering or loading modules.
#[derive(Debug)]
pub enum ModuleError {
    /// A `module.yaml` could not be parsed or is incomplete.
    Manifest { path: PathBuf, message: String },
    /// The modules folder could not be read.
    Io { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for ModuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleError::Manifest { path, message } => {
                write!(f, "Invalid module manifest '{}': {message}", path.display())
            }
            ModuleError::Io { path, source } => {
                write!(f, "Cannot read '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ModuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModuleError::Io { source, .. } => Some(source),
            ModuleError::Manifest { .. } => None,
        }
    }
}

/// Contents of a `module.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleManifest {
    #[serde(default)]
    pub name: Option<String>,
    pub namespace: String,
    /// Opt-in marker for extension generation.
    #[serde(default)]
    pub extendable: bool,
}

/// An installed module: a folder shipping base classes and mapping skeletons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
    pub namespace: String,
    pub extendable: bool,
}

impl Module {
    /// Load the module rooted at `root` from its manifest.
    pub fn load(root: &Path) -> Result<Self, ModuleError> {
        let manifest_path = root.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&manifest_path).map_err(|source| ModuleError::Io {
            path: manifest_path.clone(),
            source,
        })?;
        let manifest: ModuleManifest =
            serde_yaml::from_str(&content).map_err(|e| ModuleError::Manifest {
                path: manifest_path.clone(),
                message: e.to_string(),
            })?;
        Self::from_manifest(root, manifest).map_err(|message| ModuleError::Manifest {
            path: manifest_path,
            message,
        })
    }

    /// Build a module from an already parsed manifest.
    ///
    /// The name defaults to the last namespace segment.
    pub fn from_manifest(root: &Path, manifest: ModuleManifest) -> Result<Self, String> {
        let namespace = manifest.namespace.trim_matches('\\').to_string();
        if namespace.is_empty() {
            return Err("namespace must not be empty".into());
        }
        let name = match manifest.name {
            Some(name) if !name.is_empty() => name,
            _ => namespace_segments(&namespace)
                .last()
                .map(|s| s.to_string())
                .unwrap_or_default(),
        };
        Ok(Module {
            name,
            path: root.to_path_buf(),
            namespace,
            extendable: manifest.extendable,
        })
    }
}

/// Find every module below `modules_dir`, sorted by name.
///
/// A missing folder holds no modules. Once a manifest is found its folder is
/// not searched any deeper.
pub fn discover_modules(modules_dir: &Path) -> Result<Vec<Module>, ModuleError> {
    let mut modules = Vec::new();
    if modules_dir.is_dir() {
        visit(modules_dir, 0, &mut modules)?;
    }
    modules.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(modules)
}

fn visit(dir: &Path, depth: usize, out: &mut Vec<Module>) -> Result<(), ModuleError> {
    if dir.join(MANIFEST_FILE).is_file() {
        out.push(Module::load(dir)?);
        return Ok(());
    }
    if depth >= MAX_DISCOVERY_DEPTH {
        return Ok(());
    }

    let io_err = |source| ModuleError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        // Symlinked module folders count as directories.
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            subdirs.push(path);
        }
    }
    subdirs.sort();
    for subdir in subdirs {
        visit(&subdir, depth + 1, out)?;
    }
    Ok(())
}

fn namespace_segments(namespace: &str) -> impl Iterator<Item = &str> {
    namespace.split('\\').filter(|s| !s.is_empty())
}

/// Turn a relative directory name into a namespace fragment (`Entity/Repository` -> `Entity\Repository`).
pub(crate) fn directory_to_namespace(directory: &str) -> String {
    directory.trim_matches('/').replace('/', "\\")
}

/// Paths and namespaces of a module and of its generated mirror package.
///
/// Everything is computed by string composition when constructed; only
/// [`is_valid`](Self::is_valid) looks at the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMetadata {
    name: String,
    root_path: PathBuf,
    namespace: String,
    extended_root_path: PathBuf,
    extended_namespace: String,
    application_namespace: String,
    entity_directory: String,
    repository_directory: String,
    extended_entity_directory: String,
    extended_repository_directory: String,
    extendable: bool,
}

impl ModuleMetadata {
    pub fn new(module: &Module, config: &GenerateConfig) -> Self {
        let extended_root_path = namespace_segments(&module.namespace)
            .fold(config.application_dir(), |path, segment| path.join(segment));
        let extended_namespace = format!("{}\\{}", config.application_namespace, module.namespace);

        ModuleMetadata {
            name: module.name.clone(),
            root_path: module.path.clone(),
            namespace: module.namespace.clone(),
            extended_root_path,
            extended_namespace,
            application_namespace: config.application_namespace.clone(),
            entity_directory: config.entity_directory.clone(),
            repository_directory: config.repository_directory.clone(),
            extended_entity_directory: config.extended_entity_directory.clone(),
            extended_repository_directory: config.extended_repository_directory.clone(),
            extendable: module.extendable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn extended_root_path(&self) -> &Path {
        &self.extended_root_path
    }

    pub fn extended_namespace(&self) -> &str {
        &self.extended_namespace
    }

    pub fn entity_directory(&self) -> &str {
        &self.entity_directory
    }

    pub fn repository_directory(&self) -> &str {
        &self.repository_directory
    }

    pub fn extended_entity_directory(&self) -> &str {
        &self.extended_entity_directory
    }

    pub fn extended_repository_directory(&self) -> &str {
        &self.extended_repository_directory
    }

    /// Class name of the generated module class (`Application` + module name).
    pub fn extended_class_name(&self) -> String {
        format!("{}{}", self.application_namespace, self.name)
    }

    /// `true` if the module opted in to extension generation.
    pub fn is_extendable(&self) -> bool {
        self.extendable
    }

    /// `true` if the module has the required folder layout.
    ///
    /// The entity folder must exist, and the mirror package must not be the
    /// module itself.
    pub fn is_valid(&self, fs: &dyn Filesystem) -> bool {
        self.extended_root_path != self.root_path
            && fs.is_dir(&self.root_path.join(&self.entity_directory))
    }
}
