//! Per-technology directory conventions and source discovery.

use std::io;
use std::path::{Path, PathBuf};

use crate::fs::Filesystem;
use crate::module::{directory_to_namespace, ModuleMetadata};

/// Extension of generated and base class files.
pub const CLASS_EXTENSION: &str = ".php";

/// Suffix of repository class files.
pub const REPOSITORY_SUFFIX: &str = "Repository.php";

/// Suffix removed from mapping skeletons when they are copied.
pub const SKELETON_SUFFIX: &str = ".skeleton";

const DOCTRINE_MAPPING_DIRECTORY: &str = "Resources/config/doctrine";
const SERIALIZER_MAPPING_DIRECTORY: &str = "Resources/config/serializer";

/// A persistence (or serialization) technology a module may ship skeletons for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    /// Doctrine ORM (relational mapping).
    Orm,
    /// Doctrine ODM (document store).
    Odm,
    /// Doctrine PHPCR (hierarchical content repository).
    Phpcr,
    /// Serializer configuration.
    Serializer,
}

impl Technology {
    /// Every technology, in generation order.
    pub const ALL: [Technology; 4] = [
        Technology::Orm,
        Technology::Odm,
        Technology::Phpcr,
        Technology::Serializer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Technology::Orm => "Doctrine ORM",
            Technology::Odm => "Doctrine ODM",
            Technology::Phpcr => "Doctrine PHPCR",
            Technology::Serializer => "Serializer config",
        }
    }

    /// Mapping folder, relative to the module root and to the mirror package root.
    pub fn mapping_directory(self) -> &'static str {
        match self {
            Technology::Serializer => SERIALIZER_MAPPING_DIRECTORY,
            _ => DOCTRINE_MAPPING_DIRECTORY,
        }
    }

    /// File name suffixes identifying this technology's mapping skeletons.
    pub fn skeleton_suffixes(self) -> &'static [&'static str] {
        match self {
            Technology::Orm => &[".orm.xml.skeleton", ".orm.yml.skeleton"],
            Technology::Odm => &[".odm.xml.skeleton", ".odm.yml.skeleton"],
            Technology::Phpcr => &[".phpcr.xml.skeleton", ".phpcr.yml.skeleton"],
            Technology::Serializer => &[".xml.skeleton", ".yml.skeleton"],
        }
    }

    /// `true` if entity and repository subclasses are generated for this technology.
    pub fn generates_classes(self) -> bool {
        !matches!(self, Technology::Serializer)
    }

    /// Fixed class folder of the document technologies. `None` means the
    /// module's configured entity and repository folders are used.
    fn class_directory(self) -> Option<&'static str> {
        match self {
            Technology::Odm => Some("Document"),
            Technology::Phpcr => Some("PHPCR"),
            Technology::Orm | Technology::Serializer => None,
        }
    }
}

impl std::fmt::Display for Technology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Source and destination folders of one technology for one module.
///
/// Discovery results are never cached: every call re-scans the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnologyMetadata {
    technology: Technology,
    mapping_source_dir: PathBuf,
    mapping_dest_dir: PathBuf,
    entity_source_dir: PathBuf,
    entity_dest_dir: PathBuf,
    repository_source_dir: PathBuf,
    repository_dest_dir: PathBuf,
    repository_namespace: String,
    extended_repository_namespace: String,
}

impl TechnologyMetadata {
    pub fn new(technology: Technology, module: &ModuleMetadata) -> Self {
        let root = module.root_path();
        let extended_root = module.extended_root_path();

        let (entity, repository, extended_entity, extended_repository) =
            match technology.class_directory() {
                Some(dir) => (dir, dir, dir, dir),
                None => (
                    module.entity_directory(),
                    module.repository_directory(),
                    module.extended_entity_directory(),
                    module.extended_repository_directory(),
                ),
            };

        TechnologyMetadata {
            technology,
            mapping_source_dir: root.join(technology.mapping_directory()),
            mapping_dest_dir: extended_root.join(technology.mapping_directory()),
            entity_source_dir: root.join(entity),
            entity_dest_dir: extended_root.join(extended_entity),
            repository_source_dir: root.join(repository),
            repository_dest_dir: extended_root.join(extended_repository),
            repository_namespace: format!(
                "{}\\{}",
                module.namespace(),
                directory_to_namespace(repository)
            ),
            extended_repository_namespace: format!(
                "{}\\{}",
                module.extended_namespace(),
                directory_to_namespace(extended_repository)
            ),
        }
    }

    pub fn technology(&self) -> Technology {
        self.technology
    }

    pub fn mapping_source_dir(&self) -> &Path {
        &self.mapping_source_dir
    }

    pub fn mapping_dest_dir(&self) -> &Path {
        &self.mapping_dest_dir
    }

    pub fn entity_source_dir(&self) -> &Path {
        &self.entity_source_dir
    }

    pub fn entity_dest_dir(&self) -> &Path {
        &self.entity_dest_dir
    }

    pub fn repository_source_dir(&self) -> &Path {
        &self.repository_source_dir
    }

    pub fn repository_dest_dir(&self) -> &Path {
        &self.repository_dest_dir
    }

    /// Fully qualified namespace of the base repositories.
    pub fn repository_namespace(&self) -> &str {
        &self.repository_namespace
    }

    /// Fully qualified namespace of the generated repositories.
    pub fn extended_repository_namespace(&self) -> &str {
        &self.extended_repository_namespace
    }

    /// Mapping skeletons in the mapping source folder.
    ///
    /// Empty if the folder does not exist.
    pub fn list_mapping_files(&self, fs: &dyn Filesystem) -> io::Result<Vec<PathBuf>> {
        let suffixes = self.technology.skeleton_suffixes();
        let files = list_matching(fs, &self.mapping_source_dir, |name| {
            suffixes
                .iter()
                .any(|suffix| name.len() > suffix.len() && name.ends_with(suffix))
        })?;
        Ok(files)
    }

    /// Entity short names derived from the mapping skeletons.
    ///
    /// The name is everything before the first `.` of the file name, so an
    /// xml and a yml skeleton for the same entity yield the name twice.
    pub fn list_entity_names(&self, fs: &dyn Filesystem) -> io::Result<Vec<String>> {
        let names = self
            .list_mapping_files(fs)?
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .filter_map(|name| name.split('.').next())
            .map(str::to_string)
            .collect();
        Ok(names)
    }

    /// Repository class files in the repository source folder and its
    /// subfolders.
    ///
    /// Empty if the folder does not exist.
    pub fn list_repository_files(&self, fs: &dyn Filesystem) -> io::Result<Vec<PathBuf>> {
        let dir = &self.repository_source_dir;
        let Some(files) = fs.list_files_recursive(dir)? else {
            tracing::debug!(dir = %dir.display(), "source directory missing, nothing to discover");
            return Ok(Vec::new());
        };
        Ok(files
            .into_iter()
            .filter(|file| {
                file.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(REPOSITORY_SUFFIX))
            })
            .map(|file| dir.join(file))
            .collect())
    }
}

fn list_matching(
    fs: &dyn Filesystem,
    dir: &Path,
    matches: impl Fn(&str) -> bool,
) -> io::Result<Vec<PathBuf>> {
    let Some(names) = fs.list_files(dir)? else {
        tracing::debug!(dir = %dir.display(), "source directory missing, nothing to discover");
        return Ok(Vec::new());
    };
    Ok(names
        .into_iter()
        .filter(|name| matches(name))
        .map(|name| dir.join(name))
        .collect())
}
