//! Extension generators.
//!
//! A generator materializes part of a module's mirror package. Every
//! generator is idempotent: an existing destination file is reported as
//! [`FileStatus::Unchanged`] and never rewritten.
//!
//! | Generator | Produces |
//! |-----------|----------|
//! | [`ScaffoldGenerator`] | mirror package folders and the module class |
//! | [`DoctrineGenerator`] | mapping files, entity and repository subclasses (ORM, ODM, PHPCR) |
//! | [`SerializerGenerator`] | serializer config files |

mod doctrine;
mod scaffold;
mod serializer;

use std::io;
use std::path::{Path, PathBuf};

pub use doctrine::{resolve_base_class, BaseClass, DoctrineGenerator};
pub use scaffold::{ScaffoldGenerator, SCAFFOLD_DIRECTORIES};
pub use serializer::SerializerGenerator;

use crate::fs::Filesystem;
use crate::module::ModuleMetadata;
use crate::render::TemplateRenderer;
use crate::technology::{Technology, TechnologyMetadata, SKELETON_SUFFIX};

/// Outcome for a single destination file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file did not exist and was written.
    Created,
    /// The file already existed and was left alone.
    Unchanged,
    /// No source exists for this item; nothing was written.
    Missing,
}

impl FileStatus {
    /// Single character marker used in command output.
    pub fn marker(self) -> char {
        match self {
            FileStatus::Created => '+',
            FileStatus::Unchanged => '~',
            FileStatus::Missing => '!',
        }
    }
}

/// The generation step a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Scaffold,
    Mapping,
    Entity,
    Repository,
}

impl Pass {
    pub fn heading(self) -> &'static str {
        match self {
            Pass::Scaffold => "Generating module files",
            Pass::Mapping => "Copy mapping files",
            Pass::Entity => "Generating entity files",
            Pass::Repository => "Generating entity repository files",
        }
    }
}

/// What happened to one item of a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub pass: Pass,
    pub status: FileStatus,
    /// Short item name as shown to the user.
    pub name: String,
    /// Destination path, or the attempted source path for [`FileStatus::Missing`].
    pub path: PathBuf,
}

impl FileReport {
    fn new(pass: Pass, status: FileStatus, name: impl Into<String>, path: &Path) -> Self {
        FileReport {
            pass,
            status,
            name: name.into(),
            path: path.to_path_buf(),
        }
    }
}

/// Filesystem fault raised during generation. Aborts the run.
#[derive(Debug)]
pub enum GenerateError {
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
}

impl GenerateError {
    fn io(action: &'static str, path: &Path) -> impl FnOnce(io::Error) -> GenerateError {
        let path = path.to_path_buf();
        move |source| GenerateError::Io {
            action,
            path,
            source,
        }
    }
}

impl std::fmt::Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::Io {
                action,
                path,
                source,
            } => write!(f, "Failed to {action} '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Io { source, .. } => Some(source),
        }
    }
}

/// One step of extension generation for a module.
pub trait ExtensionGenerator {
    /// Name shown in the `Processing ...` progress line.
    fn label(&self) -> &str;

    fn generate(&self, module: &ModuleMetadata) -> Result<Vec<FileReport>, GenerateError>;
}

/// The generators of a full run, in execution order: scaffolding, the three
/// Doctrine technologies, then serializer config.
pub fn default_generators<'a>(
    fs: &'a dyn Filesystem,
    renderer: &'a dyn TemplateRenderer,
) -> Vec<Box<dyn ExtensionGenerator + 'a>> {
    let mut generators: Vec<Box<dyn ExtensionGenerator + 'a>> =
        vec![Box::new(ScaffoldGenerator::new(fs, renderer))];
    for technology in Technology::ALL {
        if let Some(generator) = DoctrineGenerator::new(technology, fs, renderer) {
            generators.push(Box::new(generator));
        }
    }
    generators.push(Box::new(SerializerGenerator::new(fs)));
    generators
}

/// Copy every mapping skeleton to the mirror package, dropping the `.skeleton` suffix.
///
/// The destination folder must already exist.
pub(crate) fn copy_mapping_files(
    fs: &dyn Filesystem,
    meta: &TechnologyMetadata,
) -> Result<Vec<FileReport>, GenerateError> {
    let files = meta
        .list_mapping_files(fs)
        .map_err(GenerateError::io("list", meta.mapping_source_dir()))?;

    let mut reports = Vec::with_capacity(files.len());
    for source in files {
        let Some(file_name) = source.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let destination_name = file_name
            .strip_suffix(SKELETON_SUFFIX)
            .unwrap_or(file_name)
            .to_string();
        let destination = meta.mapping_dest_dir().join(&destination_name);

        if fs.is_file(&destination) {
            tracing::debug!(path = %destination.display(), "mapping file exists, skipping");
            reports.push(FileReport::new(
                Pass::Mapping,
                FileStatus::Unchanged,
                destination_name,
                &destination,
            ));
            continue;
        }

        fs.copy(&source, &destination)
            .map_err(GenerateError::io("copy", &destination))?;
        tracing::debug!(from = %source.display(), to = %destination.display(), "copied mapping skeleton");
        reports.push(FileReport::new(
            Pass::Mapping,
            FileStatus::Created,
            destination_name,
            &destination,
        ));
    }
    Ok(reports)
}
