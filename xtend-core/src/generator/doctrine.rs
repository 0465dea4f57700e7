use std::path::Path;

use super::{copy_mapping_files, ExtensionGenerator, FileReport, FileStatus, GenerateError, Pass};
use crate::fs::Filesystem;
use crate::module::ModuleMetadata;
use crate::render::TemplateRenderer;
use crate::technology::{Technology, TechnologyMetadata, CLASS_EXTENSION};
use crate::templates::ClassTemplates;

/// The base class a generated subclass extends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseClass {
    /// `<name>.php` exists.
    Direct(String),
    /// Only `Base<name>.php` exists.
    Prefixed(String),
    /// Neither exists; holds the last attempted name (`Base<name>`).
    Missing(String),
}

/// Look for `<name>.php`, then `Base<name>.php`, in `dir`.
pub fn resolve_base_class(fs: &dyn Filesystem, dir: &Path, name: &str) -> BaseClass {
    if fs.is_file(&dir.join(format!("{name}{CLASS_EXTENSION}"))) {
        return BaseClass::Direct(name.to_string());
    }
    let prefixed = format!("Base{name}");
    if fs.is_file(&dir.join(format!("{prefixed}{CLASS_EXTENSION}"))) {
        BaseClass::Prefixed(prefixed)
    } else {
        BaseClass::Missing(prefixed)
    }
}

/// Generator for the Doctrine technologies (ORM, ODM, PHPCR).
///
/// Runs three passes, each safe to repeat:
/// 1. copy mapping skeletons,
/// 2. generate entity subclasses,
/// 3. generate repository subclasses.
pub struct DoctrineGenerator<'a> {
    technology: Technology,
    templates: ClassTemplates,
    fs: &'a dyn Filesystem,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> DoctrineGenerator<'a> {
    /// Generator using the built-in templates of `technology`.
    ///
    /// Returns `None` for technologies without class generation (serializer config).
    pub fn new(
        technology: Technology,
        fs: &'a dyn Filesystem,
        renderer: &'a dyn TemplateRenderer,
    ) -> Option<Self> {
        let templates = ClassTemplates::for_technology(technology)?;
        Some(Self::with_templates(technology, templates, fs, renderer))
    }

    pub fn with_templates(
        technology: Technology,
        templates: ClassTemplates,
        fs: &'a dyn Filesystem,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        DoctrineGenerator {
            technology,
            templates,
            fs,
            renderer,
        }
    }

    /// Pass 2: one subclass per entity name, extending the base class found.
    pub fn generate_entity_files(
        &self,
        module: &ModuleMetadata,
        meta: &TechnologyMetadata,
    ) -> Result<Vec<FileReport>, GenerateError> {
        let names = meta
            .list_entity_names(self.fs)
            .map_err(GenerateError::io("list", meta.mapping_source_dir()))?;

        let mut reports = Vec::with_capacity(names.len());
        for name in names {
            let (resolved, extended_name) =
                match resolve_base_class(self.fs, meta.entity_source_dir(), &name) {
                    BaseClass::Direct(resolved) => (resolved, format!("Base{name}")),
                    BaseClass::Prefixed(resolved) => (resolved.clone(), resolved),
                    BaseClass::Missing(attempted) => {
                        let path = meta
                            .entity_source_dir()
                            .join(format!("{attempted}{CLASS_EXTENSION}"));
                        tracing::warn!(entity = %name, path = %path.display(), "no base class found");
                        reports.push(FileReport::new(
                            Pass::Entity,
                            FileStatus::Missing,
                            attempted,
                            &path,
                        ));
                        continue;
                    }
                };

            let destination = meta
                .entity_dest_dir()
                .join(format!("{name}{CLASS_EXTENSION}"));
            if self.fs.is_file(&destination) {
                tracing::debug!(path = %destination.display(), "entity exists, skipping");
                reports.push(FileReport::new(
                    Pass::Entity,
                    FileStatus::Unchanged,
                    name,
                    &destination,
                ));
                continue;
            }

            let content = self.renderer.render(
                self.templates.entity,
                &[
                    ("extended_namespace", module.extended_namespace()),
                    ("namespace", module.namespace()),
                    ("class", name.as_str()),
                    ("name", resolved.as_str()),
                    ("extended_name", extended_name.as_str()),
                ],
            );
            self.fs
                .write(&destination, content.as_bytes())
                .map_err(GenerateError::io("write", &destination))?;
            tracing::debug!(path = %destination.display(), base = %resolved, "generated entity");
            reports.push(FileReport::new(
                Pass::Entity,
                FileStatus::Created,
                name,
                &destination,
            ));
        }
        Ok(reports)
    }

    /// Pass 3: one repository per entity name, only when `Base<name>Repository.php` exists.
    ///
    /// Creates the repository destination folder when needed.
    pub fn generate_repository_files(
        &self,
        meta: &TechnologyMetadata,
    ) -> Result<Vec<FileReport>, GenerateError> {
        let names = meta
            .list_entity_names(self.fs)
            .map_err(GenerateError::io("list", meta.mapping_source_dir()))?;

        let mut reports = Vec::with_capacity(names.len());
        for name in names {
            let label = format!("{name}Repository");
            let source = meta
                .repository_source_dir()
                .join(format!("Base{label}{CLASS_EXTENSION}"));
            if !self.fs.is_file(&source) {
                tracing::warn!(entity = %name, path = %source.display(), "no base repository found");
                reports.push(FileReport::new(
                    Pass::Repository,
                    FileStatus::Missing,
                    label,
                    &source,
                ));
                continue;
            }

            let destination_dir = meta.repository_dest_dir();
            let destination = destination_dir.join(format!("{label}{CLASS_EXTENSION}"));
            if self.fs.is_file(&destination) {
                tracing::debug!(path = %destination.display(), "repository exists, skipping");
                reports.push(FileReport::new(
                    Pass::Repository,
                    FileStatus::Unchanged,
                    label,
                    &destination,
                ));
                continue;
            }

            let content = self.renderer.render(
                self.templates.repository,
                &[
                    ("extended_namespace", meta.extended_repository_namespace()),
                    ("namespace", meta.repository_namespace()),
                    ("name", name.as_str()),
                ],
            );
            if !self.fs.is_dir(destination_dir) {
                self.fs
                    .create_dir_all(destination_dir)
                    .map_err(GenerateError::io("create", destination_dir))?;
            }
            self.fs
                .write(&destination, content.as_bytes())
                .map_err(GenerateError::io("write", &destination))?;
            tracing::debug!(path = %destination.display(), "generated repository");
            reports.push(FileReport::new(
                Pass::Repository,
                FileStatus::Created,
                label,
                &destination,
            ));
        }
        Ok(reports)
    }
}

impl ExtensionGenerator for DoctrineGenerator<'_> {
    fn label(&self) -> &str {
        self.technology.label()
    }

    fn generate(&self, module: &ModuleMetadata) -> Result<Vec<FileReport>, GenerateError> {
        tracing::info!(module = module.name(), technology = %self.technology, "generating");
        let meta = TechnologyMetadata::new(self.technology, module);

        let mut reports = copy_mapping_files(self.fs, &meta)?;
        reports.extend(self.generate_entity_files(module, &meta)?);
        reports.extend(self.generate_repository_files(&meta)?);
        Ok(reports)
    }
}
