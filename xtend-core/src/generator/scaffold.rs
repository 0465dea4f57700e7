use super::{ExtensionGenerator, FileReport, FileStatus, GenerateError, Pass};
use crate::fs::Filesystem;
use crate::module::ModuleMetadata;
use crate::render::TemplateRenderer;
use crate::technology::CLASS_EXTENSION;
use crate::templates;

/// Folders of a mirror package, relative to its root.
///
/// The extended entity folder is created as well.
pub const SCAFFOLD_DIRECTORIES: &[&str] = &[
    "Resources/config/doctrine",
    "Resources/config/serializer",
    "Resources/config/routing",
    "Resources/views",
    "Command",
    "DependencyInjection",
    "Controller",
    "Document",
    "PHPCR",
];

/// Creates the mirror package layout and its module class.
///
/// Runs first: the mapping and entity passes of the other generators write
/// into folders created here.
pub struct ScaffoldGenerator<'a> {
    template: &'a str,
    fs: &'a dyn Filesystem,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> ScaffoldGenerator<'a> {
    pub fn new(fs: &'a dyn Filesystem, renderer: &'a dyn TemplateRenderer) -> Self {
        ScaffoldGenerator {
            template: templates::MODULE,
            fs,
            renderer,
        }
    }

    fn create_directories(&self, module: &ModuleMetadata) -> Result<(), GenerateError> {
        let root = module.extended_root_path();
        let directories = std::iter::once(root.to_path_buf())
            .chain(SCAFFOLD_DIRECTORIES.iter().map(|dir| root.join(dir)))
            .chain(std::iter::once(root.join(module.extended_entity_directory())));

        for dir in directories {
            if self.fs.is_dir(&dir) {
                continue;
            }
            self.fs
                .create_dir_all(&dir)
                .map_err(GenerateError::io("create", &dir))?;
            tracing::debug!(path = %dir.display(), "created directory");
        }
        Ok(())
    }
}

impl ExtensionGenerator for ScaffoldGenerator<'_> {
    fn label(&self) -> &str {
        "Module"
    }

    fn generate(&self, module: &ModuleMetadata) -> Result<Vec<FileReport>, GenerateError> {
        tracing::info!(module = module.name(), "scaffolding mirror package");
        self.create_directories(module)?;

        let class = module.extended_class_name();
        let destination = module
            .extended_root_path()
            .join(format!("{class}{CLASS_EXTENSION}"));

        if self.fs.is_file(&destination) {
            return Ok(vec![FileReport::new(
                Pass::Scaffold,
                FileStatus::Unchanged,
                class,
                &destination,
            )]);
        }

        let content = self.renderer.render(
            self.template,
            &[
                ("extended_namespace", module.extended_namespace()),
                ("namespace", module.namespace()),
                ("name", module.name()),
                ("class", class.as_str()),
            ],
        );
        self.fs
            .write(&destination, content.as_bytes())
            .map_err(GenerateError::io("write", &destination))?;

        Ok(vec![FileReport::new(
            Pass::Scaffold,
            FileStatus::Created,
            class,
            &destination,
        )])
    }
}
