use super::{copy_mapping_files, ExtensionGenerator, FileReport, GenerateError};
use crate::fs::Filesystem;
use crate::module::ModuleMetadata;
use crate::technology::{Technology, TechnologyMetadata};

/// Copies serializer config skeletons. Generates no classes.
pub struct SerializerGenerator<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> SerializerGenerator<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        SerializerGenerator { fs }
    }
}

impl ExtensionGenerator for SerializerGenerator<'_> {
    fn label(&self) -> &str {
        Technology::Serializer.label()
    }

    fn generate(&self, module: &ModuleMetadata) -> Result<Vec<FileReport>, GenerateError> {
        tracing::info!(module = module.name(), technology = %Technology::Serializer, "generating");
        let meta = TechnologyMetadata::new(Technology::Serializer, module);
        copy_mapping_files(self.fs, &meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use crate::generator::tests::demo_metadata;
    use crate::generator::{FileStatus, Pass};

    #[test]
    fn copies_serializer_skeletons() {
        let fs = MemoryFs::new();
        fs.add_file(
            "/vendor/demo/Resources/config/serializer/Entity.Post.xml.skeleton",
            "<serializer/>",
        );
        fs.add_file("/vendor/demo/Resources/config/serializer/README.md", "");
        fs.add_dir("/app/Application/Acme/DemoModule/Resources/config/serializer");

        let reports = SerializerGenerator::new(&fs).generate(&demo_metadata()).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].pass, Pass::Mapping);
        assert_eq!(reports[0].status, FileStatus::Created);
        assert_eq!(reports[0].name, "Entity.Post.xml");
        assert_eq!(
            fs.read_to_string(
                "/app/Application/Acme/DemoModule/Resources/config/serializer/Entity.Post.xml"
            )
            .as_deref(),
            Some("<serializer/>")
        );
    }

    #[test]
    fn module_without_serializer_config_yields_nothing() {
        let fs = MemoryFs::new();
        let reports = SerializerGenerator::new(&fs).generate(&demo_metadata()).unwrap();
        assert!(reports.is_empty());
    }
}
