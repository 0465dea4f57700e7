use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xtend_core::{
    default_generators, discover_modules, FileReport, FileStatus, GenerateConfig, LocalFs,
    ModuleMetadata, MustacheRenderer, Pass,
};

// ── Fixtures ────────────────────────────────────────────────────────

struct Workspace {
    tmp: TempDir,
}

impl Workspace {
    /// A module with one direct entity (Post), one `Base`-prefixed entity
    /// (Tag), one entity without base class (Bar), and repositories stored
    /// under `Entity/Repository`.
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let module = tmp.path().join("vendor/acme/demo");

        write(
            &module.join("module.yaml"),
            "name: AcmeDemoModule\nnamespace: 'Acme\\DemoModule'\nextendable: true\n",
        );
        write(&module.join("Entity/Post.php"), "<?php class Post {}");
        write(&module.join("Entity/BaseTag.php"), "<?php class BaseTag {}");
        write(
            &module.join("Entity/Repository/BasePostRepository.php"),
            "<?php",
        );
        write(&module.join("Entity/Repository/TagRepository.php"), "<?php");

        let doctrine = module.join("Resources/config/doctrine");
        write(&doctrine.join("Post.orm.xml.skeleton"), "<post/>");
        write(&doctrine.join("Tag.orm.yml.skeleton"), "Tag: ~");
        write(&doctrine.join("Bar.orm.xml.skeleton"), "<bar/>");
        write(
            &module.join("Resources/config/serializer/Entity.Post.xml.skeleton"),
            "<serializer/>",
        );

        fs::create_dir_all(tmp.path().join("app")).unwrap();
        Workspace { tmp }
    }

    fn root(&self) -> &Path {
        self.tmp.path()
    }

    fn app(&self) -> PathBuf {
        self.root().join("app/Application/Acme/DemoModule")
    }

    fn config(&self) -> GenerateConfig {
        let mut config = GenerateConfig::default().with_destination(self.root().join("app"));
        config.modules_dir = self.root().join("vendor");
        config.repository_directory = "Entity/Repository".into();
        config.extended_repository_directory = "Entity/Repository".into();
        config
    }

    fn metadata(&self) -> ModuleMetadata {
        let config = self.config();
        let modules = discover_modules(&config.modules_dir).unwrap();
        assert_eq!(modules.len(), 1);
        ModuleMetadata::new(&modules[0], &config)
    }

    fn generate(&self) -> Vec<FileReport> {
        let fs = LocalFs;
        let renderer = MustacheRenderer;
        let meta = self.metadata();
        let reports: Vec<FileReport> = default_generators(&fs, &renderer)
            .iter()
            .flat_map(|generator| generator.generate(&meta).unwrap())
            .collect();
        reports
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut out = BTreeMap::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path.clone());
                out.insert(path, Vec::new());
            } else {
                let bytes = fs::read(&path).unwrap();
                out.insert(path, bytes);
            }
        }
    }
    out
}

fn find<'a>(reports: &'a [FileReport], pass: Pass, name: &str) -> &'a FileReport {
    reports
        .iter()
        .find(|r| r.pass == pass && r.name == name)
        .unwrap_or_else(|| panic!("no {pass:?} report for {name}"))
}

// ── Properties ──────────────────────────────────────────────────────

#[test]
fn first_run_creates_mirror_package() {
    let ws = Workspace::new();
    let reports = ws.generate();

    assert_eq!(
        find(&reports, Pass::Scaffold, "ApplicationAcmeDemoModule").status,
        FileStatus::Created
    );
    assert_eq!(find(&reports, Pass::Mapping, "Post.orm.xml").status, FileStatus::Created);
    assert_eq!(find(&reports, Pass::Entity, "Post").status, FileStatus::Created);
    assert_eq!(
        find(&reports, Pass::Repository, "PostRepository").status,
        FileStatus::Created
    );

    assert_eq!(
        find(&reports, Pass::Entity, "Post").path,
        ws.app().join("Entity/Post.php")
    );
    assert_eq!(
        find(&reports, Pass::Repository, "TagRepository").path,
        ws.root()
            .join("vendor/acme/demo/Entity/Repository/BaseTagRepository.php")
    );

    assert!(ws.app().join("Resources/config/doctrine/Post.orm.xml").is_file());
    assert!(ws.app().join("Resources/config/doctrine/Tag.orm.yml").is_file());
    assert!(ws.app().join("Resources/config/serializer/Entity.Post.xml").is_file());
    assert!(ws.app().join("Entity/Post.php").is_file());
    assert!(ws.app().join("Entity/Repository/PostRepository.php").is_file());
}

#[test]
fn second_run_is_idempotent() {
    let ws = Workspace::new();
    ws.generate();
    let before = snapshot(&ws.root().join("app"));

    let reports = ws.generate();

    assert!(reports
        .iter()
        .all(|r| r.status != FileStatus::Created), "second run created files: {reports:?}");
    assert_eq!(snapshot(&ws.root().join("app")), before);
}

#[test]
fn existing_files_are_never_overwritten() {
    let ws = Workspace::new();
    let entity = ws.app().join("Entity/Post.php");
    let mapping = ws.app().join("Resources/config/doctrine/Post.orm.xml");
    write(&entity, "my custom entity");
    write(&mapping, "my custom mapping");

    let reports = ws.generate();

    assert_eq!(find(&reports, Pass::Entity, "Post").status, FileStatus::Unchanged);
    assert_eq!(fs::read_to_string(entity).unwrap(), "my custom entity");
    assert_eq!(fs::read_to_string(mapping).unwrap(), "my custom mapping");
}

#[test]
fn base_prefixed_entity_is_extended() {
    let ws = Workspace::new();
    ws.generate();

    let content = fs::read_to_string(ws.app().join("Entity/Tag.php")).unwrap();
    assert!(content.contains("use Acme\\DemoModule\\Entity\\BaseTag as BaseTag;"));
    assert!(content.contains("class Tag extends BaseTag"));
}

#[test]
fn entity_without_base_class_is_reported_missing() {
    let ws = Workspace::new();
    let reports = ws.generate();

    assert_eq!(find(&reports, Pass::Entity, "BaseBar").status, FileStatus::Missing);
    assert!(!ws.app().join("Entity/Bar.php").exists());
}

#[test]
fn entity_namespaces_are_composed() {
    let ws = Workspace::new();
    ws.generate();

    let content = fs::read_to_string(ws.app().join("Entity/Post.php")).unwrap();
    assert!(content.contains("namespace Application\\Acme\\DemoModule\\Entity;"));
    assert!(content.contains("use Acme\\DemoModule\\Entity\\Post as BasePost;"));
    assert!(content.contains("class Post extends BasePost"));
}

#[test]
fn repository_requires_base_prefixed_source() {
    let ws = Workspace::new();
    let reports = ws.generate();

    assert_eq!(
        find(&reports, Pass::Repository, "TagRepository").status,
        FileStatus::Missing
    );
    assert!(!ws.app().join("Entity/Repository/TagRepository.php").exists());

    let content =
        fs::read_to_string(ws.app().join("Entity/Repository/PostRepository.php")).unwrap();
    assert!(content.contains("namespace Application\\Acme\\DemoModule\\Entity\\Repository;"));
    assert!(content.contains("use Acme\\DemoModule\\Entity\\Repository\\BasePostRepository;"));
}

#[test]
fn module_without_mapping_skeletons_generates_only_scaffolding() {
    let ws = Workspace::new();
    fs::remove_dir_all(ws.root().join("vendor/acme/demo/Resources")).unwrap();

    let reports = ws.generate();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].pass, Pass::Scaffold);
}

// ── Discovery ───────────────────────────────────────────────────────

#[test]
fn discovery_finds_nested_modules_sorted_by_name() {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp.path().join("vendor/zeta/module.yaml"),
        "namespace: Zeta\\Core\n",
    );
    write(
        &tmp.path().join("vendor/acme/blog/module.yaml"),
        "name: AcmeBlog\nnamespace: Acme\\Blog\nextendable: true\n",
    );

    let modules = discover_modules(&tmp.path().join("vendor")).unwrap();
    let names: Vec<_> = modules.iter().map(|m| m.name.as_str()).collect();

    assert_eq!(names, vec!["AcmeBlog", "Core"]);
    assert!(modules[0].extendable);
    assert!(!modules[1].extendable);
}

#[cfg(unix)]
#[test]
fn discovery_follows_symlinked_modules() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("packages/blog");
    write(
        &source.join("module.yaml"),
        "name: AcmeBlog\nnamespace: Acme\\Blog\n",
    );
    fs::create_dir_all(tmp.path().join("vendor/acme")).unwrap();
    std::os::unix::fs::symlink(&source, tmp.path().join("vendor/acme/blog")).unwrap();

    let modules = discover_modules(&tmp.path().join("vendor")).unwrap();

    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].name, "AcmeBlog");
}

#[test]
fn discovery_without_modules_dir_is_empty() {
    let tmp = TempDir::new().unwrap();
    assert!(discover_modules(&tmp.path().join("vendor")).unwrap().is_empty());
}

#[test]
fn malformed_manifest_is_an_error() {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("vendor/bad/module.yaml"), "extendable: [");

    let err = discover_modules(&tmp.path().join("vendor")).unwrap_err();
    assert!(err.to_string().contains("Invalid module manifest"));
}
