use colored::Colorize;
use std::path::Path;

use xtend_core::{GenerateConfig, LocalFs, ModuleMetadata, Technology, TechnologyMetadata};

use super::find_module;

/// Print what a generation of `name` would read and write, per technology.
///
/// Nothing is written.
pub fn run(config: &GenerateConfig, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let module = find_module(config, name)?;
    let metadata = ModuleMetadata::new(&module, config);
    let fs = LocalFs;

    println!("{} {}", "Module".bold(), metadata.name().cyan());
    println!("  namespace           {}", metadata.namespace());
    println!("  extended namespace  {}", metadata.extended_namespace());
    println!("  path                {}", metadata.root_path().display());
    println!("  extended path       {}", metadata.extended_root_path().display());
    println!("  extendable          {}", metadata.is_extendable());
    println!("  valid               {}", metadata.is_valid(&fs));

    for technology in Technology::ALL {
        let meta = TechnologyMetadata::new(technology, &metadata);
        println!();
        println!("{}", technology.label().bold());
        print_dir("mapping", meta.mapping_source_dir(), meta.mapping_dest_dir());
        for file in meta.list_mapping_files(&fs)? {
            println!("    {}", file_name(&file).dimmed());
        }

        if !technology.generates_classes() {
            continue;
        }

        print_dir("entities", meta.entity_source_dir(), meta.entity_dest_dir());
        for name in meta.list_entity_names(&fs)? {
            println!("    {}", name.dimmed());
        }
        print_dir(
            "repositories",
            meta.repository_source_dir(),
            meta.repository_dest_dir(),
        );
        for file in meta.list_repository_files(&fs)? {
            println!("    {}", file_name(&file).dimmed());
        }
    }
    Ok(())
}

fn print_dir(label: &str, source: &Path, destination: &Path) {
    println!(
        "  {:<13} {} -> {}",
        label,
        source.display(),
        destination.display()
    );
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
