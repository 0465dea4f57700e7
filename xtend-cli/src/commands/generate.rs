use colored::Colorize;
use std::path::Path;

use xtend_core::{
    default_generators, discover_modules, ExtensionGenerator, FileReport, FileStatus,
    GenerateConfig, LocalFs, ModuleMetadata, MustacheRenderer,
};

use super::find_module;

/// Generate the mirror package of each named module.
///
/// - `dest` overrides the configured destination; it must exist.
/// - No names: prints the extendable modules and returns `Ok`.
/// - An unknown name aborts with an error; modules before it stay processed.
/// - Modules not opted in, or without an entity folder, are skipped.
pub fn run(
    config: GenerateConfig,
    modules: &[String],
    dest: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match dest {
        Some(dest) => config.with_destination(dest),
        None => config,
    };
    let config = config.resolve_destination()?;

    if modules.is_empty() {
        print_extendable(&config)?;
        return Ok(());
    }

    let fs = LocalFs;
    let renderer = MustacheRenderer;
    let generators = default_generators(&fs, &renderer);

    for name in modules {
        let module = find_module(&config, name)?;
        let metadata = ModuleMetadata::new(&module, &config);

        if !metadata.is_extendable() {
            println!("Ignoring module : \"{}\"", metadata.name().yellow());
            continue;
        }
        if !metadata.is_valid(&fs) {
            println!("{} : {}", metadata.name(), "wrong folder structure".yellow());
            continue;
        }

        generate_module(&metadata, &generators)?;
        println!();
    }

    println!("done!");
    Ok(())
}

/// Run every generator against one module, printing its reports.
pub fn generate_module(
    metadata: &ModuleMetadata,
    generators: &[Box<dyn ExtensionGenerator + '_>],
) -> Result<Vec<FileReport>, Box<dyn std::error::Error>> {
    tracing::info!(module = metadata.name(), "processing module");
    let mut all = Vec::new();
    for generator in generators {
        println!(
            "Processing {} : \"{}\"",
            generator.label(),
            metadata.name().cyan()
        );
        let reports = generator.generate(metadata)?;
        print_reports(&reports);
        all.extend(reports);
    }
    Ok(all)
}

fn print_reports(reports: &[FileReport]) {
    let mut current = None;
    for report in reports {
        if current != Some(report.pass) {
            println!(" - {}", report.pass.heading());
            current = Some(report.pass);
        }
        let marker = report.status.marker().to_string();
        let marker = match report.status {
            FileStatus::Created => marker.green(),
            FileStatus::Unchanged => marker.dimmed(),
            FileStatus::Missing => marker.yellow(),
        };
        println!("   {} {}", marker, report.name.cyan());
        tracing::debug!(status = ?report.status, path = %report.path.display(), "{}", report.name);
    }
}

fn print_extendable(config: &GenerateConfig) -> Result<(), Box<dyn std::error::Error>> {
    let modules = discover_modules(&config.modules_dir)?;
    println!();
    println!("{}", "You must provide a module name!".yellow());
    println!();
    println!("  Extendable modules:");
    for module in modules.iter().filter(|m| m.extendable) {
        println!("     - {}", module.name);
    }
    println!();
    Ok(())
}
