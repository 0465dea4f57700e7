use colored::Colorize;

use xtend_core::{discover_modules, GenerateConfig, LocalFs, ModuleMetadata};

/// Print every installed module with its extendable and valid state.
pub fn run(config: &GenerateConfig) -> Result<(), Box<dyn std::error::Error>> {
    let modules = discover_modules(&config.modules_dir)?;
    if modules.is_empty() {
        println!(
            "{}",
            format!("No modules found in {}.", config.modules_dir.display()).dimmed()
        );
        return Ok(());
    }

    println!("{}", "Installed modules:".bold());
    println!();
    println!(
        "  {:<30} {:<35} {:<12} {}",
        "NAME".dimmed(),
        "NAMESPACE".dimmed(),
        "EXTENDABLE".dimmed(),
        "LAYOUT".dimmed()
    );
    println!("  {}", "-".repeat(90).dimmed());

    for module in &modules {
        let metadata = ModuleMetadata::new(module, config);
        let extendable = if metadata.is_extendable() {
            "yes".green()
        } else {
            "no".dimmed()
        };
        let layout = if metadata.is_valid(&LocalFs) {
            "ok".green()
        } else {
            "wrong folder structure".yellow()
        };
        println!(
            "  {:<30} {:<35} {:<12} {}",
            module.name,
            module.namespace,
            extendable,
            layout
        );
    }

    println!();
    println!("{} module(s)", modules.len());
    Ok(())
}
