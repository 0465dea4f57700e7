use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xtend_cli::commands::{self, generate, inspect, list};

#[derive(Parser)]
#[command(
    name = "xtend",
    version,
    about = "xtend: generate application-level extensions of vendor modules"
)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = xtend_core::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log every file decision
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the extension of one or more modules
    Generate {
        /// Module names (e.g. AcmeDemoModule); lists extendable modules when empty
        modules: Vec<String>,
        /// The base folder where the application folder is created
        #[arg(short, long)]
        dest: Option<PathBuf>,
    },
    /// List installed modules
    List,
    /// Show the folders and files a generation would use
    Inspect {
        /// Module name
        module: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = commands::load_config(&cli.config).and_then(|config| match cli.command {
        Commands::Generate { modules, dest } => generate::run(config, &modules, dest.as_deref()),
        Commands::List => list::run(&config),
        Commands::Inspect { module } => inspect::run(&config, &module),
    });

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
