use clap::{Parser, Subcommand};
use odoo_pkg::{
    commands::{
        check::{self, CheckCommand},
        manifest::{self, ManifestCommand},
        prepare::{self, PrepareCommand},
        requires::{self, RequiresCommand, RequiresDirCommand},
        series::{self, SeriesCommand},
    },
    GlobalOpts,
};
use odoo_pkg_logger as logger;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "odoo-pkg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Python packaging metadata for Odoo addons",
    long_about = "odoo-pkg reads Odoo addon manifests and derives the Python distribution \
                  name, version and requirements of each addon."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the requirements of one addon
    Requires(RequiresCommand),
    /// Print the combined requirements of every installable addon in a directory
    RequiresDir(RequiresDirCommand),
    /// Tell whether a directory holds an installable addon (exit 1 if not)
    Check(CheckCommand),
    /// Print the parsed manifest of an addon
    Manifest(ManifestCommand),
    /// Print setup keywords for a project packaging a single addon
    Prepare(PrepareCommand),
    /// Print setup keywords for a project bundling several addons
    PrepareAll(PrepareCommand),
    /// List supported Odoo series
    Series(SeriesCommand),
}

fn init_tracing(global: &GlobalOpts) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(global.tracing_filter()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let result = if global.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();

    init_tracing(&cli.global);
    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let result = match cli.command {
        Commands::Requires(cmd) => requires::handle_requires(cmd, &cli.global),
        Commands::RequiresDir(cmd) => requires::handle_requires_dir(cmd, &cli.global),
        Commands::Check(cmd) => match check::handle_check(cmd, &cli.global) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Manifest(cmd) => manifest::handle_manifest(cmd, &cli.global),
        Commands::Prepare(cmd) => prepare::handle_prepare(cmd, &cli.global),
        Commands::PrepareAll(cmd) => prepare::handle_prepare_all(cmd, &cli.global),
        Commands::Series(cmd) => series::handle_series(cmd, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        if cli.global.verbosity_level() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
