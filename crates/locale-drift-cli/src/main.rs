use clap::{Parser, Subcommand};
use locale_drift_cli::commands::{
    CleanArgs, ExportArgs, GenerateArgs, InitArgs, run_clean, run_export, run_generate, run_init,
};
use miette::Result as MietteResult;

/// Exit code used when the run is interrupted with Ctrl+C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Parser)]
#[command(name = "locale-drift")]
#[command(about = "Report translation drift between a default locale and its snapshot")]
#[command(version)]
struct Cli {
    /// Log debug details (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every bundle with its snapshot and print the manifest
    #[command(visible_alias = "view")]
    Generate(GenerateArgs),

    /// Write per-locale translation request files from the manifest
    Export(ExportArgs),

    /// Scan source directories and write a configuration file
    Init(InitArgs),

    /// Remove the snapshot files of the configured bundles
    Clean(CleanArgs),
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .color(std::env::var_os("NO_COLOR").is_none())
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    locale_drift_cli::utils::ui::init_logging(cli.verbose);

    if let Err(err) = ctrlc::set_handler(|| std::process::exit(INTERRUPTED_EXIT_CODE)) {
        tracing::warn!("failed to set Ctrl+C handler: {}", err);
    }

    let result = match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Export(args) => run_export(args),
        Commands::Init(args) => run_init(args),
        Commands::Clean(args) => run_clean(args),
    };

    result.map_err(miette::Report::new)
}
