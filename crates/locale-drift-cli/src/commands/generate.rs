//! Generate command implementation.

use crate::commands::ConfigArgs;
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use locale_drift::{Bundler, Manifest, OutputFormat, reconcile_all};

/// Arguments for the generate command.
#[derive(Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Serialization of the manifest printed on stdout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::default())]
    pub output: OutputFormat,
}

/// Run the generate command.
pub fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    ui::print_header();

    let (config_path, configs) = args.config.load()?;
    ui::print_config(&config_path);
    ui::print_discovered(configs.len());

    let mut bundles = Bundler::gather(&configs)?;
    let report = reconcile_all(&mut bundles)?;
    let manifest = Manifest::from_report(&report);

    if manifest.is_empty() {
        ui::print_no_drift();
        return Ok(());
    }

    println!("{}", manifest.render(args.output)?);
    ui::print_drift_summary(manifest.added.len(), manifest.missing.len());

    Ok(())
}
