//! Export command implementation.

use crate::commands::ConfigArgs;
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use locale_drift::{Bundler, Manifest, TranslationRequests, reconcile_all};
use locale_drift_config::DEFAULT_LOCALE;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Arguments for the export command.
#[derive(Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Locale to request translations for; may be repeated.
    #[arg(short, long = "locale", value_name = "LOCALE", required = true)]
    pub locales: Vec<String>,

    /// Send a locale's values to another target (`fr=fr_FR`); an empty target skips the locale.
    #[arg(short, long = "map", value_name = "LOCALE=TARGET", value_parser = parse_mapping)]
    pub mappings: Vec<(String, String)>,

    /// Locale named in the first column of every request.
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub source_locale: String,

    /// Directory the request files are written to.
    #[arg(long, value_name = "DIR", default_value = "translations-out")]
    pub out_dir: PathBuf,
}

/// Run the export command.
///
/// Reconciles every bundle like `generate` does, then writes one CSV request
/// per target with the added values and the values each locale is missing.
pub fn run_export(args: ExportArgs) -> Result<(), CliError> {
    ui::print_export_header();

    let (config_path, configs) = args.config.load()?;
    ui::print_config(&config_path);
    ui::print_discovered(configs.len());

    let mut bundles = Bundler::gather(&configs)?;
    let report = reconcile_all(&mut bundles)?;
    let manifest = Manifest::from_report(&report);

    let mapping: BTreeMap<String, String> = args.mappings.into_iter().collect();
    let requests = TranslationRequests::from_manifest(&manifest, &args.locales, &mapping);

    if requests.is_empty() {
        ui::print_nothing_to_export();
        return Ok(());
    }

    let written = requests.write_csv(&args.out_dir, &args.source_locale)?;
    for (target, path) in requests.targets().zip(&written) {
        let count = requests.values(target).map_or(0, |values| values.len());
        ui::print_wrote_request(path, target, count);
    }
    ui::print_export_summary(written.len());

    Ok(())
}

fn parse_mapping(value: &str) -> Result<(String, String), String> {
    let (locale, target) = value
        .split_once('=')
        .ok_or_else(|| format!("expected LOCALE=TARGET, got '{value}'"))?;

    if locale.is_empty() {
        return Err(format!("missing locale in '{value}'"));
    }

    Ok((locale.to_string(), target.to_string()))
}
