//! Clean command implementation.

use crate::commands::ConfigArgs;
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use fs_err as fs;
use locale_drift::Bundler;

/// Arguments for the clean command.
#[derive(Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Dry run - show what would be removed without making changes.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the clean command.
///
/// Removes the snapshot of every configured bundle so the next `generate`
/// takes a fresh one. Bundles whose default-locale file cannot be resolved
/// are skipped with a warning.
pub fn run_clean(args: CleanArgs) -> Result<(), CliError> {
    ui::print_clean_header();

    let (config_path, configs) = args.config.load()?;
    ui::print_config(&config_path);

    let bundles = Bundler::discover(&configs)?;
    let mut count = 0;

    for bundle in &bundles {
        let snapshot = match bundle.snapshot_file() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!("skipping {}: {}", bundle.path.display(), err);
                continue;
            },
        };

        if !snapshot.exists() {
            tracing::debug!("no snapshot at {}", snapshot.display());
            continue;
        }

        count += 1;
        if args.dry_run {
            ui::print_would_remove(&snapshot);
        } else {
            fs::remove_file(&snapshot)?;
            ui::print_removed(&snapshot);
        }
    }

    if args.dry_run {
        ui::print_clean_dry_run_summary(count);
    } else {
        ui::print_clean_summary(count);
    }

    Ok(())
}
