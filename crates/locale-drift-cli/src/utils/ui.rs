// CLI output formatting with consistent styling using colored.
// Everything here goes to stderr; stdout is reserved for the manifest.

use colored::Colorize as _;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Installs the stderr log subscriber. `RUST_LOG` wins unless `verbose` is set.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(color_enabled())
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}

pub fn print_header() {
    eprintln!("{}", "Locale Drift".dimmed());
}

pub fn print_config(path: &Path) {
    eprintln!("{} {}", "Using".dimmed(), path.display().to_string().cyan());
}

pub fn print_discovered(bundle_count: usize) {
    eprintln!(
        "{} {}",
        "Discovered".dimmed(),
        format!("{} bundle(s)", bundle_count).green()
    );
}

pub fn print_no_drift() {
    eprintln!("{}", "All bundles match their snapshots!".green());
}

pub fn print_drift_summary(added_files: usize, missing_files: usize) {
    eprintln!(
        "{} {} file(s) with additions, {} file(s) with missing keys",
        "Drift:".yellow(),
        added_files.to_string().cyan(),
        missing_files.to_string().cyan()
    );
}

// Export

pub fn print_export_header() {
    eprintln!("{}", "Locale Drift Export".dimmed());
}

pub fn print_nothing_to_export() {
    eprintln!("{}", "Nothing to export, all bundles match their snapshots!".green());
}

pub fn print_wrote_request(path: &Path, target: &str, value_count: usize) {
    eprintln!(
        "  {} {} ({}, {} value(s))",
        "->".dimmed(),
        path.display(),
        target.cyan(),
        value_count
    );
}

pub fn print_export_summary(count: usize) {
    eprintln!("{} {} request file(s) written", "Done:".green(), count);
}

// Init

pub fn print_init_header() {
    eprintln!("{}", "Locale Drift Init".dimmed());
}

pub fn print_found_bundle(path: &Path, extension: &str, file_count: usize) {
    eprintln!(
        "  {} {} (.{}, {} file(s))",
        "->".dimmed(),
        path.display(),
        extension,
        file_count
    );
}

pub fn print_wrote_config(path: &Path, bundle_count: usize) {
    eprintln!(
        "{} {} ({} bundle(s))",
        "Wrote".green(),
        path.display(),
        bundle_count.to_string().cyan()
    );
}

// Clean

pub fn print_clean_header() {
    eprintln!("{}", "Locale Drift Clean".dimmed());
}

pub fn print_would_remove(path: &Path) {
    eprintln!("{} {}", "Would remove:".yellow(), path.display());
}

pub fn print_removed(path: &Path) {
    eprintln!("{} {}", "Removed:".green(), path.display());
}

pub fn print_clean_dry_run_summary(count: usize) {
    eprintln!(
        "{} {} snapshot(s) would be removed",
        "Dry run:".yellow(),
        count
    );
}

pub fn print_clean_summary(count: usize) {
    eprintln!("{} {} snapshot(s) removed", "Done:".green(), count);
}
