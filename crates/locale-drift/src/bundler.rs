//! Builds [`Bundle`]s from validated configuration.

use crate::bundle::Bundle;
use crate::error::DriftError;
use fs_err as fs;
use locale_drift_config::BundleConfig;
use std::path::{Path, PathBuf};

pub struct Bundler;

impl Bundler {
    /// Lists the files of every configured bundle without touching snapshots.
    pub fn discover(configs: &[BundleConfig]) -> Result<Vec<Bundle>, DriftError> {
        configs
            .iter()
            .map(|config| -> Result<Bundle, DriftError> {
                let files = list_files_with_extension(&config.path, &config.extension)?;
                tracing::debug!(
                    "discovered {} .{} file(s) in {}",
                    files.len(),
                    config.extension,
                    config.path.display()
                );

                Ok(Bundle::new(
                    config.path.clone(),
                    config.extension.clone(),
                    files,
                    Some(config.default_locale.clone()),
                )
                .with_separator(config.separator.as_str()))
            })
            .collect()
    }

    /// Discovers every bundle and makes sure each one has its snapshot.
    pub fn gather(configs: &[BundleConfig]) -> Result<Vec<Bundle>, DriftError> {
        let mut bundles = Self::discover(configs)?;

        for bundle in &mut bundles {
            bundle.generate_snapshot_file()?;
        }

        Ok(bundles)
    }
}

/// Files directly inside `dir` whose extension is `extension`, sorted.
fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DriftError> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
