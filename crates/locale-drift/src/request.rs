//! Translation requests: the values a translator has to work on, grouped by
//! target locale and written as one CSV sheet per target.

use crate::error::DriftError;
use crate::manifest::Manifest;
use fs_err as fs;
use indexmap::{IndexMap, IndexSet};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Columns following the source and target columns of a request sheet.
pub const CONTEXT_COLUMNS: [&str; 2] = ["CONTEXT", "CONTEXT_DESCRIPTION"];

/// Values to translate, keyed by request target.
///
/// A target is a locale, or whatever the locale is mapped to. Values keep the
/// order they were first seen in and appear once per target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationRequests {
    targets: IndexMap<String, IndexSet<String>>,
}

impl TranslationRequests {
    /// Builds the requests for `locales` out of a manifest.
    ///
    /// Every added value is requested from every locale. A missing entry is
    /// requested only from the locale its file belongs to, that is the first
    /// of `locales` the file name (without extension) ends with. `mapping`
    /// renames a locale's target; mapping a locale to an empty string leaves
    /// it out of the export.
    pub fn from_manifest(
        manifest: &Manifest,
        locales: &[String],
        mapping: &BTreeMap<String, String>,
    ) -> Self {
        let mut requests = Self::default();

        for locale in locales {
            let Some(target) = out_target(locale, mapping) else {
                tracing::info!("locale {} is not exported", locale);
                continue;
            };

            let added = manifest
                .added
                .iter()
                .flat_map(|files| files.values())
                .flatten()
                .cloned();
            requests.extend(target, added);
        }

        for (file, entries) in manifest.missing.iter().flat_map(|files| files.iter()) {
            let target =
                locale_of(file, locales).and_then(|locale| out_target(locale, mapping));
            let Some(target) = target else {
                tracing::info!("missing entries of {} are not exported", file);
                continue;
            };

            requests.extend(target, entries.iter().map(|entry| missing_value(entry).to_string()));
        }

        requests
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Targets in the order they were first requested.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    pub fn values(&self, target: &str) -> Option<&IndexSet<String>> {
        self.targets.get(target)
    }

    /// Writes `<target>.csv` under `out_dir` for every target and returns the
    /// written paths.
    ///
    /// The header row is the source locale, the target and the
    /// [`CONTEXT_COLUMNS`]; each following row carries one source value with
    /// the other cells left for the translator.
    pub fn write_csv(&self, out_dir: &Path, source_locale: &str) -> Result<Vec<PathBuf>, DriftError> {
        fs::create_dir_all(out_dir)?;

        let mut written = Vec::with_capacity(self.targets.len());

        for (target, values) in &self.targets {
            let path = out_dir.join(format!("{target}.csv"));
            let mut writer = csv::Writer::from_writer(fs::File::create(&path)?);

            writer.write_record([
                source_locale,
                target.as_str(),
                CONTEXT_COLUMNS[0],
                CONTEXT_COLUMNS[1],
            ])?;
            for value in values {
                writer.write_record([value.as_str(), "", "", ""])?;
            }
            writer.flush()?;

            tracing::debug!("wrote {} value(s) to {}", values.len(), path.display());
            written.push(path);
        }

        Ok(written)
    }

    fn extend(&mut self, target: &str, values: impl IntoIterator<Item = String>) {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }

        self.targets
            .entry(target.to_string())
            .or_default()
            .extend(values);
    }
}

fn out_target<'a>(locale: &'a str, mapping: &'a BTreeMap<String, String>) -> Option<&'a str> {
    let target = mapping.get(locale).map_or(locale, String::as_str);
    (!target.is_empty()).then_some(target)
}

fn locale_of<'a>(file: &str, locales: &'a [String]) -> Option<&'a str> {
    let stem = Path::new(file).with_extension("");
    let stem = stem.to_string_lossy();

    locales
        .iter()
        .find(|locale| stem.ends_with(locale.as_str()))
        .map(String::as_str)
}

/// The value half of a `key: value` missing entry.
fn missing_value(entry: &str) -> &str {
    entry.split_once(": ").map_or(entry, |(_, value)| value)
}
