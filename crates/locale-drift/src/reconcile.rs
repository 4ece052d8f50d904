//! Comparison of a bundle's files against its snapshot.
//!
//! The snapshot is the single source of truth for which keys a bundle is
//! expected to contain. The live default-locale file is only consulted to
//! find values that the snapshot has not seen yet.

use crate::bundle::Bundle;
use crate::error::DriftError;
use crate::parser::{self, Entries, ParsedBundle};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Per-file lists of strings, ordered by file path.
pub type FileReport = BTreeMap<PathBuf, Vec<String>>;

/// Additions and missing keys found in one or more bundles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriftReport {
    /// Default-locale file → values absent from its snapshot.
    pub additions: FileReport,
    /// Any bundle file → `key: value` strings for snapshot keys it lacks.
    pub missing: FileReport,
}

impl DriftReport {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.missing.is_empty()
    }

    /// Folds another report into this one. A file reported by both keeps the
    /// entries of `other`.
    pub fn merge(&mut self, other: DriftReport) {
        self.additions.extend(other.additions);
        self.missing.extend(other.missing);
    }
}

/// Values of `candidate` that appear nowhere among the values of `source`.
///
/// Comparison is by value only: a key renamed with its value unchanged is not
/// an addition, while an edited value under an existing key is. The snapshot
/// entry holding the old value is not retracted. The result is sorted and
/// deduplicated.
pub fn additions(source: &Entries, candidate: &Entries) -> Vec<String> {
    if source == candidate {
        return Vec::new();
    }

    let known: HashSet<&str> = source.values().map(String::as_str).collect();

    candidate
        .values()
        .filter(|value| !known.contains(value.as_str()))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `key: value` strings for every key of `source` absent from `target`.
///
/// Only key presence matters; the source value is included for context.
pub fn missing(source: &Entries, target: &Entries) -> Vec<String> {
    let mut missing: Vec<String> = source
        .iter()
        .filter(|(key, _)| !target.contains_key(key.as_str()))
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();

    missing.sort();
    missing
}

/// Reconciles one bundle against its snapshot.
///
/// The bundle's extension is checked again here, so a bundle built without
/// going through configuration validation still fails cleanly.
pub fn reconcile_bundle(bundle: &mut Bundle) -> Result<DriftReport, DriftError> {
    let format = bundle.format()?;
    let snapshot_file = bundle.generate_snapshot_file()?;
    let default_locale_file = bundle.default_locale_file()?;
    let parsed = parser::parse_files(format, &bundle.files, &bundle.separator)?;

    let source = entries_of(&parsed, &snapshot_file)?;
    let candidate = entries_of(&parsed, &default_locale_file)?;

    let mut report = DriftReport::default();

    let added = additions(source, candidate);
    if !added.is_empty() {
        report.additions.insert(default_locale_file, added);
    }

    for (file, entries) in &parsed {
        let absent = missing(source, entries);
        if !absent.is_empty() {
            report.missing.insert(file.clone(), absent);
        }
    }

    tracing::debug!(
        "reconciled {}: {} file(s) with additions, {} file(s) with missing keys",
        bundle.path.display(),
        report.additions.len(),
        report.missing.len()
    );

    Ok(report)
}

/// Reconciles every bundle in order and merges the results.
///
/// Stops at the first bundle that fails.
pub fn reconcile_all(bundles: &mut [Bundle]) -> Result<DriftReport, DriftError> {
    let mut report = DriftReport::default();

    for bundle in bundles {
        report.merge(reconcile_bundle(bundle)?);
    }

    Ok(report)
}

fn entries_of<'a>(parsed: &'a ParsedBundle, file: &Path) -> Result<&'a Entries, DriftError> {
    parsed.get(file).ok_or_else(|| DriftError::UntrackedFile {
        path: file.to_path_buf(),
    })
}
