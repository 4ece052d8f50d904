//! A bundle of locale files and the lifecycle of its snapshot.

use crate::error::DriftError;
use crate::format::BundleFormat;
use fs_err as fs;
use locale_drift_config::{DEFAULT_LOCALE, DEFAULT_SEPARATOR};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the default-locale file to name its snapshot.
pub const SNAPSHOT_SUFFIX: &str = ".snapshot";

/// File names containing this marker are never default-locale candidates.
const SNAPSHOT_MARKER: &str = "snapshot";

/// Locale files sharing a directory, an extension and a default locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    /// Absolute directory of the locale files.
    pub path: PathBuf,
    /// Declared extension, checked against [`BundleFormat`] when processed.
    pub extension: String,
    /// Tracked files. Starts as the files with `extension` and gains the
    /// snapshot file once it is generated.
    pub files: BTreeSet<PathBuf>,
    /// Canonical locale, e.g. `en_US`.
    pub default_locale: String,
    /// Key/value separator for delimited-text files.
    pub separator: String,
}

impl Bundle {
    pub fn new<I>(path: PathBuf, extension: String, files: I, default_locale: Option<String>) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            path,
            extension,
            files: files.into_iter().collect(),
            default_locale: default_locale.unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Replaces the separator; an empty separator falls back to the default.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        if !separator.is_empty() {
            self.separator = separator;
        }
        self
    }

    /// The fragment a default-locale file name must contain, e.g. `_en_US`.
    pub fn default_locale_pattern(&self) -> String {
        format!("_{}", self.default_locale)
    }

    /// Resolves the bundle's declared extension to a parser format.
    pub fn format(&self) -> Result<BundleFormat, DriftError> {
        BundleFormat::from_extension(&self.extension)
    }

    /// Finds the single file belonging to the default locale.
    ///
    /// A candidate's name contains [`Self::default_locale_pattern`] and does
    /// not contain `snapshot`. Zero or several candidates are errors.
    pub fn default_locale_file(&self) -> Result<PathBuf, DriftError> {
        let pattern = self.default_locale_pattern();
        let candidates: Vec<&PathBuf> = self
            .files
            .iter()
            .filter(|file| is_default_locale_candidate(file, &pattern))
            .collect();

        match candidates.as_slice() {
            [] => Err(DriftError::NoDefaultLocaleFile {
                pattern,
                path: self.path.clone(),
            }),
            [file] => Ok((*file).clone()),
            _ => Err(DriftError::AmbiguousDefaultLocaleFile {
                pattern,
                path: self.path.clone(),
                candidates: candidates.iter().map(|file| (*file).clone()).collect(),
            }),
        }
    }

    /// The snapshot path for this bundle, whether or not it exists yet.
    pub fn snapshot_file(&self) -> Result<PathBuf, DriftError> {
        Ok(snapshot_path_for(&self.default_locale_file()?))
    }

    /// Makes sure the snapshot exists and is tracked, returning its path.
    ///
    /// A missing snapshot is created as a verbatim copy of the default-locale
    /// file. An existing snapshot is never touched.
    pub fn generate_snapshot_file(&mut self) -> Result<PathBuf, DriftError> {
        let default_locale_file = self.default_locale_file()?;
        let snapshot_file = snapshot_path_for(&default_locale_file);

        if !snapshot_file.exists() {
            tracing::info!(
                "generating snapshot file {} based on {}",
                snapshot_file.display(),
                default_locale_file.display()
            );
            fs::copy(&default_locale_file, &snapshot_file)?;
        }

        self.files.insert(snapshot_file.clone());

        Ok(snapshot_file)
    }
}

/// Appends [`SNAPSHOT_SUFFIX`] to a file path.
pub fn snapshot_path_for(file: &Path) -> PathBuf {
    let mut name = OsString::from(file.as_os_str());
    name.push(SNAPSHOT_SUFFIX);
    PathBuf::from(name)
}

fn is_default_locale_candidate(file: &Path, pattern: &str) -> bool {
    file.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(pattern) && !name.contains(SNAPSHOT_MARKER))
}
