#![doc = include_str!("../README.md")]

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "translation-config.yml";

/// Alternative file names accepted during discovery, in lookup order.
pub const CONFIG_FILE_CANDIDATES: &[&str] = &[
    DEFAULT_CONFIG_FILE,
    "translation-config.yaml",
    "translation-config.toml",
];

/// Locale used when a bundle does not declare `default_locale`.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Separator used by the delimited-text format when none is configured.
pub const DEFAULT_SEPARATOR: &str = "=";

/// Extensions a bundle may declare.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "properties"];

const REQUIRED_BUNDLE_KEYS: &[&str] = &["extension", "path"];

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file '{}' not found", path.display())]
    NotFound { path: PathBuf },
    /// Failed to read or write the configuration file.
    #[error("Failed to access configuration file: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse or serialize a YAML configuration.
    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Failed to parse a TOML configuration.
    #[error("Invalid TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// Failed to serialize a TOML configuration.
    #[error("Failed to serialize TOML configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// The document has no `bundles`, or the list is empty.
    #[error("'{}' does not have any bundles", path.display())]
    NoBundles { path: PathBuf },
    /// A bundle entry lacks one of the required keys.
    #[error("bundle #{index} is missing required key(s): {}", missing.join(", "))]
    MissingBundleKeys {
        /// Zero-based position of the entry in `bundles`.
        index: usize,
        missing: Vec<&'static str>,
    },
    /// The bundle path does not exist.
    #[error("{} does not exist", path.display())]
    PathNotFound { path: PathBuf },
    /// The bundle path exists but is not a directory.
    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },
    /// The declared extension has no parser.
    #[error(".{extension} files are not one of the supported types ({})", SUPPORTED_EXTENSIONS.join(", "))]
    UnsupportedExtension { extension: String },
    /// The bundle directory contains no file with the declared extension.
    #[error("no .{extension} file found in {}", path.display())]
    NoMatchingFiles { extension: String, path: PathBuf },
}

impl ConfigError {
    /// Byte offset and length of a parse error inside the configuration source.
    pub fn source_span(&self) -> Option<(usize, usize)> {
        match self {
            ConfigError::Yaml(err) => err.location().map(|loc| (loc.index(), 1)),
            ConfigError::TomlParse(err) => err
                .span()
                .map(|span| (span.start, span.end.saturating_sub(span.start).max(1))),
            _ => None,
        }
    }
}

/// Serialization used for a configuration file, chosen by its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// A bundle declaration as written in the configuration file.
///
/// Every field is optional at this level so that missing keys can be reported
/// together by [`TranslationConfig::validate`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BundleEntry {
    /// Directory holding the locale files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Locale file format (`json` or `properties`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Canonical locale, e.g. `en_US`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    /// Key/value separator for the `properties` format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
}

impl BundleEntry {
    fn missing_keys(&self) -> Vec<&'static str> {
        REQUIRED_BUNDLE_KEYS
            .iter()
            .copied()
            .filter(|key| match *key {
                "path" => self.path.is_none(),
                "extension" => self.extension.is_none(),
                _ => false,
            })
            .collect()
    }
}

/// The `translation-config.yml` document.
///
/// ```yaml
/// bundles:
///   - path: i18n
///     extension: json
///     default_locale: en_US
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TranslationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundles: Option<Vec<BundleEntry>>,
}

/// A validated bundle declaration with its directory resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleConfig {
    /// Absolute, canonical directory.
    pub path: PathBuf,
    pub extension: String,
    pub default_locale: String,
    pub separator: String,
}

impl TranslationConfig {
    /// Looks for one of [`CONFIG_FILE_CANDIDATES`] inside `dir`.
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_CANDIDATES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Reads the configuration from a path.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Parses configuration text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        };

        Ok(config)
    }

    /// Writes the configuration, choosing the format from the path.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        fs::write(path, content)?;
        Ok(())
    }

    /// Reads and validates the configuration in one step.
    ///
    /// Relative bundle paths are resolved against the directory holding the
    /// configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<BundleConfig>, ConfigError> {
        let path = path.as_ref();
        let config = Self::read_from_path(path)?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        config.validate(path, base_dir)
    }

    /// Checks every bundle declaration and resolves its directory.
    ///
    /// Per bundle the checks run in order: required keys, path existence,
    /// supported extension, at least one matching file. The first failure
    /// aborts validation.
    pub fn validate(
        &self,
        config_path: &Path,
        base_dir: &Path,
    ) -> Result<Vec<BundleConfig>, ConfigError> {
        let entries = match &self.bundles {
            Some(entries) if !entries.is_empty() => entries,
            _ => {
                return Err(ConfigError::NoBundles {
                    path: config_path.to_path_buf(),
                });
            },
        };

        let mut bundles = Vec::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            let missing = entry.missing_keys();
            let (Some(path), Some(extension)) = (&entry.path, &entry.extension) else {
                return Err(ConfigError::MissingBundleKeys { index, missing });
            };

            let path = resolve_path(base_dir, path)?;

            if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
                return Err(ConfigError::UnsupportedExtension {
                    extension: extension.clone(),
                });
            }

            if !has_files_with_extension(&path, extension)? {
                return Err(ConfigError::NoMatchingFiles {
                    extension: extension.clone(),
                    path,
                });
            }

            tracing::debug!("validated bundle {} (.{})", path.display(), extension);

            bundles.push(BundleConfig {
                path,
                extension: extension.clone(),
                default_locale: entry
                    .default_locale
                    .clone()
                    .filter(|locale| !locale.is_empty())
                    .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
                separator: entry
                    .separator
                    .clone()
                    .filter(|separator| !separator.is_empty())
                    .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            });
        }

        Ok(bundles)
    }
}

/// Resolves a bundle path against `base_dir` and canonicalizes it.
fn resolve_path(base_dir: &Path, path: &Path) -> Result<PathBuf, ConfigError> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };

    if !joined.exists() {
        return Err(ConfigError::PathNotFound { path: joined });
    }

    let resolved = fs::canonicalize(&joined)?;

    if !resolved.is_dir() {
        return Err(ConfigError::NotADirectory { path: resolved });
    }

    Ok(resolved)
}

fn has_files_with_extension(dir: &Path, extension: &str) -> Result<bool, ConfigError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            return Ok(true);
        }
    }

    Ok(false)
}
