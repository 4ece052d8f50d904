//! Locale file parsers.
//!
//! Every parser turns one file into an [`Entries`] map; [`parse_files`]
//! collects the maps of a whole bundle keyed by file.

pub mod json;
pub mod properties;

use crate::error::DriftError;
use crate::format::BundleFormat;
use indexmap::IndexMap;
use std::path::PathBuf;

/// Key/value entries of a single locale file.
pub type Entries = IndexMap<String, String>;

/// Entries of every file in a bundle, keyed by file path.
pub type ParsedBundle = IndexMap<PathBuf, Entries>;

/// Parses all `files` with the parser of `format`.
///
/// The first file that fails to parse aborts the whole bundle.
pub fn parse_files<'a, I>(
    format: BundleFormat,
    files: I,
    separator: &str,
) -> Result<ParsedBundle, DriftError>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let mut parsed = ParsedBundle::new();

    for file in files {
        let entries = format.parse_file(file, separator)?;
        tracing::debug!("parsed {} entries from {}", entries.len(), file.display());
        parsed.insert(file.clone(), entries);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_files_keys_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let en = temp_dir.path().join("app_en_US.properties");
        let fr = temp_dir.path().join("app_fr.properties");
        fs::write(&en, "hello=Hello\n").unwrap();
        fs::write(&fr, "hello=Bonjour\n").unwrap();

        let files = vec![en.clone(), fr.clone()];
        let parsed = parse_files(BundleFormat::Properties, &files, "=").unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[&en]["hello"], "Hello");
        assert_eq!(parsed[&fr]["hello"], "Bonjour");
    }

    #[test]
    fn test_parse_files_stops_on_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("app_en_US.json");
        let bad = temp_dir.path().join("app_fr.json");
        fs::write(&good, r#"{"a": "1"}"#).unwrap();
        fs::write(&bad, r#"{"a": "#).unwrap();

        let files = vec![good, bad.clone()];
        let err = parse_files(BundleFormat::Json, &files, "=").unwrap_err();

        assert!(matches!(err, DriftError::Json { ref path, .. } if *path == bad));
    }
}
