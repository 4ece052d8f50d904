use crate::error::DriftError;
use crate::parser::{self, Entries};
use std::fmt;
use std::path::Path;

/// The closed set of locale file formats a bundle can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BundleFormat {
    /// Structured JSON documents, nested objects flattened to dotted keys.
    Json,
    /// Line-oriented `key=value` files.
    Properties,
}

impl BundleFormat {
    pub const ALL: [BundleFormat; 2] = [BundleFormat::Json, BundleFormat::Properties];

    /// Maps a configured extension to its format.
    pub fn from_extension(extension: &str) -> Result<Self, DriftError> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
            .ok_or_else(|| DriftError::UnsupportedFormat {
                extension: extension.to_string(),
            })
    }

    pub fn extension(self) -> &'static str {
        match self {
            BundleFormat::Json => "json",
            BundleFormat::Properties => "properties",
        }
    }

    /// Parses one file of this format into its entries.
    ///
    /// `separator` only applies to [`BundleFormat::Properties`].
    pub fn parse_file(self, path: &Path, separator: &str) -> Result<Entries, DriftError> {
        match self {
            BundleFormat::Json => parser::json::parse_file(path),
            BundleFormat::Properties => parser::properties::parse_file(path, separator),
        }
    }
}

impl fmt::Display for BundleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(BundleFormat::from_extension("json").unwrap(), BundleFormat::Json);
        assert_eq!(
            BundleFormat::from_extension("properties").unwrap(),
            BundleFormat::Properties
        );
    }

    #[test]
    fn test_from_extension_unsupported() {
        let err = BundleFormat::from_extension("xliff").unwrap_err();
        assert!(matches!(err, DriftError::UnsupportedFormat { ref extension } if extension == "xliff"));
    }

    #[test]
    fn test_extensions_match_config_list() {
        let extensions: Vec<_> = BundleFormat::ALL.iter().map(|f| f.extension()).collect();
        assert_eq!(extensions, locale_drift_config::SUPPORTED_EXTENSIONS);
    }
}
