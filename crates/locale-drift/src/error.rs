use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No file in the bundle matches the default-locale pattern.
    #[error(
        "expected a default locale file matching '{pattern}' but no files in {} matched",
        path.display()
    )]
    NoDefaultLocaleFile { pattern: String, path: PathBuf },

    /// More than one file matches the default-locale pattern.
    #[error(
        "multiple files match '{pattern}' in {}: {}; expecting only a single match",
        path.display(),
        candidates.iter().map(|c| c.display().to_string()).collect::<Vec<_>>().join(", ")
    )]
    AmbiguousDefaultLocaleFile {
        pattern: String,
        path: PathBuf,
        /// Sorted candidate files.
        candidates: Vec<PathBuf>,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} does not contain a JSON object at the top level", path.display())]
    NotAnObject { path: PathBuf },

    #[error("unsupported bundle extension '{extension}'")]
    UnsupportedFormat { extension: String },

    /// A file was expected among the parsed bundle files but was not there.
    #[error("{} is not tracked by its bundle", path.display())]
    UntrackedFile { path: PathBuf },

    /// A literal dotted key and a nested path flatten to the same key.
    #[error("duplicate key '{key}' in {} after flattening nested objects", path.display())]
    DuplicateKey { path: PathBuf, key: String },

    #[error("manifest JSON error: {0}")]
    ManifestJson(#[from] serde_json::Error),

    #[error("manifest YAML error: {0}")]
    ManifestYaml(#[from] serde_yaml::Error),

    #[error("failed to write translation request: {0}")]
    Csv(#[from] csv::Error),
}
