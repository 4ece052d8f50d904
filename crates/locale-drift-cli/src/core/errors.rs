//! CLI error types rendered as miette diagnostics.
//!
//! Library errors are converted here so that every failure reaching `main`
//! carries a code, a help line and, for parse failures, the offending source.

// Fields in these structs are read by miette's Diagnostic derive macro
#![allow(unused)]

use fs_err as fs;
use locale_drift::DriftError;
use locale_drift_config::{ConfigError, SUPPORTED_EXTENSIONS};
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error when no configuration file can be found.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file not found: {}", expected_path.display())]
#[diagnostic(
    code(locale_drift::config::not_found),
    help(
        "Create a translation-config.yml with the following content, or run `locale-drift init`:\n\n  \
          bundles:\n  \
            - path: i18n\n    \
              extension: json\n    \
              default_locale: en_US\n"
    )
)]
pub struct ConfigNotFoundError {
    /// The path where the config was expected.
    pub expected_path: PathBuf,
}

/// Error when the configuration file is not valid YAML or TOML.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse configuration file")]
#[diagnostic(code(locale_drift::config::parse_error))]
pub struct ConfigParseError {
    /// The source content of the config file.
    #[source_code]
    pub src: NamedSource<String>,

    /// The span where the error occurred.
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// The underlying parse error message.
    #[help]
    pub help: String,
}

/// Error when the configuration parses but a bundle declaration is unusable.
#[derive(Debug, Diagnostic, Error)]
#[error("{message}")]
#[diagnostic(code(locale_drift::config::invalid))]
pub struct InvalidConfigError {
    pub message: String,

    #[help]
    pub help: Option<String>,
}

/// Error when `init` would overwrite an existing configuration.
#[derive(Debug, Diagnostic, Error)]
#[error("configuration file already exists: {}", path.display())]
#[diagnostic(
    code(locale_drift::config::exists),
    help("Pass --force to overwrite it")
)]
pub struct ConfigExistsError {
    pub path: PathBuf,
}

/// Error when a bundle has no default-locale file.
#[derive(Debug, Diagnostic, Error)]
#[error("no default locale file matching '{pattern}' in {path}")]
#[diagnostic(
    code(locale_drift::bundle::no_default_locale),
    help(
        "Add a file whose name contains '{pattern}', or set default_locale for this bundle"
    )
)]
pub struct NoDefaultLocaleFileError {
    pub pattern: String,
    pub path: String,
}

/// Error when several files claim to be the default locale.
#[derive(Debug, Diagnostic, Error)]
#[error("multiple files match '{pattern}' in {path}: {candidates}")]
#[diagnostic(
    code(locale_drift::bundle::ambiguous_default_locale),
    help("Keep a single file matching '{pattern}' in this directory")
)]
pub struct AmbiguousDefaultLocaleFileError {
    pub pattern: String,
    pub path: String,
    /// Comma-separated candidate files.
    pub candidates: String,
}

/// Error when a JSON locale file is malformed.
#[derive(Debug, Diagnostic, Error)]
#[error("failed to parse {}", path.display())]
#[diagnostic(code(locale_drift::parse::json))]
pub struct LocaleFileParseError {
    pub path: PathBuf,

    /// The source content of the locale file.
    #[source_code]
    pub src: NamedSource<String>,

    #[label("invalid JSON here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: String,
}

#[derive(Debug, Diagnostic, Error)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigNotFound(#[from] ConfigNotFoundError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigParse(#[from] ConfigParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidConfig(#[from] InvalidConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    ConfigExists(#[from] ConfigExistsError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    NoDefaultLocaleFile(#[from] NoDefaultLocaleFileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    AmbiguousDefaultLocaleFile(#[from] AmbiguousDefaultLocaleFileError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    LocaleFileParse(#[from] LocaleFileParseError),

    #[error("{0}")]
    #[diagnostic(code(locale_drift::drift))]
    Drift(DriftError),

    #[error("IO error: {0}")]
    #[diagnostic(code(locale_drift::io))]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    #[diagnostic(code(locale_drift::other))]
    Other(String),
}

impl CliError {
    /// Converts a configuration error, attaching the file content to parse
    /// failures so the diagnostic can point at the offending location.
    pub fn from_config(err: ConfigError, config_path: &Path) -> Self {
        if !matches!(err, ConfigError::Yaml(_) | ConfigError::TomlParse(_)) {
            return err.into();
        }

        let content = fs::read_to_string(config_path).unwrap_or_default();
        let span = err
            .source_span()
            .map(|(offset, len)| clamp_span(&content, offset, len));

        ConfigParseError {
            src: NamedSource::new(config_path.display().to_string(), content),
            span,
            help: err.to_string(),
        }
        .into()
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let help = match &err {
            ConfigError::NotFound { path } => {
                return ConfigNotFoundError {
                    expected_path: path.clone(),
                }
                .into();
            },
            ConfigError::Io(_) => return CliError::Other(err.to_string()),
            ConfigError::NoBundles { .. } => {
                Some("Add a `bundles` list with at least one entry".to_string())
            },
            ConfigError::MissingBundleKeys { .. } => {
                Some("Every bundle needs a `path` and an `extension`".to_string())
            },
            ConfigError::PathNotFound { .. } | ConfigError::NotADirectory { .. } => Some(
                "Relative bundle paths are resolved against the configuration file's directory"
                    .to_string(),
            ),
            ConfigError::UnsupportedExtension { .. } => Some(format!(
                "Use one of: {}",
                SUPPORTED_EXTENSIONS.join(", ")
            )),
            ConfigError::NoMatchingFiles { .. } => {
                Some("Check the bundle's `path` and `extension`".to_string())
            },
            _ => None,
        };

        InvalidConfigError {
            message: err.to_string(),
            help,
        }
        .into()
    }
}

impl From<DriftError> for CliError {
    fn from(err: DriftError) -> Self {
        match err {
            DriftError::NoDefaultLocaleFile { pattern, path } => NoDefaultLocaleFileError {
                pattern,
                path: path.display().to_string(),
            }
            .into(),
            DriftError::AmbiguousDefaultLocaleFile {
                pattern,
                path,
                candidates,
            } => AmbiguousDefaultLocaleFileError {
                pattern,
                path: path.display().to_string(),
                candidates: candidates
                    .iter()
                    .map(|file| file.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
            .into(),
            DriftError::Json { path, source } => {
                let content = fs::read_to_string(&path).unwrap_or_default();
                let span = (source.line() > 0).then(|| {
                    let span = span_from_line_col(&content, source.line(), source.column(), 1);
                    clamp_span(&content, span.offset(), span.len())
                });

                LocaleFileParseError {
                    src: NamedSource::new(path.display().to_string(), content),
                    path,
                    span,
                    help: source.to_string(),
                }
                .into()
            },
            DriftError::Io(err) => CliError::Io(err),
            other => CliError::Drift(other),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err.to_string())
    }
}

/// Calculate SourceSpan from line and column in source text.
pub fn span_from_line_col(source: &str, line: usize, col: usize, len: usize) -> SourceSpan {
    let mut offset = 0;
    for (i, line_content) in source.lines().enumerate() {
        if i + 1 == line {
            offset += col.saturating_sub(1);
            break;
        }
        offset += line_content.len() + 1; // +1 for newline
    }
    SourceSpan::new(offset.into(), len)
}

/// Keeps a span inside `source`; parsers report end-of-input one past the end.
fn clamp_span(source: &str, offset: usize, len: usize) -> SourceSpan {
    let last = source.len().saturating_sub(1);
    if offset > last {
        SourceSpan::new(last.into(), usize::from(!source.is_empty()))
    } else {
        SourceSpan::new(offset.into(), len.min(source.len() - offset))
    }
}
