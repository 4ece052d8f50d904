//! The externally visible report of a run.

use crate::error::DriftError;
use crate::reconcile::{DriftReport, FileReport};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Serialization used when printing the manifest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Additions and missing keys over all bundles, as one list of single-entry
/// mappings per category. An empty category is left out of the output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<BTreeMap<String, Vec<String>>>,
}

impl Manifest {
    pub fn from_report(report: &DriftReport) -> Self {
        Self {
            added: entries(&report.additions),
            missing: entries(&report.missing),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.missing.is_empty()
    }

    /// Serializes the manifest without a trailing newline.
    pub fn render(&self, format: OutputFormat) -> Result<String, DriftError> {
        let rendered = match format {
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
            OutputFormat::Json => {
                let mut buf = Vec::new();
                let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                self.serialize(&mut serializer)?;
                String::from_utf8_lossy(&buf).into_owned()
            },
        };

        Ok(rendered.trim_end().to_string())
    }

    /// Reads back a manifest produced by [`Manifest::render`].
    pub fn parse(content: &str, format: OutputFormat) -> Result<Self, DriftError> {
        match format {
            OutputFormat::Yaml => Ok(serde_yaml::from_str(content)?),
            OutputFormat::Json => Ok(serde_json::from_str(content)?),
        }
    }
}

fn entries(report: &FileReport) -> Vec<BTreeMap<String, Vec<String>>> {
    report
        .iter()
        .map(|(file, values)| {
            let mut values = values.clone();
            values.sort();
            BTreeMap::from([(file.display().to_string(), values)])
        })
        .collect()
}
