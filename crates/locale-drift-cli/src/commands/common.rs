use crate::core::CliError;
use clap::Args;
use locale_drift_config::{BundleConfig, DEFAULT_CONFIG_FILE, TranslationConfig};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Path to the configuration file (defaults to translation-config.yml in the current directory).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// The explicit `--config`, or the first known configuration file in the
    /// current directory.
    pub fn resolve_path(&self) -> Result<PathBuf, CliError> {
        if let Some(path) = &self.config {
            return Ok(path.clone());
        }

        let cwd = std::env::current_dir()?;
        Ok(TranslationConfig::find_in(&cwd).unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_FILE)))
    }

    /// Reads and validates the configuration.
    pub fn load(&self) -> Result<(PathBuf, Vec<BundleConfig>), CliError> {
        let path = self.resolve_path()?;
        let bundles =
            TranslationConfig::load(&path).map_err(|err| CliError::from_config(err, &path))?;

        Ok((path, bundles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_path_wins() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("custom.toml")),
        };
        assert_eq!(args.resolve_path().unwrap(), PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_load_reports_missing_bundle_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = temp_dir.path().join("translation-config.yml");
        std::fs::write(&config, "bundles:\n  - path: missing\n    extension: json\n").unwrap();

        let args = ConfigArgs {
            config: Some(config),
        };
        let err = args.load().unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
        assert!(err.to_string().ends_with("does not exist"));
    }
}
