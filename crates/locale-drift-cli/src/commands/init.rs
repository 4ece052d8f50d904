//! Init command implementation.

use crate::core::{CliError, ConfigExistsError};
use crate::utils::ui;
use anyhow::Context as _;
use clap::Parser;
use fs_err as fs;
use locale_drift_config::{
    BundleEntry, DEFAULT_CONFIG_FILE, SUPPORTED_EXTENSIONS, TranslationConfig,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Default locale of the project, e.g. en_US.
    #[arg(short, long)]
    pub locale: String,

    /// Directory to scan for locale files; may be repeated (defaults to the current directory).
    #[arg(short, long = "source-path", value_name = "PATH")]
    pub source_paths: Vec<PathBuf>,

    /// Where to write the configuration (defaults to translation-config.yml in the current directory).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

/// Run the init command.
pub fn run_init(args: InitArgs) -> Result<(), CliError> {
    ui::print_init_header();

    let cwd = std::env::current_dir()?;
    let config_path = args
        .config
        .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_FILE));

    if config_path.exists() && !args.force {
        return Err(ConfigExistsError { path: config_path }.into());
    }

    let roots = if args.source_paths.is_empty() {
        vec![cwd]
    } else {
        args.source_paths
    };

    let groups = find_default_locale_files(&roots, &args.locale)?;
    if groups.is_empty() {
        return Err(CliError::Other(format!(
            "no file named *_{}.{{{}}} found under {}",
            args.locale,
            SUPPORTED_EXTENSIONS.join(","),
            roots
                .iter()
                .map(|root| root.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let config_dir = fs::canonicalize(parent_dir(&config_path))?;
    let mut bundles = Vec::with_capacity(groups.len());

    for ((dir, extension), file_count) in groups {
        ui::print_found_bundle(&dir, &extension, file_count);
        if file_count > 1 {
            tracing::warn!(
                "{} holds {} .{} files for {}; generate expects exactly one",
                dir.display(),
                file_count,
                extension,
                args.locale
            );
        }
        bundles.push(BundleEntry {
            path: Some(relative_to(&dir, &config_dir)),
            extension: Some(extension),
            default_locale: Some(args.locale.clone()),
            separator: None,
        });
    }

    let bundle_count = bundles.len();
    TranslationConfig {
        bundles: Some(bundles),
    }
    .write_to_path(&config_path)?;

    ui::print_wrote_config(&config_path, bundle_count);

    Ok(())
}

/// Canonical directories holding `*_<locale>.<ext>` files, keyed with the
/// extension, counting the matching files of each.
fn find_default_locale_files(
    roots: &[PathBuf],
    locale: &str,
) -> anyhow::Result<BTreeMap<(PathBuf, String), usize>> {
    let mut groups = BTreeMap::new();

    for root in roots {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));

        for entry in walker {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(extension) = default_locale_extension(entry.path(), locale) else {
                continue;
            };

            let dir = parent_dir(entry.path());
            let dir = fs::canonicalize(dir)
                .with_context(|| format!("failed to resolve {}", dir.display()))?;

            *groups.entry((dir, extension.to_string())).or_insert(0) += 1;
        }
    }

    Ok(groups)
}

/// The supported extension of `path` when its stem ends in `_<locale>`.
fn default_locale_extension<'a>(path: &'a Path, locale: &str) -> Option<&'a str> {
    let extension = path.extension()?.to_str()?;
    let stem = path.file_stem()?.to_str()?;

    (SUPPORTED_EXTENSIONS.contains(&extension)
        && stem
            .strip_suffix(locale)
            .is_some_and(|rest| rest.ends_with('_')))
    .then_some(extension)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// `dir` relative to `base` when it lies inside it, otherwise `dir` itself.
fn relative_to(dir: &Path, base: &Path) -> PathBuf {
    match dir.strip_prefix(base) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_locale_extension() {
        assert_eq!(
            default_locale_extension(Path::new("i18n/app_en_US.json"), "en_US"),
            Some("json")
        );
        assert_eq!(
            default_locale_extension(Path::new("messages_en_US.properties"), "en_US"),
            Some("properties")
        );
        assert_eq!(default_locale_extension(Path::new("app_fr.json"), "en_US"), None);
        assert_eq!(default_locale_extension(Path::new("appen_US.json"), "en_US"), None);
        assert_eq!(
            default_locale_extension(Path::new("app_en_US.json.snapshot"), "en_US"),
            None
        );
        assert_eq!(default_locale_extension(Path::new("app_en_US.xml"), "en_US"), None);
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/project");
        assert_eq!(relative_to(Path::new("/project/i18n"), base), PathBuf::from("i18n"));
        assert_eq!(relative_to(Path::new("/project"), base), PathBuf::from("."));
        assert_eq!(relative_to(Path::new("/elsewhere/i18n"), base), PathBuf::from("/elsewhere/i18n"));
    }

    #[test]
    fn test_find_groups_by_directory_and_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let web = root.join("web/i18n");
        let api = root.join("api/resources");
        let hidden = root.join(".cache");
        for dir in [&web, &api, &hidden] {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(web.join("app_en_US.json"), "{}").unwrap();
        std::fs::write(web.join("app_fr.json"), "{}").unwrap();
        std::fs::write(web.join("menu_en_US.json"), "{}").unwrap();
        std::fs::write(api.join("messages_en_US.properties"), "").unwrap();
        std::fs::write(hidden.join("old_en_US.json"), "{}").unwrap();

        let groups = find_default_locale_files(&[root.to_path_buf()], "en_US").unwrap();

        let web = web.canonicalize().unwrap();
        let api = api.canonicalize().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&(web, "json".to_string())], 2);
        assert_eq!(groups[&(api, "properties".to_string())], 1);
    }
}
