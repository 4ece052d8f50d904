use locale_drift::{
    Bundle, Bundler, DriftError, DriftReport, Manifest, OutputFormat, reconcile_all,
    reconcile_bundle,
};
use locale_drift_config::{BundleConfig, ConfigFormat, TranslationConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn json_config(dir: &Path) -> BundleConfig {
    BundleConfig {
        path: dir.to_path_buf(),
        extension: "json".to_string(),
        default_locale: "en_US".to_string(),
        separator: "=".to_string(),
    }
}

fn gather_one(config: BundleConfig) -> Bundle {
    Bundler::gather(&[config]).unwrap().remove(0)
}

#[test]
fn first_run_creates_snapshot_and_reports_missing() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(dir, "app_en_US.json", r#"{"a": "1", "b": "2"}"#);
    write(dir, "app_fr.json", r#"{"a": "1"}"#);

    let mut bundle = gather_one(json_config(dir));
    let report = reconcile_bundle(&mut bundle).unwrap();

    let snapshot = dir.join("app_en_US.json.snapshot");
    assert_eq!(
        fs::read_to_string(&snapshot).unwrap(),
        r#"{"a": "1", "b": "2"}"#
    );
    assert!(report.additions.is_empty());
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[&dir.join("app_fr.json")], vec!["b: 2"]);
}

#[test]
fn stale_snapshot_reports_additions() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(dir, "app_en_US.json", r#"{"a": "1", "b": "2"}"#);
    write(dir, "app_en_US.json.snapshot", r#"{"a": "1"}"#);
    write(dir, "app_fr.json", r#"{"a": "1"}"#);

    let mut bundle = gather_one(json_config(dir));
    let report = reconcile_bundle(&mut bundle).unwrap();

    assert_eq!(report.additions[&dir.join("app_en_US.json")], vec!["2"]);
    // `b` is not in the snapshot yet, so nothing reports it as missing.
    assert!(report.missing.is_empty());
    assert_eq!(
        fs::read_to_string(dir.join("app_en_US.json.snapshot")).unwrap(),
        r#"{"a": "1"}"#
    );
}

#[test]
fn stale_default_locale_reports_itself_missing() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(dir, "app_en_US.json", r#"{"a": "1"}"#);
    write(dir, "app_en_US.json.snapshot", r#"{"a": "1", "b": "2"}"#);
    write(dir, "app_fr.json", r#"{"a": "1", "b": "2"}"#);

    let mut bundle = gather_one(json_config(dir));
    let report = reconcile_bundle(&mut bundle).unwrap();

    assert!(report.additions.is_empty());
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[&dir.join("app_en_US.json")], vec!["b: 2"]);
}

#[test]
fn nested_json_keys_are_compared_flattened() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(
        dir,
        "app_en_US.json",
        r#"{"menu": {"open": "Open", "close": "Close"}}"#,
    );
    write(dir, "app_de.json", r#"{"menu": {"open": "Öffnen"}}"#);

    let mut bundle = gather_one(json_config(dir));
    let report = reconcile_bundle(&mut bundle).unwrap();

    assert_eq!(
        report.missing[&dir.join("app_de.json")],
        vec!["menu.close: Close"]
    );
}

#[test]
fn properties_bundle_drops_empty_values() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(
        dir,
        "messages_en_US.properties",
        "# greetings\ngreeting=Hello\nplaceholder=\nquoted = \"Bye\"\n",
    );
    write(dir, "messages_fr.properties", "greeting=Bonjour\n");

    let config = BundleConfig {
        extension: "properties".to_string(),
        ..json_config(dir)
    };
    let mut bundle = gather_one(config);
    let report = reconcile_bundle(&mut bundle).unwrap();

    assert!(report.additions.is_empty());
    assert_eq!(
        report.missing[&dir.join("messages_fr.properties")],
        vec!["quoted: Bye"]
    );
}

#[test]
fn properties_bundle_honors_custom_separator() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(dir, "labels_en_US.properties", "save: Save\ncancel: Cancel\n");
    write(dir, "labels_es.properties", "save: Guardar\n");

    let config = BundleConfig {
        extension: "properties".to_string(),
        separator: ":".to_string(),
        ..json_config(dir)
    };
    let mut bundle = gather_one(config);
    let report = reconcile_bundle(&mut bundle).unwrap();

    assert_eq!(
        report.missing[&dir.join("labels_es.properties")],
        vec!["cancel: Cancel"]
    );
}

#[test]
fn ambiguous_default_locale_names_both_candidates() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(dir, "app_en_US.json", "{}");
    write(dir, "web_en_US.json", "{}");

    let err = Bundler::gather(&[json_config(dir)]).unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, DriftError::AmbiguousDefaultLocaleFile { .. }));
    assert!(message.contains("app_en_US.json"));
    assert!(message.contains("web_en_US.json"));
    assert!(!dir.join("app_en_US.json.snapshot").exists());
}

#[test]
fn malformed_json_aborts_the_bundle() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(dir, "app_en_US.json", r#"{"a": "1"}"#);
    write(dir, "app_fr.json", r#"{"a": "#);

    let mut bundle = gather_one(json_config(dir));
    let err = reconcile_bundle(&mut bundle).unwrap_err();

    assert!(matches!(err, DriftError::Json { ref path, .. } if *path == dir.join("app_fr.json")));
}

#[test]
fn second_run_is_stable() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    write(dir, "app_en_US.json", r#"{"a": "1", "b": "2"}"#);
    write(dir, "app_fr.json", r#"{"a": "1"}"#);

    let mut first = Bundler::gather(&[json_config(dir)]).unwrap();
    let first = reconcile_all(&mut first).unwrap();
    let mut second = Bundler::gather(&[json_config(dir)]).unwrap();
    let second = reconcile_all(&mut second).unwrap();

    assert_eq!(first, second);
}

#[test]
fn reports_from_several_bundles_are_merged() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("app");
    let web = temp.path().join("web");
    fs::create_dir_all(&app).unwrap();
    fs::create_dir_all(&web).unwrap();
    write(&app, "app_en_US.json", r#"{"a": "1", "b": "2"}"#);
    write(&app, "app_fr.json", r#"{"a": "1"}"#);
    write(&web, "web_en_US.json", r#"{"x": "X"}"#);
    write(&web, "web_fr.json", "{}");

    let mut bundles = Bundler::gather(&[json_config(&app), json_config(&web)]).unwrap();
    let report = reconcile_all(&mut bundles).unwrap();

    let mut expected = DriftReport::default();
    expected
        .missing
        .insert(app.join("app_fr.json"), vec!["b: 2".to_string()]);
    expected
        .missing
        .insert(web.join("web_fr.json"), vec!["x: X".to_string()]);
    assert_eq!(report, expected);

    let manifest = Manifest::from_report(&report);
    assert!(manifest.added.is_empty());
    assert_eq!(manifest.missing.len(), 2);
    let rendered = manifest.render(OutputFormat::Yaml).unwrap();
    assert_eq!(
        Manifest::parse(&rendered, OutputFormat::Yaml).unwrap(),
        manifest
    );
}

#[test]
fn empty_default_locale_in_config_resolves_en_us() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("i18n");
    fs::create_dir(&dir).unwrap();
    write(&dir, "app_en_US.json", r#"{"a": "1", "b": "2"}"#);
    write(&dir, "app_fr.json", r#"{"a": "1"}"#);

    let config = TranslationConfig::parse(
        "bundles:\n  - path: i18n\n    extension: json\n    default_locale: \"\"\n",
        ConfigFormat::Yaml,
    )
    .unwrap();
    let configs = config
        .validate(Path::new("translation-config.yml"), temp.path())
        .unwrap();

    let bundle = gather_one(configs[0].clone());
    assert_eq!(
        bundle.default_locale_file().unwrap(),
        fs::canonicalize(&dir).unwrap().join("app_en_US.json")
    );
}
