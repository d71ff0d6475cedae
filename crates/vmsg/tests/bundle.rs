//! Integration tests for resource bundles.

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;

use icu_locale_core::locale;
use tempfile::tempdir;
use vmsg::interpreter::fallback_chain;
use vmsg::{BundleWarning, LoadError, MessageBundle, ResourceBundle};

// =========================================================================
// Loading from String
// =========================================================================

#[test]
fn load_str_returns_entry_count() {
    let mut bundle = ResourceBundle::new();
    let count = bundle.load_str(None, "a = 1\nb = 2\n").unwrap();
    assert_eq!(count, 2);
    assert_eq!(bundle.get("", "a"), Some("1"));
}

#[test]
fn loading_a_locale_again_replaces_it() {
    let mut bundle = ResourceBundle::new();
    bundle.load_str(Some(&locale!("de")), "a = eins\nb = zwei").unwrap();
    bundle.load_str(Some(&locale!("de")), "a = EINS").unwrap();

    assert_eq!(bundle.get("de", "a"), Some("EINS"));
    assert_eq!(bundle.get("de", "b"), None);
}

#[test]
fn load_str_reports_parse_errors() {
    let mut bundle = ResourceBundle::new();
    let err = bundle.load_str(None, "a = \\uZZZZ").unwrap_err();
    assert!(matches!(err, LoadError::Parse { line: 1, .. }));
}

#[test]
fn insert_single_message() {
    let mut bundle = ResourceBundle::new();
    bundle.insert(Some(&locale!("fr")), "a", "un");
    assert_eq!(bundle.lookup("a", &locale!("fr-CA")).as_deref(), Some("un"));
}

// =========================================================================
// Locale Fallback
// =========================================================================

#[test]
fn fallback_chain_is_most_specific_first() {
    assert_eq!(fallback_chain(&locale!("de-CH")), vec!["de-CH", "de", ""]);
    assert_eq!(fallback_chain(&locale!("de")), vec!["de", ""]);
    assert_eq!(fallback_chain(&locale!("und")), vec![""]);
}

#[test]
fn lookup_falls_back_to_language_then_root() {
    let mut bundle = ResourceBundle::new();
    bundle.load_str(None, "a = root a\nb = root b\nc = root c").unwrap();
    bundle.load_str(Some(&locale!("de")), "a = de a\nb = de b").unwrap();
    bundle.load_str(Some(&locale!("de-CH")), "a = de-CH a").unwrap();

    let swiss = locale!("de-CH");
    assert_eq!(bundle.lookup("a", &swiss).as_deref(), Some("de-CH a"));
    assert_eq!(bundle.lookup("b", &swiss).as_deref(), Some("de b"));
    assert_eq!(bundle.lookup("c", &swiss).as_deref(), Some("root c"));
    assert_eq!(bundle.lookup("a", &locale!("fr")).as_deref(), Some("root a"));
    assert_eq!(bundle.lookup("missing", &swiss), None);
}

#[test]
fn flat_map_ignores_locale() {
    let map = HashMap::from([("a".to_string(), "x".to_string())]);
    assert_eq!(map.lookup("a", &locale!("ja")).as_deref(), Some("x"));
    assert_eq!(map.lookup("b", &locale!("ja")), None);
}

// =========================================================================
// Loading from Files
// =========================================================================

#[test]
fn load_dir_picks_up_locale_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ValidationMessages.properties"), "a = root").unwrap();
    fs::write(dir.path().join("ValidationMessages_de.properties"), "a = de").unwrap();
    fs::write(dir.path().join("ValidationMessages_de_CH.properties"), "a = ch").unwrap();
    fs::write(dir.path().join("Other.properties"), "a = other").unwrap();
    fs::write(dir.path().join("ValidationMessages.txt"), "a = text").unwrap();

    let bundle = ResourceBundle::load_dir(dir.path(), "ValidationMessages").unwrap();

    assert_eq!(bundle.tags(), vec!["", "de", "de-CH"]);
    assert_eq!(bundle.lookup("a", &locale!("de-CH")).as_deref(), Some("ch"));
    assert_eq!(bundle.lookup("a", &locale!("en")).as_deref(), Some("root"));
}

#[test]
fn load_dir_rejects_invalid_locale_suffix() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ValidationMessages_!!.properties"), "a = 1").unwrap();

    let err = ResourceBundle::load_dir(dir.path(), "ValidationMessages").unwrap_err();
    assert!(matches!(err, LoadError::InvalidLocale { suffix, .. } if suffix == "!!"));
}

#[test]
fn load_dir_missing_directory() {
    let dir = tempdir().unwrap();
    let err = ResourceBundle::load_dir(dir.path().join("nope"), "ValidationMessages").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn load_file_parse_error_has_path_and_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ValidationMessages.properties");
    fs::write(&path, "ok = 1\nbad = \\uZZZZ\n").unwrap();

    let mut bundle = ResourceBundle::new();
    let err = bundle.load_file(None, &path).unwrap_err();
    match err {
        LoadError::Parse {
            path: err_path,
            line,
            ..
        } => {
            assert_eq!(err_path, path);
            assert_eq!(line, 2);
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn reload_reads_the_file_again() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("messages_de.properties");
    fs::write(&path, "a = alt").unwrap();

    let mut bundle = ResourceBundle::new();
    bundle.load_file(Some(&locale!("de")), &path).unwrap();
    assert_eq!(bundle.get("de", "a"), Some("alt"));

    fs::write(&path, "a = neu\nb = zwei").unwrap();
    let count = bundle.reload(Some(&locale!("de"))).unwrap();
    assert_eq!(count, 2);
    assert_eq!(bundle.get("de", "a"), Some("neu"));
}

#[test]
fn reload_of_string_table_fails() {
    let mut bundle = ResourceBundle::new();
    bundle.load_str(None, "a = 1").unwrap();

    let err = bundle.reload(None).unwrap_err();
    assert!(matches!(err, LoadError::NoPathForReload { locale } if locale == "root"));
}

// =========================================================================
// Validation
// =========================================================================

#[test]
fn validate_reports_missing_and_unknown_keys() {
    let mut bundle = ResourceBundle::new();
    bundle.load_str(None, "a = 1\nb = 2").unwrap();
    bundle.load_str(Some(&locale!("de")), "a = eins\nc = drei").unwrap();

    assert_eq!(
        bundle.validate("de"),
        vec![
            BundleWarning::MissingKey {
                key: "b".to_string(),
                locale: "de".to_string(),
            },
            BundleWarning::UnknownKey {
                key: "c".to_string(),
                locale: "de".to_string(),
            },
        ]
    );
}

#[test]
fn validate_unknown_tag_is_empty() {
    let bundle = ResourceBundle::builtin();
    assert!(bundle.validate("xx").is_empty());
}

// =========================================================================
// Built-in Catalog
// =========================================================================

#[test]
fn builtin_catalog_has_english_and_german() {
    let bundle = ResourceBundle::builtin();
    assert_eq!(bundle.tags(), vec!["", "de"]);
    assert_eq!(
        bundle
            .lookup("constraints.NotNull.message", &locale!("en"))
            .as_deref(),
        Some("must not be null")
    );
    assert_eq!(
        bundle
            .lookup("constraints.NotNull.message", &locale!("de-AT"))
            .as_deref(),
        Some("darf nicht null sein")
    );
}

#[test]
fn builtin_catalog_is_parsed_once() {
    assert!(Arc::ptr_eq(&ResourceBundle::builtin(), &ResourceBundle::builtin()));
}

#[test]
fn builtin_translations_cover_every_key() {
    let bundle = ResourceBundle::builtin();
    assert!(bundle.validate("de").is_empty());
}
