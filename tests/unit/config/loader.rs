use serde_json::json;

use super::*;
use crate::config::schema::Scale;

#[test]
fn absent_fields_keep_defaults() {
    let (c, report) = parse_theme(r#"{"name": "plain"}"#).unwrap();
    assert_eq!(c.name, "plain");
    assert_eq!(c.random_seed, 2083.0);
    assert_eq!(c.sizes, vec![Scale::Uniform(1.0)]);
    assert!(report.is_clean());
    assert_eq!(report.accepted, vec!["name".to_string()]);
}

#[test]
fn mismatched_and_unknown_fields_are_reported_not_fatal() {
    let text = r##"{
        "randomSeed": "seven",
        "whiteStones": "w.png",
        "blackStones": ["b.png"],
        "sparkle": true
    }"##;
    let (c, report) = parse_theme(text).unwrap();
    assert_eq!(c.random_seed, 2083.0);
    assert!(c.white_stones.is_empty());
    assert_eq!(c.black_stones, vec!["b.png".to_string()]);

    let mut mismatched = report.mismatched.clone();
    mismatched.sort();
    assert_eq!(mismatched, vec!["randomSeed", "whiteStones"]);
    assert_eq!(report.unknown, vec!["sparkle"]);
}

#[test]
fn malformed_documents_are_parse_errors() {
    let err = parse_theme(r#"{"name": "#).unwrap_err();
    assert!(matches!(err, ThemeError::Parse(_)));
}

#[test]
fn non_object_documents_yield_defaults() {
    let (c, report) = merge_document(&json!([1, 2, 3]));
    assert_eq!(c, ThemeConfig::default());
    assert_eq!(report, MergeReport::default());
}

#[test]
fn named_theme_falls_back_when_name_missing_or_empty() {
    let (_, name) = parse_named_theme(r#"{"priority": 9}"#).unwrap();
    assert_eq!(name, FALLBACK_THEME_NAME);

    let (_, name) = parse_named_theme(r#"{"name": ""}"#).unwrap();
    assert_eq!(name, FALLBACK_THEME_NAME);

    let (c, name) = parse_named_theme(r#"{"name": "slate", "priority": 9}"#).unwrap();
    assert_eq!(name, "slate");
    assert_eq!(c.priority, 9.0);
}

#[test]
fn read_theme_file_prefixes_parse_errors_with_path() {
    let dir = std::env::temp_dir().join(format!("goban_theme_loader_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.json");
    std::fs::write(&path, "{").unwrap();

    let err = read_theme_file(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"));

    assert!(read_theme_file(&dir.join("missing.json")).is_err());
    std::fs::remove_dir_all(&dir).ok();
}
