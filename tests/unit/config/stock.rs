use super::*;
use crate::config::loader::parse_named_theme;

#[test]
fn every_stock_theme_parses_cleanly() {
    for text in stock_themes() {
        let (_, report) = crate::config::loader::parse_theme(text).unwrap();
        assert!(report.is_clean(), "unclean stock theme: {report:?}");
    }
}

#[test]
fn stock_theme_names_are_unique_and_default_is_first() {
    let names: Vec<String> = stock_themes()
        .iter()
        .map(|t| parse_named_theme(t).unwrap().1)
        .collect();
    assert_eq!(names, vec!["hikaru", "BadukBroadcast", "kibitz", "Happy Stones"]);
    assert_eq!(default_theme_json(), stock_themes()[0]);
}

#[test]
fn duplicate_keys_keep_the_last_value() {
    let (c, _) = parse_named_theme(default_theme_json()).unwrap();
    assert_eq!(c.board_color, "#d2b473");
    assert_eq!(c.stone_bounding_box, vec![0.0, 0.0, 1.0, 1.0]);
}
