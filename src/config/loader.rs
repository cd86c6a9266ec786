//! Theme document parsing.
//!
//! Parsing is all-or-nothing: a document that is not well-formed JSON produces an error and no
//! config. A well-formed document always produces a complete config; fields that are unknown or
//! whose value does not match the declared type are skipped and reported.

use serde_json::Value;

use crate::config::schema::{FieldMerge, ThemeConfig};
use crate::foundation::error::{ThemeError, ThemeResult};

/// Name given to themes whose document does not carry one.
pub const FALLBACK_THEME_NAME: &str = "JSONTheme";

/// Which document fields the merge took, skipped for type, or did not recognize.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MergeReport {
    /// Fields copied into the config.
    pub accepted: Vec<String>,
    /// Recognized fields whose value had the wrong type; the default was kept.
    pub mismatched: Vec<String>,
    /// Fields the schema does not know.
    pub unknown: Vec<String>,
}

impl MergeReport {
    /// `true` when every document field was taken.
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.unknown.is_empty()
    }
}

/// Merge a parsed document over the defaults.
///
/// Documents that are not JSON objects contribute no fields.
pub fn merge_document(doc: &Value) -> (ThemeConfig, MergeReport) {
    let mut config = ThemeConfig::default();
    let mut report = MergeReport::default();

    let Some(obj) = doc.as_object() else {
        tracing::debug!("theme document is not an object; using defaults");
        return (config, report);
    };

    for (key, value) in obj {
        match config.merge_field(key, value) {
            FieldMerge::Accepted => report.accepted.push(key.clone()),
            FieldMerge::Mismatched => {
                tracing::debug!(field = %key, "ignoring theme field with mismatched type");
                report.mismatched.push(key.clone());
            }
            FieldMerge::Unknown => {
                tracing::debug!(field = %key, "ignoring unknown theme field");
                report.unknown.push(key.clone());
            }
        }
    }

    (config, report)
}

/// Parse theme document text into a config.
pub fn parse_theme(text: &str) -> ThemeResult<(ThemeConfig, MergeReport)> {
    let doc: Value = serde_json::from_str(text)?;
    Ok(merge_document(&doc))
}

/// Parse a document into the config plus the identifier it should be registered under.
///
/// The identifier is the document's `name` when it is a non-empty string, else
/// [`FALLBACK_THEME_NAME`].
pub fn parse_named_theme(text: &str) -> ThemeResult<(ThemeConfig, String)> {
    let doc: Value = serde_json::from_str(text)?;
    let name = match doc.get("name").and_then(Value::as_str) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => FALLBACK_THEME_NAME.to_string(),
    };
    let (config, _report) = merge_document(&doc);
    Ok((config, name))
}

/// Read and parse a theme document from disk.
pub fn read_theme_file(path: &std::path::Path) -> ThemeResult<(ThemeConfig, MergeReport)> {
    use anyhow::Context as _;

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read theme document '{}'", path.display()))?;
    parse_theme(&text).map_err(|e| match e {
        ThemeError::Parse(msg) => ThemeError::parse(format!("{}: {msg}", path.display())),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/config/loader.rs"]
mod tests;
