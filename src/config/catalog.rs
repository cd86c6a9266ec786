//! Name-keyed registry of theme documents.
//!
//! The catalog stores validated documents and builds a fresh [`JsonTheme`] per request, so
//! several boards can show the same theme without sharing image caches or pending draws.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::assets::handle::ImageLoader;
use crate::config::loader::parse_named_theme;
use crate::config::schema::ThemeConfig;
use crate::config::stock::{default_theme_json, stock_themes};
use crate::foundation::error::{ThemeError, ThemeResult};
use crate::session::json_theme::{JsonTheme, ThemeOptions};

/// A registered theme document.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeDefinition {
    /// Registry key: the document's `name`, or `JSONTheme` when it has none.
    pub name: String,
    /// Document text as registered.
    pub json: String,
    /// Config parsed from `json`.
    pub config: ThemeConfig,
}

#[derive(Clone, Debug, Default)]
pub struct ThemeCatalog {
    themes: BTreeMap<String, ThemeDefinition>,
}

impl ThemeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every stock theme.
    pub fn with_stock_themes() -> Self {
        let mut catalog = Self::new();
        for text in stock_themes() {
            if let Err(e) = catalog.insert_json(text) {
                tracing::warn!(error = %e, "stock theme failed to register");
            }
        }
        catalog
    }

    /// Register `text` under its document name, replacing any theme already registered there.
    ///
    /// `text` must be well-formed JSON.
    pub fn insert_json(&mut self, text: &str) -> ThemeResult<&ThemeDefinition> {
        let (config, name) = parse_named_theme(text)?;
        tracing::debug!(theme = %name, "theme registered");
        let def = ThemeDefinition {
            name: name.clone(),
            json: text.to_string(),
            config,
        };
        self.themes.insert(name.clone(), def);
        self.themes
            .get(&name)
            .ok_or_else(|| ThemeError::validation(format!("theme '{name}' vanished on insert")))
    }

    pub fn get(&self, name: &str) -> Option<&ThemeDefinition> {
        self.themes.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ThemeDefinition> {
        self.themes.remove(name)
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Registered names ordered by sort key, then name.
    pub fn names(&self) -> Vec<&str> {
        let mut defs: Vec<&ThemeDefinition> = self.themes.values().collect();
        defs.sort_by(|a, b| {
            a.config
                .sort_key()
                .total_cmp(&b.config.sort_key())
                .then_with(|| a.name.cmp(&b.name))
        });
        defs.into_iter().map(|d| d.name.as_str()).collect()
    }

    /// Build an engine for the theme registered as `name`.
    ///
    /// The engine reports `name` as its theme name. A registered document shorter than two
    /// characters stands for the default stock theme.
    pub fn instantiate(
        &self,
        name: &str,
        loader: Rc<dyn ImageLoader>,
        opts: ThemeOptions,
    ) -> ThemeResult<JsonTheme> {
        let def = self
            .get(name)
            .ok_or_else(|| ThemeError::validation(format!("unknown theme '{name}'")))?;
        let text = if def.json.len() < 2 {
            default_theme_json()
        } else {
            def.json.as_str()
        };
        Ok(JsonTheme::from_json(text, loader, opts)?.with_registered_name(&def.name))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/catalog.rs"]
mod tests;
