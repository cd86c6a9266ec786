//! Theme documents: schema, parsing, palette accessors, stock themes and the theme catalog.

/// Name-keyed registry of theme documents.
pub mod catalog;
/// Document parsing and merge reporting.
pub mod loader;
/// Color and font fallback chains.
pub mod palette;
/// Field table and the typed config value.
pub mod schema;
/// Built-in theme documents.
pub mod stock;
