//! Engine value tying config, assets, transforms and placement together.

/// The JSON theme engine.
pub mod json_theme;
