//! Deterministic per-stone transform bundles.

/// Bundle construction from a theme config.
pub mod matrices;
