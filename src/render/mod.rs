//! Surfaces and stone placement.

/// Stone and shadow compositing.
pub mod placer;
/// Drawing surface trait, shared handles and the recording surface.
pub mod surface;
