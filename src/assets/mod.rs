//! Theme artwork: load handles, the per-role pool, deferred drawing and the filesystem loader.

/// Bounded-retry drawing of images that are still loading.
pub mod deferred;
/// Filesystem-backed image loader.
pub mod fs_loader;
/// Image handles, load completion and the loader trait.
pub mod handle;
/// Per-role image handle lists.
pub mod pool;
