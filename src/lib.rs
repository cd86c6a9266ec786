//! goban-theme renders go stones, their shadows and the board background from declarative JSON
//! theme documents.
//!
//! The public API is engine-oriented:
//!
//! - Parse a theme document into a [`ThemeConfig`] (or register it in a [`ThemeCatalog`])
//! - Create a [`JsonTheme`] with an [`ImageLoader`] and [`ThemeOptions`]
//! - Pre-render [`Selector`]s once per stone and place stones onto [`Surface`]s, advancing the
//!   engine's clock so draws parked on still-loading artwork complete
#![forbid(unsafe_code)]

mod foundation;

/// Theme artwork loading and deferred drawing.
pub mod assets;
/// Theme documents, schema and catalog.
pub mod config;
/// Surfaces and stone placement.
pub mod render;
/// The theme engine.
pub mod session;
/// Per-stone transform bundles.
pub mod transform;

pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Role, Selector, StoneColor, Vec2, unit_box,
};
pub use crate::foundation::error::{ThemeError, ThemeResult};

pub use crate::assets::deferred::{DrawOutcome, MAX_RETRIES, RETRY_INTERVAL};
pub use crate::assets::fs_loader::{FsImageLoader, FsImageLoaderOpts};
pub use crate::assets::handle::{
    ImageHandle, ImageLoader, ImageState, LoadCompleter, MAX_SCALED_PIXELS,
};
pub use crate::assets::pool::ImageAssetPool;
pub use crate::config::catalog::{ThemeCatalog, ThemeDefinition};
pub use crate::config::loader::{MergeReport, merge_document, parse_named_theme, parse_theme};
pub use crate::config::palette::BackgroundStyle;
pub use crate::config::schema::{FieldKind, FieldSpec, SCHEMA, Scale, ThemeConfig};
pub use crate::config::stock::{default_theme_json, stock_themes};
pub use crate::render::placer::{Placement, StoneDraw, pre_render_stone};
pub use crate::render::surface::{
    DrawOp, RecordingSurface, Surface, SurfaceCell, SurfaceHandle, SurfaceId, WeakSurface,
};
pub use crate::session::json_theme::{JsonTheme, ThemeOptions};
pub use crate::transform::matrices::{BUNDLE_COUNT, TransformBundle, TransformMatrixCache};
