use std::rc::Rc;
use std::time::Duration;

use crate::assets::deferred::DeferredDraws;
use crate::assets::handle::ImageLoader;
use crate::assets::pool::ImageAssetPool;
use crate::config::loader::{MergeReport, parse_theme};
use crate::config::palette::BackgroundStyle;
use crate::config::schema::ThemeConfig;
use crate::config::stock::default_theme_json;
use crate::foundation::core::{Rect, Selector, StoneColor};
use crate::foundation::error::ThemeResult;
use crate::render::placer::{self, Placement, StonePlacer};
use crate::render::surface::SurfaceHandle;
use crate::transform::matrices::TransformMatrixCache;

/// Engine-wide options fixed at construction.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThemeOptions {
    /// Device pixels per surface unit, used to size pre-scaled bitmaps.
    pub device_scale: f64,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self { device_scale: 1.0 }
    }
}

/// A loaded theme: config, artwork, transform bundles and pending draws.
///
/// Every successful load swaps all of them at once. Draws already parked for the previous
/// artwork keep their retry schedule.
pub struct JsonTheme {
    loader: Rc<dyn ImageLoader>,
    opts: ThemeOptions,
    registered_name: Option<String>,
    config: ThemeConfig,
    images: ImageAssetPool,
    matrices: TransformMatrixCache,
    deferred: DeferredDraws,
}

impl std::fmt::Debug for JsonTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonTheme")
            .field("theme_name", &self.theme_name())
            .field("opts", &self.opts)
            .field("pending_deferred", &self.deferred.pending())
            .finish_non_exhaustive()
    }
}

impl JsonTheme {
    /// Engine showing the default stock theme.
    pub fn new(loader: Rc<dyn ImageLoader>, opts: ThemeOptions) -> Self {
        let config = ThemeConfig::default();
        let mut theme = Self {
            images: ImageAssetPool::default(),
            matrices: TransformMatrixCache::build(&config),
            deferred: DeferredDraws::new(opts.device_scale),
            registered_name: None,
            loader,
            opts,
            config,
        };
        theme.load(default_theme_json());
        theme
    }

    /// Engine showing the theme in `text`.
    pub fn from_json(
        text: &str,
        loader: Rc<dyn ImageLoader>,
        opts: ThemeOptions,
    ) -> ThemeResult<Self> {
        let (config, report) = parse_theme(text)?;
        let mut theme = Self {
            images: ImageAssetPool::default(),
            matrices: TransformMatrixCache::default(),
            deferred: DeferredDraws::new(opts.device_scale),
            registered_name: None,
            loader,
            opts,
            config: ThemeConfig::default(),
        };
        theme.install(config, &report);
        Ok(theme)
    }

    /// Report `name` from [`JsonTheme::theme_name`] regardless of the document's own name.
    pub fn with_registered_name(mut self, name: impl Into<String>) -> Self {
        self.registered_name = Some(name.into());
        self
    }

    /// Replace the theme with the document in `text`.
    ///
    /// Returns `false` and keeps the current theme when `text` is not well-formed JSON.
    pub fn load(&mut self, text: &str) -> bool {
        match self.try_load(text) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "theme document rejected; keeping current theme");
                false
            }
        }
    }

    /// [`JsonTheme::load`] with the failure as a value.
    pub fn try_load(&mut self, text: &str) -> ThemeResult<MergeReport> {
        let (config, report) = parse_theme(text)?;
        self.install(config, &report);
        Ok(report)
    }

    fn install(&mut self, config: ThemeConfig, report: &MergeReport) {
        self.images.rebuild(&config, self.loader.as_ref());
        self.matrices = TransformMatrixCache::build(&config);
        self.config = config;
        tracing::info!(
            theme = self.config.theme_name(),
            fields = report.accepted.len(),
            ignored = report.mismatched.len() + report.unknown.len(),
            "theme loaded"
        );
    }

    /// The loaded config.
    pub fn style(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn options(&self) -> &ThemeOptions {
        &self.opts
    }

    pub fn theme_name(&self) -> &str {
        self.registered_name
            .as_deref()
            .unwrap_or_else(|| self.config.theme_name())
    }

    pub fn sort_key(&self) -> f64 {
        self.config.sort_key()
    }

    /// Selectors for a batch of white stones.
    pub fn pre_render_white(&self, seed: f64) -> Vec<Selector> {
        placer::pre_render_stone(seed)
    }

    /// Selectors for a batch of black stones.
    pub fn pre_render_black(&self, seed: f64) -> Vec<Selector> {
        placer::pre_render_stone(seed)
    }

    /// Draw one stone and its shadow. See [`StonePlacer::place`].
    #[allow(clippy::too_many_arguments)]
    pub fn place_stone(
        &mut self,
        color: StoneColor,
        surface: &SurfaceHandle,
        shadow_surface: Option<&SurfaceHandle>,
        selector: Selector,
        cx: f64,
        cy: f64,
        radius: f64,
    ) -> Placement {
        StonePlacer {
            config: &self.config,
            images: &self.images,
            matrices: &self.matrices,
            deferred: &mut self.deferred,
        }
        .place(color, surface, shadow_surface, selector, cx, cy, radius)
    }

    pub fn place_white_stone(
        &mut self,
        surface: &SurfaceHandle,
        shadow_surface: Option<&SurfaceHandle>,
        selector: Selector,
        cx: f64,
        cy: f64,
        radius: f64,
    ) -> Placement {
        self.place_stone(StoneColor::White, surface, shadow_surface, selector, cx, cy, radius)
    }

    pub fn place_black_stone(
        &mut self,
        surface: &SurfaceHandle,
        shadow_surface: Option<&SurfaceHandle>,
        selector: Selector,
        cx: f64,
        cy: f64,
        radius: f64,
    ) -> Placement {
        self.place_stone(StoneColor::Black, surface, shadow_surface, selector, cx, cy, radius)
    }

    /// Draw area needed around a cell for stones, `[left, top, right, bottom]` in cells.
    pub fn stone_bounding_box(&self) -> Rect {
        placer::stone_bounding_box(&self.config)
    }

    pub fn shadow_bounding_box(&self) -> Rect {
        placer::shadow_bounding_box(&self.config)
    }

    pub fn markings_bounding_box(&self) -> Rect {
        placer::markings_bounding_box(&self.config)
    }

    pub fn stone_casts_shadow(&self, radius: f64) -> bool {
        placer::stone_casts_shadow(&self.config, radius)
    }

    pub fn background_style(&self) -> BackgroundStyle {
        self.config.background_style()
    }

    /// Run the retries that fall due within `elapsed`. Returns how many completed a draw.
    pub fn advance_deferred(&mut self, elapsed: Duration) -> usize {
        self.deferred.advance(elapsed)
    }

    /// Number of parked draws.
    pub fn pending_deferred(&self) -> usize {
        self.deferred.pending()
    }

    /// Forget `surface`: drop its pre-scaled bitmaps and any draws parked for it.
    ///
    /// Returns the number of bitmaps dropped.
    pub fn release_surface(&mut self, surface: &SurfaceHandle) -> usize {
        let cancelled = self.deferred.cancel_surface(surface.id());
        let released = self.images.release_surface(surface.id());
        tracing::debug!(
            surface = surface.id().as_u64(),
            released,
            cancelled,
            "surface released"
        );
        released
    }

    pub fn matrices(&self) -> &TransformMatrixCache {
        &self.matrices
    }

    pub fn images(&self) -> &ImageAssetPool {
        &self.images
    }
}

macro_rules! forward_palette {
    ($($(#[$doc:meta])* $name:ident -> $ty:ty;)*) => {
        impl JsonTheme {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> $ty {
                    self.config.$name()
                }
            )*
        }
    };
}

forward_palette! {
    white_stone_color -> &str;
    black_stone_color -> &str;
    white_stone_line_color -> &str;
    black_stone_line_color -> &str;
    white_stone_line_width -> f64;
    black_stone_line_width -> f64;
    /// Label color over white stones.
    white_text_color -> &str;
    /// Label color over black stones.
    black_text_color -> &str;
    board_font -> &str;
    label_font -> &str;
    coordinate_font -> &str;
    line_color -> &str;
    faded_line_color -> &str;
    star_color -> &str;
    faded_star_color -> &str;
    blank_text_color -> &str;
    label_text_color -> &str;
}

#[cfg(test)]
#[path = "../../tests/unit/session/json_theme.rs"]
mod tests;
