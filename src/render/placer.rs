//! Stone and shadow compositing.
//!
//! A stone occupies the unit box centered on the origin. Placement maps that box onto the cell
//! with `translate(cx, cy) * scale(2 * radius) * bundle_matrix`, appended to whatever transform
//! the surface already carries, and always puts the surface transform back afterwards.

use kurbo::Shape as _;

use crate::assets::deferred::{DeferredDraws, DrawOutcome};
use crate::assets::pool::ImageAssetPool;
use crate::config::schema::ThemeConfig;
use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Role, Selector, StoneColor, unit_box,
};
use crate::render::surface::SurfaceHandle;
use crate::transform::matrices::TransformMatrixCache;

/// Selectors produced per pre-render call.
pub const PRE_RENDER_COUNT: usize = 50;

/// Radius below which stones never cast shadows.
pub const MIN_SHADOW_RADIUS: f64 = 10.0;

const STONE_BOX: [f64; 4] = [-1.0, -1.0, 2.0, 2.0];
const SHADOW_BOX: [f64; 4] = [-0.75, -0.75, 1.25, 1.25];
const MARKINGS_BOX: [f64; 4] = [0.0, 0.0, 1.0, 1.0];

/// Stable selectors for a batch of stones.
///
/// The first is `181 * seed`; each next one is `181 * r + 29 * r`.
pub fn pre_render_stone(seed: f64) -> Vec<Selector> {
    let mut r = seed * 181.0;
    (0..PRE_RENDER_COUNT)
        .map(|_| {
            let cur = r;
            r = r * 181.0 + 29.0 * r;
            Selector(cur)
        })
        .collect()
}

fn draw_box(configured: &[f64], fallback: [f64; 4]) -> Rect {
    match configured {
        [l, t, r, b] => unit_box([*l, *t, *r, *b]),
        _ => unit_box(fallback),
    }
}

/// Area a stone may draw into around its cell, in cells.
pub fn stone_bounding_box(config: &ThemeConfig) -> Rect {
    draw_box(&config.stone_bounding_box, STONE_BOX)
}

/// Area a shadow may draw into around its cell, in cells.
pub fn shadow_bounding_box(config: &ThemeConfig) -> Rect {
    draw_box(&config.shadow_bounding_box, SHADOW_BOX)
}

/// Area markings may draw into around their cell, in cells.
pub fn markings_bounding_box(config: &ThemeConfig) -> Rect {
    draw_box(&config.markings_bounding_box, MARKINGS_BOX)
}

/// Whether stones of `radius` get a shadow layer at all.
pub fn stone_casts_shadow(config: &ThemeConfig, radius: f64) -> bool {
    if radius < MIN_SHADOW_RADIUS {
        return false;
    }
    !config.shadows.is_empty()
        || !config.white_shadows.is_empty()
        || !config.black_shadows.is_empty()
}

/// How the stone body was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoneDraw {
    /// Stone artwork through the deferred path.
    Image(DrawOutcome),
    /// Filled (and possibly stroked) disc.
    Vector,
}

/// What one placement did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Shadow draw, when a shadow was attempted.
    pub shadow: Option<DrawOutcome>,
    pub stone: StoneDraw,
}

/// Composites stones for one loaded theme.
pub struct StonePlacer<'a> {
    pub config: &'a ThemeConfig,
    pub images: &'a ImageAssetPool,
    pub matrices: &'a TransformMatrixCache,
    pub deferred: &'a mut DeferredDraws,
}

impl StonePlacer<'_> {
    /// Draw a `color` stone centered at `(cx, cy)` with `radius`, and its shadow on
    /// `shadow_surface`.
    ///
    /// The shadow is skipped when `shadow_surface` is the same target as `surface`: a late
    /// shadow would otherwise land on top of the stone.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        color: StoneColor,
        surface: &SurfaceHandle,
        shadow_surface: Option<&SurfaceHandle>,
        selector: Selector,
        cx: f64,
        cy: f64,
        radius: f64,
    ) -> Placement {
        let shadow_surface = shadow_surface.filter(|s| !s.same_target(surface));
        let bundle = *self.matrices.bundle(selector);

        let shadow = shadow_surface.and_then(|target| {
            let role = color.shadow_role();
            self.draw_image(role, target, selector, cx, cy, radius, bundle.for_role(role))
        });

        let role = color.stone_role();
        let m = bundle.for_role(role);
        let stone = match self.draw_image(role, surface, selector, cx, cy, radius, m) {
            Some(outcome) => StoneDraw::Image(outcome),
            None => {
                self.draw_vector(color, surface, cx, cy, radius, m);
                StoneDraw::Vector
            }
        };

        Placement { shadow, stone }
    }

    /// `None` when `role` has no images.
    #[allow(clippy::too_many_arguments)]
    fn draw_image(
        &mut self,
        role: Role,
        surface: &SurfaceHandle,
        selector: Selector,
        cx: f64,
        cy: f64,
        radius: f64,
        m: Affine,
    ) -> Option<DrawOutcome> {
        let list = self.images.images(role);
        if list.is_empty() {
            return None;
        }
        let handle = &list[selector.index(list.len())];

        let saved = push_cell_transform(surface, cx, cy, radius, m);
        let outcome = self.deferred.draw(handle, surface, unit_rect());
        surface.borrow_mut().set_transform(saved);
        Some(outcome)
    }

    fn draw_vector(
        &self,
        color: StoneColor,
        surface: &SurfaceHandle,
        cx: f64,
        cy: f64,
        radius: f64,
        m: Affine,
    ) {
        let (fill, line, width) = match color {
            StoneColor::White => (
                self.config.white_stone_color(),
                self.config.white_stone_line_color(),
                self.config.white_stone_line_width(),
            ),
            StoneColor::Black => (
                self.config.black_stone_color(),
                self.config.black_stone_line_color(),
                self.config.black_stone_line_width(),
            ),
        };

        let saved = push_cell_transform(surface, cx, cy, radius, m);
        let disc = unit_disc();
        let mut s = surface.borrow_mut();
        s.fill_path(&disc, fill);
        if width > 0.0 {
            s.stroke_path(&disc, line, width);
        }
        s.set_transform(saved);
    }
}

/// Install the cell transform and return the one it replaced.
fn push_cell_transform(
    surface: &SurfaceHandle,
    cx: f64,
    cy: f64,
    radius: f64,
    m: Affine,
) -> Affine {
    let mut s = surface.borrow_mut();
    let saved = s.transform();
    s.set_transform(saved * Affine::translate((cx, cy)) * Affine::scale(radius * 2.0) * m);
    saved
}

fn unit_rect() -> Rect {
    Rect::new(-0.5, -0.5, 0.5, 0.5)
}

fn unit_disc() -> BezPath {
    kurbo::Circle::new(Point::ORIGIN, 0.5).to_path(1e-4)
}

#[cfg(test)]
#[path = "../../tests/unit/render/placer.rs"]
mod tests;
