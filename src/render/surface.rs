//! Drawing surface abstraction.
//!
//! A [`Surface`] is the platform canvas the engine composites into: it owns a current affine
//! transform and offers image blits and path fill/stroke. Surfaces are shared with the engine
//! through [`SurfaceHandle`] so that deferred draws can reach them later.
//!
//! # Lifecycle
//!
//! The engine caches pre-scaled bitmaps per surface, keyed by the [`SurfaceCell`] identity that
//! every handle made from the cell shares. Those entries, and any draws parked for the surface,
//! are dropped when the owner calls [`crate::JsonTheme::release_surface`]; call it before
//! discarding a surface. Parked draws hold surfaces weakly, so an unreleased surface that goes
//! away only loses its draws, not its cache entries.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

use crate::foundation::core::{Affine, BezPath, Rect};

/// Platform drawing surface.
///
/// Transforms compose like a 2D canvas context: [`Surface::concat`] post-multiplies, so the most
/// recently concatenated transform is applied to geometry first.
pub trait Surface {
    /// Current transform.
    fn transform(&self) -> Affine;

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine);

    /// Draw `image` scaled into `dest` (in current local coordinates).
    fn draw_image(&mut self, image: &RgbaImage, dest: Rect);

    /// Fill `path` with a CSS color string.
    fn fill_path(&mut self, path: &BezPath, paint: &str);

    /// Stroke `path` with a CSS color string and a line width in local units.
    fn stroke_path(&mut self, path: &BezPath, paint: &str, width: f64);

    /// `transform = transform * t`.
    fn concat(&mut self, t: Affine) {
        let cur = self.transform();
        self.set_transform(cur * t);
    }
}

/// Process-unique surface identity, used to key per-surface caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A surface paired with its identity.
///
/// Every [`SurfaceHandle`] made from the same cell shares one [`SurfaceId`], so per-surface
/// caches hold a single entry no matter how often the caller wraps its canvas.
#[derive(Debug)]
pub struct SurfaceCell<S: ?Sized> {
    id: SurfaceId,
    surface: RefCell<S>,
}

impl<S> SurfaceCell<S> {
    pub fn new(surface: S) -> Self {
        Self {
            id: SurfaceId::next(),
            surface: RefCell::new(surface),
        }
    }
}

impl<S: ?Sized> SurfaceCell<S> {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn borrow(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, S> {
        self.surface.borrow_mut()
    }
}

/// Shared, identity-carrying reference to a surface.
#[derive(Clone)]
pub struct SurfaceHandle {
    inner: Rc<SurfaceCell<dyn Surface>>,
}

impl std::fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceHandle")
            .field("id", &self.id())
            .finish()
    }
}

impl SurfaceHandle {
    /// Wrap a surface the engine will be the only typed owner of.
    pub fn new<S: Surface + 'static>(surface: S) -> Self {
        Self::from_rc(Rc::new(SurfaceCell::new(surface)))
    }

    /// Wrap a surface the caller keeps typed access to.
    ///
    /// Handles made from the same cell are the same surface to the engine.
    pub fn from_rc<S: Surface + 'static>(cell: Rc<SurfaceCell<S>>) -> Self {
        let inner: Rc<SurfaceCell<dyn Surface>> = cell;
        Self { inner }
    }

    pub fn id(&self) -> SurfaceId {
        self.inner.id()
    }

    /// `true` when both handles refer to the same drawing target.
    pub fn same_target(&self, other: &SurfaceHandle) -> bool {
        self.id() == other.id()
    }

    pub fn borrow(&self) -> Ref<'_, dyn Surface> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Surface> {
        self.inner.borrow_mut()
    }

    /// Reference that does not keep the surface alive.
    pub fn downgrade(&self) -> WeakSurface {
        WeakSurface {
            id: self.id(),
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// Non-owning surface reference held by deferred draws.
#[derive(Clone)]
pub struct WeakSurface {
    id: SurfaceId,
    inner: Weak<SurfaceCell<dyn Surface>>,
}

impl std::fmt::Debug for WeakSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakSurface")
            .field("id", &self.id)
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl WeakSurface {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Strong handle, if the surface is still alive.
    pub fn upgrade(&self) -> Option<SurfaceHandle> {
        self.inner.upgrade().map(|inner| SurfaceHandle { inner })
    }
}

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Image blit.
    Image {
        /// Pixel size of the bitmap handed to the surface.
        width_px: u32,
        height_px: u32,
        dest: Rect,
        transform: Affine,
    },
    /// Path fill.
    Fill {
        paint: String,
        bounds: Rect,
        transform: Affine,
    },
    /// Path stroke.
    Stroke {
        paint: String,
        width: f64,
        bounds: Rect,
        transform: Affine,
    },
}

impl DrawOp {
    /// Transform in effect when the op was issued.
    pub fn transform(&self) -> Affine {
        match self {
            DrawOp::Image { transform, .. }
            | DrawOp::Fill { transform, .. }
            | DrawOp::Stroke { transform, .. } => *transform,
        }
    }
}

/// Surface that records every draw call as a display list.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    transform: Affine,
    ops: Vec<DrawOp>,
    transform_sets: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a non-identity transform, e.g. a device scale.
    pub fn with_transform(transform: Affine) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn image_draws(&self) -> usize {
        self.count(|op| matches!(op, DrawOp::Image { .. }))
    }

    pub fn fills(&self) -> usize {
        self.count(|op| matches!(op, DrawOp::Fill { .. }))
    }

    pub fn strokes(&self) -> usize {
        self.count(|op| matches!(op, DrawOp::Stroke { .. }))
    }

    /// Number of `set_transform` calls seen, including those made by `concat`.
    pub fn transform_sets(&self) -> usize {
        self.transform_sets
    }

    fn count(&self, f: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| f(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.transform_sets += 1;
    }

    fn draw_image(&mut self, image: &RgbaImage, dest: Rect) {
        self.ops.push(DrawOp::Image {
            width_px: image.width(),
            height_px: image.height(),
            dest,
            transform: self.transform,
        });
    }

    fn fill_path(&mut self, path: &BezPath, paint: &str) {
        use kurbo::Shape as _;

        self.ops.push(DrawOp::Fill {
            paint: paint.to_string(),
            bounds: path.bounding_box(),
            transform: self.transform,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, paint: &str, width: f64) {
        use kurbo::Shape as _;

        self.ops.push(DrawOp::Stroke {
            paint: paint.to_string(),
            width,
            bounds: path.bounding_box(),
            transform: self.transform,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
