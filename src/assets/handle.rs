use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use image::RgbaImage;

use crate::render::surface::SurfaceId;

/// Load state of an [`ImageHandle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageState {
    /// The loader has not resolved the handle yet.
    Pending,
    /// Decoded pixels are available.
    Ready,
    /// The load failed; draws against the handle are skipped.
    Failed,
}

#[derive(Debug)]
enum LoadOutcome {
    Ready(Arc<RgbaImage>),
    Failed(String),
}

type LoadSlot = Arc<OnceLock<LoadOutcome>>;

/// Write side of an image load.
///
/// Handed to [`ImageLoader::begin_load`]; it may be moved to another thread. The first call to
/// [`LoadCompleter::complete`] or [`LoadCompleter::fail`] wins, later calls are ignored.
#[derive(Clone, Debug)]
pub struct LoadCompleter {
    slot: LoadSlot,
    url: String,
}

impl LoadCompleter {
    /// URL the handle was created for.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve the handle with decoded pixels (premultiplied RGBA8).
    ///
    /// Returns `false` when the handle was already resolved. A zero-sized image resolves the
    /// handle as failed.
    pub fn complete(&self, image: RgbaImage) -> bool {
        let outcome = if image.width() == 0 || image.height() == 0 {
            LoadOutcome::Failed(format!("'{}' decoded to an empty image", self.url))
        } else {
            LoadOutcome::Ready(Arc::new(image))
        };
        self.slot.set(outcome).is_ok()
    }

    /// Resolve the handle as failed.
    pub fn fail(&self, reason: impl Into<String>) -> bool {
        self.slot.set(LoadOutcome::Failed(reason.into())).is_ok()
    }
}

/// Source of image pixels for the asset pool.
///
/// Implementations start loading `url` and eventually resolve `completer`, on any thread and at
/// any time, including before `begin_load` returns.
pub trait ImageLoader {
    fn begin_load(&self, url: &str, completer: LoadCompleter);
}

/// Largest pre-scaled bitmap, in pixels. Bigger requests draw the natural-size image instead.
pub const MAX_SCALED_PIXELS: u64 = 4096 * 4096;

#[derive(Clone, Debug)]
struct CachedBitmap {
    width: f64,
    bitmap: Arc<RgbaImage>,
}

/// One configured image URL and its asynchronously loaded pixels.
///
/// The handle also keeps at most one pre-scaled copy of the image per surface.
#[derive(Debug)]
pub struct ImageHandle {
    url: String,
    slot: LoadSlot,
    scaled: RefCell<HashMap<SurfaceId, CachedBitmap>>,
    failure_logged: Cell<bool>,
}

impl ImageHandle {
    /// Create a pending handle and the completer that resolves it.
    pub fn pending(url: impl Into<String>) -> (Self, LoadCompleter) {
        let url = url.into();
        let slot: LoadSlot = Arc::new(OnceLock::new());
        let completer = LoadCompleter {
            slot: slot.clone(),
            url: url.clone(),
        };
        let handle = Self {
            url,
            slot,
            scaled: RefCell::new(HashMap::new()),
            failure_logged: Cell::new(false),
        };
        (handle, completer)
    }

    /// Create a handle and immediately start loading it through `loader`.
    pub fn load(url: impl Into<String>, loader: &dyn ImageLoader) -> Self {
        let (handle, completer) = Self::pending(url);
        loader.begin_load(&handle.url, completer);
        handle
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ImageState {
        match self.slot.get() {
            None => ImageState::Pending,
            Some(LoadOutcome::Ready(_)) => ImageState::Ready,
            Some(LoadOutcome::Failed(_)) => ImageState::Failed,
        }
    }

    /// Decoded pixels at natural size, once ready.
    pub fn image(&self) -> Option<Arc<RgbaImage>> {
        match self.slot.get() {
            Some(LoadOutcome::Ready(img)) => Some(img.clone()),
            _ => None,
        }
    }

    /// Failure reason, once failed.
    pub fn failure(&self) -> Option<&str> {
        match self.slot.get() {
            Some(LoadOutcome::Failed(reason)) => Some(reason),
            _ => None,
        }
    }

    /// Natural pixel size, once ready.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.image().map(|img| img.dimensions())
    }

    /// Pre-scaled copy for `surface` at `device_width` pixels wide.
    ///
    /// Reuses the surface's entry when it was built for the same width and rebuilds it
    /// otherwise. The height follows the natural aspect ratio. Requests above
    /// [`MAX_SCALED_PIXELS`] get the natural-size image. `None` while not ready.
    pub fn scaled_for(&self, surface: SurfaceId, device_width: f64) -> Option<Arc<RgbaImage>> {
        let source = self.image()?;

        let mut scaled = self.scaled.borrow_mut();
        if let Some(entry) = scaled.get(&surface)
            && entry.width == device_width
        {
            return Some(entry.bitmap.clone());
        }

        let (nw, nh) = source.dimensions();
        let ratio = f64::from(nh) / f64::from(nw);
        let w = device_width.ceil().clamp(1.0, f64::from(u16::MAX)) as u32;
        let h = (device_width * ratio).ceil().clamp(1.0, f64::from(u16::MAX)) as u32;
        let bitmap = if (w, h) == (nw, nh) {
            source
        } else if u64::from(w) * u64::from(h) > MAX_SCALED_PIXELS {
            tracing::debug!(url = %self.url, w, h, "scaled size too large; using natural size");
            source
        } else {
            Arc::new(image::imageops::resize(
                &*source,
                w,
                h,
                image::imageops::FilterType::Triangle,
            ))
        };

        tracing::trace!(
            url = %self.url,
            surface = surface.as_u64(),
            w,
            h,
            "rebuilt scaled bitmap"
        );
        scaled.insert(
            surface,
            CachedBitmap {
                width: device_width,
                bitmap: bitmap.clone(),
            },
        );
        Some(bitmap)
    }

    /// Drop the pre-scaled copy owned by `surface`.
    pub fn release_surface(&self, surface: SurfaceId) -> bool {
        self.scaled.borrow_mut().remove(&surface).is_some()
    }

    /// Number of surfaces holding a pre-scaled copy.
    pub fn cached_surfaces(&self) -> usize {
        self.scaled.borrow().len()
    }

    /// `true` exactly once for a failed handle, so the failure is reported a single time.
    pub(crate) fn take_failure_report(&self) -> bool {
        self.state() == ImageState::Failed && !self.failure_logged.replace(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/handle.rs"]
mod tests;
