//! Image loader backed by the local filesystem.
//!
//! Raster formats are decoded with `image`; SVG documents are parsed with `usvg` and rasterized
//! with `resvg`. Pixels handed to the pool are premultiplied RGBA8.

use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::assets::handle::{ImageLoader, LoadCompleter};
use crate::foundation::error::{ThemeError, ThemeResult};

/// Options for [`FsImageLoader`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FsImageLoaderOpts {
    /// Decode each image on its own background thread instead of inside `begin_load`.
    pub background: bool,
    /// Minimum raster width for SVG artwork, so small viewBoxes stay sharp when scaled up.
    pub svg_min_px: u32,
}

impl Default for FsImageLoaderOpts {
    fn default() -> Self {
        Self {
            background: true,
            svg_min_px: 512,
        }
    }
}

/// Loads theme artwork from files under a root directory.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
    opts: FsImageLoaderOpts,
}

impl FsImageLoader {
    pub fn new(root: impl Into<PathBuf>, opts: FsImageLoaderOpts) -> Self {
        Self {
            root: root.into(),
            opts,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn opts(&self) -> &FsImageLoaderOpts {
        &self.opts
    }

    /// Map a theme URL to a file under the root.
    pub fn resolve(&self, url: &str) -> ThemeResult<PathBuf> {
        Ok(self.root.join(normalize_asset_path(url)?))
    }
}

impl ImageLoader for FsImageLoader {
    fn begin_load(&self, url: &str, completer: LoadCompleter) {
        let path = match self.resolve(url) {
            Ok(p) => p,
            Err(e) => {
                completer.fail(e.to_string());
                return;
            }
        };

        let svg_min_px = self.opts.svg_min_px;
        let job = move || match load_image_file(&path, svg_min_px) {
            Ok(img) => {
                completer.complete(img);
            }
            Err(e) => {
                completer.fail(e.to_string());
            }
        };

        if self.opts.background {
            std::thread::spawn(job);
        } else {
            job();
        }
    }
}

/// Normalize a theme-relative asset URL.
///
/// The result uses `/` separators and has `.` segments removed. Remote URLs, absolute paths and
/// parent traversals (`..`) are rejected.
pub fn normalize_asset_path(source: &str) -> ThemeResult<String> {
    let lower = source.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Err(ThemeError::validation(format!(
            "remote asset '{source}' cannot be loaded from the filesystem"
        )));
    }

    let s = source.replace('\\', "/");
    if s.is_empty() {
        return Err(ThemeError::validation("asset path must be non-empty"));
    }
    if s.starts_with('/') || s.as_bytes().get(1) == Some(&b':') {
        return Err(ThemeError::validation("asset paths must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => continue,
            ".." => return Err(ThemeError::validation("asset paths must not contain '..'")),
            _ => out.push(part),
        }
    }

    if out.is_empty() {
        return Err(ThemeError::validation("asset path must contain a file name"));
    }
    Ok(out.join("/"))
}

/// Read and decode one image file.
pub fn load_image_file(path: &Path, svg_min_px: u32) -> ThemeResult<RgbaImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    if looks_like_svg(path, &bytes) {
        rasterize_svg(&bytes, svg_min_px)
    } else {
        decode_image(&bytes)
    }
}

/// Decode raster bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> ThemeResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let mut rgba = dyn_img.to_rgba8();
    premultiply_in_place(&mut rgba);
    Ok(rgba)
}

/// Rasterize an SVG document into premultiplied RGBA8, at least `min_width` pixels wide.
pub fn rasterize_svg(bytes: &[u8], min_width: u32) -> ThemeResult<RgbaImage> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default()).context("parse svg tree")?;

    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(ThemeError::asset("svg has invalid width/height"));
    }

    let scale = (min_width as f32 / w).max(1.0);
    let px_w = (w * scale).ceil() as u32;
    let px_h = (h * scale).ceil() as u32;

    const MAX_DIM: u32 = 8_192;
    if px_w > MAX_DIM || px_h > MAX_DIM {
        return Err(ThemeError::asset(format!(
            "svg raster size too large: {px_w}x{px_h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(px_w, px_h)
        .ok_or_else(|| ThemeError::asset("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(px_w as f32 / w, px_h as f32 / h);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    RgbaImage::from_raw(px_w, px_h, pixmap.data().to_vec())
        .ok_or_else(|| ThemeError::asset("svg pixmap has unexpected length"))
}

fn looks_like_svg(path: &Path, bytes: &[u8]) -> bool {
    let by_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    by_ext || bytes.trim_ascii_start().starts_with(b"<")
}

fn premultiply_in_place(img: &mut RgbaImage) {
    fn mul(c: u8, a: u8) -> u8 {
        ((u16::from(c) * u16::from(a) + 127) / 255) as u8
    }

    for px in img.pixels_mut() {
        let [r, g, b, a] = px.0;
        px.0 = [mul(r, a), mul(g, a), mul(b, a), a];
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fs_loader.rs"]
mod tests;
