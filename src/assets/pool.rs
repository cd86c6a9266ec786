use std::rc::Rc;

use crate::assets::handle::{ImageHandle, ImageLoader};
use crate::config::schema::ThemeConfig;
use crate::foundation::core::{Role, StoneColor};
use crate::render::surface::SurfaceId;

/// Per-role ordered image handles for one loaded configuration.
#[derive(Debug, Default)]
pub struct ImageAssetPool {
    white_stones: Vec<Rc<ImageHandle>>,
    black_stones: Vec<Rc<ImageHandle>>,
    white_shadows: Vec<Rc<ImageHandle>>,
    black_shadows: Vec<Rc<ImageHandle>>,
}

impl ImageAssetPool {
    /// One handle per configured URL, in list order, each already loading through `loader`.
    pub fn build(config: &ThemeConfig, loader: &dyn ImageLoader) -> Self {
        let load = |urls: &[String]| -> Vec<Rc<ImageHandle>> {
            urls.iter()
                .map(|url| Rc::new(ImageHandle::load(url.as_str(), loader)))
                .collect()
        };

        let pool = Self {
            white_stones: load(config.stones(StoneColor::White)),
            black_stones: load(config.stones(StoneColor::Black)),
            white_shadows: load(config.effective_shadows(StoneColor::White).as_slice()),
            black_shadows: load(config.effective_shadows(StoneColor::Black).as_slice()),
        };
        tracing::debug!(
            white_stones = pool.white_stones.len(),
            black_stones = pool.black_stones.len(),
            white_shadows = pool.white_shadows.len(),
            black_shadows = pool.black_shadows.len(),
            "image pool rebuilt"
        );
        pool
    }

    /// Discard every handle and load the lists of `config`.
    pub fn rebuild(&mut self, config: &ThemeConfig, loader: &dyn ImageLoader) {
        *self = Self::build(config, loader);
    }

    /// Handles for `role`, in configured order.
    pub fn images(&self, role: Role) -> &[Rc<ImageHandle>] {
        match role {
            Role::WhiteStone => &self.white_stones,
            Role::BlackStone => &self.black_stones,
            Role::WhiteShadow => &self.white_shadows,
            Role::BlackShadow => &self.black_shadows,
        }
    }

    /// Every handle, role by role.
    pub fn handles(&self) -> impl Iterator<Item = &Rc<ImageHandle>> + '_ {
        Role::ALL.into_iter().flat_map(move |role| self.images(role))
    }

    /// Drop every pre-scaled bitmap owned by `surface`. Returns how many were dropped.
    pub fn release_surface(&self, surface: SurfaceId) -> usize {
        self.handles()
            .filter(|h| h.release_surface(surface))
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/pool.rs"]
mod tests;
