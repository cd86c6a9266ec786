//! Per-stone transform bundles.
//!
//! A theme describes variation as layered lists: a global layer (`offsets`, `sizes`,
//! `rotations`), a class layer (`stone*` or `shadow*`) and a color layer (`whiteStone*`,
//! `blackShadow*`, ...). Each bundle picks one element from every list with the same selector and
//! folds them into one affine matrix per role.

use crate::config::schema::{Scale, ThemeConfig};
use crate::foundation::core::{Affine, Role, Selector};

/// Number of bundles built per theme.
pub const BUNDLE_COUNT: usize = 15;

/// The four role matrices for one selector value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TransformBundle {
    pub white_stone: Affine,
    pub black_stone: Affine,
    pub white_shadow: Affine,
    pub black_shadow: Affine,
    /// Selector value the bundle was generated from.
    pub rando: f64,
}

impl TransformBundle {
    /// Matrix for `role`.
    pub fn for_role(&self, role: Role) -> Affine {
        match role {
            Role::WhiteStone => self.white_stone,
            Role::BlackStone => self.black_stone,
            Role::WhiteShadow => self.white_shadow,
            Role::BlackShadow => self.black_shadow,
        }
    }
}

/// The layered lists feeding one role's matrix.
struct RoleLayers<'a> {
    offsets: [&'a [[f64; 2]]; 3],
    sizes: [&'a [Scale]; 3],
    rotations: [&'a [f64]; 3],
}

impl<'a> RoleLayers<'a> {
    fn of(config: &'a ThemeConfig, role: Role) -> Self {
        let c = config;
        match role {
            Role::WhiteStone => Self {
                offsets: [&c.offsets, &c.stone_offsets, &c.white_stone_offsets],
                sizes: [&c.sizes, &c.stone_sizes, &c.white_stone_sizes],
                rotations: [&c.rotations, &c.stone_rotations, &c.white_stone_rotations],
            },
            Role::BlackStone => Self {
                offsets: [&c.offsets, &c.stone_offsets, &c.black_stone_offsets],
                sizes: [&c.sizes, &c.stone_sizes, &c.black_stone_sizes],
                rotations: [&c.rotations, &c.stone_rotations, &c.black_stone_rotations],
            },
            Role::WhiteShadow => Self {
                offsets: [&c.offsets, &c.shadow_offsets, &c.white_shadow_offsets],
                sizes: [&c.sizes, &c.shadow_sizes, &c.white_shadow_sizes],
                rotations: [&c.rotations, &c.shadow_rotations, &c.white_shadow_rotations],
            },
            Role::BlackShadow => Self {
                offsets: [&c.offsets, &c.shadow_offsets, &c.black_shadow_offsets],
                sizes: [&c.sizes, &c.shadow_sizes, &c.black_shadow_sizes],
                rotations: [&c.rotations, &c.shadow_rotations, &c.black_shadow_rotations],
            },
        }
    }

    /// `translate(sum of offsets) * scale(size_1) * scale(size_2) * scale(size_3) *
    /// rotate(sum of rotations)`; empty lists contribute nothing.
    fn matrix(&self, rando: Selector) -> Affine {
        let (mut x, mut y) = (0.0, 0.0);
        for list in self.offsets {
            if let Some([dx, dy]) = pick(list, rando) {
                x += dx;
                y += dy;
            }
        }

        let mut m = Affine::translate((x, y));
        for list in self.sizes {
            if let Some(s) = pick(list, rando) {
                let (sx, sy) = s.factors();
                m = m * Affine::scale_non_uniform(sx, sy);
            }
        }

        let degrees: f64 = self
            .rotations
            .iter()
            .filter_map(|list| pick(list, rando))
            .sum();
        m * Affine::rotate(degrees.to_radians())
    }
}

fn pick<T: Copy>(list: &[T], rando: Selector) -> Option<T> {
    if list.is_empty() {
        None
    } else {
        Some(list[rando.index(list.len())])
    }
}

/// Fixed array of bundles for one configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransformMatrixCache {
    bundles: Vec<TransformBundle>,
}

impl TransformMatrixCache {
    /// Build [`BUNDLE_COUNT`] bundles from `config.random_seed`.
    ///
    /// The first bundle uses `31 * seed + 73 * seed`; each following one multiplies the
    /// previous value by 74 (`r + 73 * r`). All four roles of a bundle share its value.
    pub fn build(config: &ThemeConfig) -> Self {
        let seed = config.random_seed;
        let layers = Role::ALL.map(|role| RoleLayers::of(config, role));

        let mut rando = 31.0 * seed + 73.0 * seed;
        let mut bundles = Vec::with_capacity(BUNDLE_COUNT);
        for _ in 0..BUNDLE_COUNT {
            let sel = Selector(rando);
            let [white_stone, black_stone, white_shadow, black_shadow] =
                layers.each_ref().map(|l| l.matrix(sel));
            bundles.push(TransformBundle {
                white_stone,
                black_stone,
                white_shadow,
                black_shadow,
                rando,
            });
            rando = rando + 73.0 * rando;
        }

        Self { bundles }
    }

    /// Bundle chosen by `selector mod 15`.
    pub fn bundle(&self, selector: Selector) -> &TransformBundle {
        &self.bundles[selector.index(self.bundles.len())]
    }

    pub fn bundles(&self) -> &[TransformBundle] {
        &self.bundles
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl Default for TransformMatrixCache {
    fn default() -> Self {
        Self::build(&ThemeConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrices.rs"]
mod tests;
