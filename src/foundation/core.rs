use crate::foundation::math::wrap_index;

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Stone color on the board.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum StoneColor {
    /// The white player's stones.
    White,
    /// The black player's stones.
    Black,
}

impl StoneColor {
    /// Role used when drawing the stone itself.
    pub fn stone_role(self) -> Role {
        match self {
            Self::White => Role::WhiteStone,
            Self::Black => Role::BlackStone,
        }
    }

    /// Role used when drawing the stone's shadow.
    pub fn shadow_role(self) -> Role {
        match self {
            Self::White => Role::WhiteShadow,
            Self::Black => Role::BlackShadow,
        }
    }
}

/// One of the four independently configurable artwork classes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// White stone artwork.
    WhiteStone,
    /// Black stone artwork.
    BlackStone,
    /// Shadow cast by a white stone.
    WhiteShadow,
    /// Shadow cast by a black stone.
    BlackShadow,
}

impl Role {
    /// All roles in bundle order.
    pub const ALL: [Role; 4] = [
        Role::WhiteStone,
        Role::BlackStone,
        Role::WhiteShadow,
        Role::BlackShadow,
    ];

    /// `true` for the two shadow roles.
    pub fn is_shadow(self) -> bool {
        matches!(self, Role::WhiteShadow | Role::BlackShadow)
    }

    /// Stone color this role belongs to.
    pub fn color(self) -> StoneColor {
        match self {
            Role::WhiteStone | Role::WhiteShadow => StoneColor::White,
            Role::BlackStone | Role::BlackShadow => StoneColor::Black,
        }
    }
}

/// Stable per-stone value used to pick artwork and transform bundles.
///
/// Selectors are integer-valued but carried as `f64`: the generating recurrences grow past
/// 2^53 within a handful of steps, and published themes are tuned against the exact
/// double-precision progression (including its rounding).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Selector(pub f64);

impl Selector {
    /// Index into a list of `len` items (`selector mod len`).
    ///
    /// Returns `0` for empty lists and for non-finite selectors.
    pub fn index(self, len: usize) -> usize {
        wrap_index(self.0, len)
    }

    /// Raw selector value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Selector {
    fn from(v: f64) -> Self {
        Self(v)
    }
}

/// Left/top/right/bottom box in unit-cell coordinates, where `1.0` is one grid square.
pub fn unit_box(ltrb: [f64; 4]) -> Rect {
    Rect::new(ltrb[0], ltrb[1], ltrb[2], ltrb[3])
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
