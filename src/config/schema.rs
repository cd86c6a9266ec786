//! Theme document schema.
//!
//! Every recognized field is declared once in the table at the bottom of this file: JSON name,
//! Rust field, declared type and default. The table expands into [`ThemeConfig`], its `Default`
//! impl, the public [`SCHEMA`] description and the strictly-typed field merge used by the
//! loader.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Font stack used when a theme does not name one.
pub const GOBAN_FONT: &str = "Verdana,Arial,sans-serif";

/// Declared type of a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// JSON string.
    Text,
    /// JSON number.
    Number,
    /// Array of numbers.
    NumberList,
    /// Array of strings.
    TextList,
    /// Array of `[x, y]` number pairs.
    PairList,
    /// Array whose elements are a number or an `[x, y]` pair.
    ScaleList,
}

/// One schema entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FieldSpec {
    /// Field name as it appears in theme documents.
    pub name: &'static str,
    /// Declared type.
    pub kind: FieldKind,
}

/// A size adjustment: uniform, or separate x/y factors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
    /// Same factor on both axes.
    Uniform(f64),
    /// Separate x and y factors.
    Axes(f64, f64),
}

impl Scale {
    /// `(sx, sy)` factors.
    pub fn factors(self) -> (f64, f64) {
        match self {
            Scale::Uniform(s) => (s, s),
            Scale::Axes(x, y) => (x, y),
        }
    }
}

/// Outcome of offering one document field to the config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldMerge {
    Accepted,
    Mismatched,
    Unknown,
}

/// A Rust type that a schema field can hold, with its strict JSON conversion.
pub(crate) trait FieldValue: Sized {
    const KIND: FieldKind;

    /// `None` unless `v` matches the declared type exactly.
    fn from_json(v: &Value) -> Option<Self>;

    fn to_json(&self) -> Value;
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn from_json(v: &Value) -> Option<Self> {
        v.as_str().map(str::to_owned)
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for f64 {
    const KIND: FieldKind = FieldKind::Number;

    fn from_json(v: &Value) -> Option<Self> {
        v.as_f64()
    }

    fn to_json(&self) -> Value {
        number_json(*self)
    }
}

impl FieldValue for Vec<f64> {
    const KIND: FieldKind = FieldKind::NumberList;

    fn from_json(v: &Value) -> Option<Self> {
        v.as_array()?.iter().map(Value::as_f64).collect()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().copied().map(number_json).collect())
    }
}

impl FieldValue for Vec<String> {
    const KIND: FieldKind = FieldKind::TextList;

    fn from_json(v: &Value) -> Option<Self> {
        v.as_array()?
            .iter()
            .map(|e| e.as_str().map(str::to_owned))
            .collect()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().cloned().map(Value::String).collect())
    }
}

impl FieldValue for Vec<[f64; 2]> {
    const KIND: FieldKind = FieldKind::PairList;

    fn from_json(v: &Value) -> Option<Self> {
        v.as_array()?.iter().map(pair_from_json).collect()
    }

    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(|p| pair_json(*p)).collect())
    }
}

impl FieldValue for Vec<Scale> {
    const KIND: FieldKind = FieldKind::ScaleList;

    fn from_json(v: &Value) -> Option<Self> {
        v.as_array()?
            .iter()
            .map(|e| match e {
                Value::Number(n) => n.as_f64().map(Scale::Uniform),
                Value::Array(_) => pair_from_json(e).map(|[x, y]| Scale::Axes(x, y)),
                _ => None,
            })
            .collect()
    }

    fn to_json(&self) -> Value {
        Value::Array(
            self.iter()
                .map(|s| match *s {
                    Scale::Uniform(v) => number_json(v),
                    Scale::Axes(x, y) => pair_json([x, y]),
                })
                .collect(),
        )
    }
}

fn pair_from_json(v: &Value) -> Option<[f64; 2]> {
    match v.as_array()?.as_slice() {
        [x, y] => Some([x.as_f64()?, y.as_f64()?]),
        _ => None,
    }
}

fn pair_json(p: [f64; 2]) -> Value {
    Value::Array(vec![number_json(p[0]), number_json(p[1])])
}

fn number_json(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

macro_rules! theme_schema {
    ($( $(#[$doc:meta])* $json:literal => $field:ident : $ty:ty = $default:expr; )*) => {
        /// Validated, fully-defaulted theme configuration.
        ///
        /// Built only by [`ThemeConfig::default`] or the loader's merge; never patched field by
        /// field once handed to an engine.
        #[derive(Clone, Debug, PartialEq)]
        pub struct ThemeConfig {
            $( $(#[$doc])* pub $field: $ty, )*
            specified: BTreeSet<&'static str>,
        }

        impl Default for ThemeConfig {
            fn default() -> Self {
                Self {
                    $( $field: $default, )*
                    specified: BTreeSet::new(),
                }
            }
        }

        /// Every recognized document field with its declared type, in declaration order.
        pub const SCHEMA: &[FieldSpec] = &[
            $( FieldSpec { name: $json, kind: <$ty as FieldValue>::KIND }, )*
        ];

        impl ThemeConfig {
            pub(crate) fn merge_field(&mut self, name: &str, value: &Value) -> FieldMerge {
                match name {
                    $(
                        $json => match <$ty as FieldValue>::from_json(value) {
                            Some(v) => {
                                self.$field = v;
                                self.specified.insert($json);
                                FieldMerge::Accepted
                            }
                            None => FieldMerge::Mismatched,
                        },
                    )*
                    _ => FieldMerge::Unknown,
                }
            }

            /// Render the config back into a theme document using schema field names.
            pub fn to_document(&self) -> Value {
                let mut m = Map::new();
                $( m.insert($json.to_string(), FieldValue::to_json(&self.$field)); )*
                Value::Object(m)
            }
        }
    };
}

impl ThemeConfig {
    /// `true` when `field` (a document field name) was taken from the loaded document rather
    /// than left at its default.
    pub fn was_specified(&self, field: &str) -> bool {
        self.specified.contains(field)
    }

    /// Document field names taken from the loaded document.
    pub fn specified_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specified.iter().copied()
    }
}

/// Look up the schema entry for a document field name.
pub fn field_spec(name: &str) -> Option<FieldSpec> {
    SCHEMA.iter().copied().find(|f| f.name == name)
}

fn uniform(v: &[f64]) -> Vec<Scale> {
    v.iter().copied().map(Scale::Uniform).collect()
}

theme_schema! {
    /// Display name.
    "name" => name: String = "JSON Theme".to_string();
    /// Jitter factor relative to the radius. Carried but not applied.
    "fuzzyPlacement" => fuzzy_placement: f64 = 0.01;

    /// Board color beneath the stones.
    "boardColor" => board_color: String = "#DCB35C".to_string();
    /// Board image URL.
    "boardImage" => board_image: String = String::new();

    /// White stone image URLs, picked by selector.
    "whiteStones" => white_stones: Vec<String> = Vec::new();
    /// Black stone image URLs, picked by selector.
    "blackStones" => black_stones: Vec<String> = Vec::new();

    /// Shadow image URLs used for a color whose own shadow list was not supplied.
    "shadows" => shadows: Vec<String> = Vec::new();
    /// Shadows for white stones.
    "whiteShadows" => white_shadows: Vec<String> = Vec::new();
    /// Shadows for black stones.
    "blackShadows" => black_shadows: Vec<String> = Vec::new();

    /// Perceived color of white stones; fill of the vector fallback.
    "whiteStoneColor" => white_stone_color: String = "#ffffff".to_string();
    /// Perceived color of black stones; fill of the vector fallback.
    "blackStoneColor" => black_stone_color: String = "#000000".to_string();

    /// Outline width of vector white stones, in stone diameters.
    "whiteStoneLineWidth" => white_stone_line_width: f64 = 1.0 / 20.0;
    /// Outline width of vector black stones, in stone diameters.
    "blackStoneLineWidth" => black_stone_line_width: f64 = 0.0;
    "whiteStoneLineColor" => white_stone_line_color: String = "#000000".to_string();
    "blackStoneLineColor" => black_stone_line_color: String = "#000000".to_string();

    /// Label color over white stones.
    "whiteTextColor" => white_text_color: String = "#000000".to_string();
    /// Label color over black stones.
    "blackTextColor" => black_text_color: String = "#ffffff".to_string();

    /// General marking color when a specific one is not set.
    "boardInkColor" => board_ink_color: String = "#000000".to_string();
    /// General marking color when faded.
    "boardFadedInkColor" => board_faded_ink_color: String = "#888888".to_string();
    "boardFont" => board_font: String = GOBAN_FONT.to_string();
    "coordinateFont" => coordinate_font: String = String::new();
    "labelFont" => label_font: String = String::new();

    "lineColor" => line_color: String = String::new();
    "fadedLineColor" => faded_line_color: String = String::new();
    "starColor" => star_color: String = String::new();
    "fadedStarColor" => faded_star_color: String = String::new();
    /// Text color on empty intersections.
    "blankTextColor" => blank_text_color: String = String::new();
    "coordinateColor" => coordinate_color: String = String::new();

    /// Rotations in degrees applied to every role.
    "rotations" => rotations: Vec<f64> = vec![0.0];
    /// Scales applied to every role.
    "sizes" => sizes: Vec<Scale> = uniform(&[1.0]);
    /// Offsets, in stone diameters, applied to every role.
    "offsets" => offsets: Vec<[f64; 2]> = vec![[0.0, 0.0]];

    "stoneOffsets" => stone_offsets: Vec<[f64; 2]> = vec![[0.0, 0.0]];
    "whiteStoneOffsets" => white_stone_offsets: Vec<[f64; 2]> = vec![[0.0, 0.0]];
    "blackStoneOffsets" => black_stone_offsets: Vec<[f64; 2]> = vec![[0.0, 0.0]];

    "stoneSizes" => stone_sizes: Vec<Scale> = uniform(&[1.0]);
    "whiteStoneSizes" => white_stone_sizes: Vec<Scale> = uniform(&[1.0, 1.0]);
    "blackStoneSizes" => black_stone_sizes: Vec<Scale> = uniform(&[1.0, 1.0]);

    "stoneRotations" => stone_rotations: Vec<f64> = vec![0.0, 0.0];
    "whiteStoneRotations" => white_stone_rotations: Vec<f64> = vec![0.0, 0.0];
    "blackStoneRotations" => black_stone_rotations: Vec<f64> = vec![0.0, 0.0];

    "shadowOffsets" => shadow_offsets: Vec<[f64; 2]> = vec![[0.0, 0.0]];
    "whiteShadowOffsets" => white_shadow_offsets: Vec<[f64; 2]> = vec![[0.0, 0.0]];
    "blackShadowOffsets" => black_shadow_offsets: Vec<[f64; 2]> = vec![[0.0, 0.0]];

    "shadowSizes" => shadow_sizes: Vec<Scale> = uniform(&[1.0]);
    "whiteShadowSizes" => white_shadow_sizes: Vec<Scale> = uniform(&[1.0, 1.0]);
    "blackShadowSizes" => black_shadow_sizes: Vec<Scale> = uniform(&[1.0, 1.0]);

    "shadowRotations" => shadow_rotations: Vec<f64> = vec![0.0];
    "whiteShadowRotations" => white_shadow_rotations: Vec<f64> = vec![0.0];
    "blackShadowRotations" => black_shadow_rotations: Vec<f64> = vec![0.0];

    /// Sort key among themes; greater sorts later.
    "priority" => priority: f64 = 4.0;
    /// Seed for the transform bundles.
    "randomSeed" => random_seed: f64 = 2083.0;

    /// Stone draw area override, `[left, top, right, bottom]` in cells.
    "stoneBoundingBox" => stone_bounding_box: Vec<f64> = Vec::new();
    /// Shadow draw area override.
    "shadowBoundingBox" => shadow_bounding_box: Vec<f64> = Vec::new();
    /// Markings draw area override.
    "markingsBoundingBox" => markings_bounding_box: Vec<f64> = Vec::new();
}

impl ThemeConfig {
    /// Shadow URLs a color ends up with: its own list when the document supplied one, else the
    /// generic `shadows` list.
    pub fn effective_shadows(&self, color: crate::StoneColor) -> Vec<String> {
        let (own, field) = match color {
            crate::StoneColor::White => (&self.white_shadows, "whiteShadows"),
            crate::StoneColor::Black => (&self.black_shadows, "blackShadows"),
        };
        if own.is_empty() && !self.was_specified(field) {
            self.shadows.clone()
        } else {
            own.clone()
        }
    }

    /// Stone URLs for a color.
    pub fn stones(&self, color: crate::StoneColor) -> &[String] {
        match color {
            crate::StoneColor::White => &self.white_stones,
            crate::StoneColor::Black => &self.black_stones,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/schema.rs"]
mod tests;
