//! Color and font accessors with fallback chains.
//!
//! An empty string in the config means "not set" and falls through to the next link.

use crate::config::schema::{GOBAN_FONT, ThemeConfig};
use crate::config::loader::FALLBACK_THEME_NAME;

/// Styles for the board background layer.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BackgroundStyle {
    /// Solid color painted beneath everything.
    pub color: String,
    /// Board image URL, when the theme has one.
    pub image: Option<String>,
    /// Image sizing mode; `cover` whenever an image is present.
    pub size: Option<&'static str>,
}

fn first_set<'a>(chain: &[&'a str], fallback: &'a str) -> &'a str {
    chain.iter().copied().find(|s| !s.is_empty()).unwrap_or(fallback)
}

impl ThemeConfig {
    /// Theme display name.
    pub fn theme_name(&self) -> &str {
        first_set(&[self.name.as_str()], FALLBACK_THEME_NAME)
    }

    /// Sort key among themes.
    pub fn sort_key(&self) -> f64 {
        self.priority
    }

    pub fn white_stone_color(&self) -> &str {
        first_set(&[self.white_stone_color.as_str()], "#ffffff")
    }

    pub fn black_stone_color(&self) -> &str {
        first_set(&[self.black_stone_color.as_str()], "#000000")
    }

    pub fn white_stone_line_color(&self) -> &str {
        first_set(&[self.white_stone_line_color.as_str()], self.white_text_color())
    }

    pub fn black_stone_line_color(&self) -> &str {
        first_set(&[self.black_stone_line_color.as_str()], "#000000")
    }

    pub fn white_stone_line_width(&self) -> f64 {
        self.white_stone_line_width
    }

    pub fn black_stone_line_width(&self) -> f64 {
        self.black_stone_line_width
    }

    /// Label color over white stones.
    pub fn white_text_color(&self) -> &str {
        first_set(&[self.white_text_color.as_str()], "#000000")
    }

    /// Label color over black stones.
    pub fn black_text_color(&self) -> &str {
        first_set(&[self.black_text_color.as_str()], "#ffffff")
    }

    pub fn board_font(&self) -> &str {
        first_set(&[self.board_font.as_str()], GOBAN_FONT)
    }

    pub fn label_font(&self) -> &str {
        first_set(&[self.label_font.as_str()], self.board_font())
    }

    pub fn coordinate_font(&self) -> &str {
        first_set(&[self.coordinate_font.as_str()], self.board_font())
    }

    /// Grid line color.
    pub fn line_color(&self) -> &str {
        first_set(&[self.line_color.as_str(), self.board_ink_color.as_str()], "#000000")
    }

    /// Grid line color where text sits over the intersection.
    pub fn faded_line_color(&self) -> &str {
        first_set(
            &[self.faded_line_color.as_str(), self.board_faded_ink_color.as_str()],
            "#888888",
        )
    }

    /// Star point color.
    pub fn star_color(&self) -> &str {
        first_set(&[self.star_color.as_str(), self.board_ink_color.as_str()], "#000000")
    }

    pub fn faded_star_color(&self) -> &str {
        first_set(
            &[self.faded_star_color.as_str(), self.board_faded_ink_color.as_str()],
            "#888888",
        )
    }

    /// Text color over empty intersections.
    pub fn blank_text_color(&self) -> &str {
        first_set(&[self.blank_text_color.as_str(), self.board_ink_color.as_str()], "#000000")
    }

    /// Coordinate label color.
    pub fn label_text_color(&self) -> &str {
        first_set(&[self.coordinate_color.as_str(), self.board_ink_color.as_str()], "#000000")
    }

    pub fn background_style(&self) -> BackgroundStyle {
        if self.board_image.is_empty() {
            BackgroundStyle {
                color: self.board_color.clone(),
                image: None,
                size: None,
            }
        } else {
            BackgroundStyle {
                color: self.board_color.clone(),
                image: Some(self.board_image.clone()),
                size: Some("cover"),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/palette.rs"]
mod tests;
