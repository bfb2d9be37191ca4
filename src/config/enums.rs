//! Configuration enum types.

use crate::draw::color::{self, BLACK};
use crate::draw::Color;
use log::warn;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex color
/// default_color = "#1e90ff"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, white, black) or
    /// a `#rrggbb` / `#rrggbbaa` hex string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Strings starting with `#` are parsed as hex, anything else is looked up
    /// with [`color::name_to_color`]. Unknown or malformed values fall back to
    /// black with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) if name.starts_with('#') => {
                Color::from_hex(name).unwrap_or_else(|err| {
                    warn!("Invalid color '{}' ({}), using black", name, err);
                    BLACK
                })
            }
            ColorSpec::Name(name) => color::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", name);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Name(color.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};

    #[test]
    fn named_hex_and_rgb_specs_resolve() {
        assert_eq!(ColorSpec::Name("Red".into()).to_color(), RED);
        assert_eq!(ColorSpec::Name("#ffffff".into()).to_color(), WHITE);
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color(), RED);
    }

    #[test]
    fn unknown_names_fall_back_to_black() {
        assert_eq!(ColorSpec::Name("mauve".into()).to_color(), BLACK);
        assert_eq!(ColorSpec::Name("#12".into()).to_color(), BLACK);
    }
}
