//! Visual style of guide lines.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn blue() -> Self {
        Self::new(0, 0, 255, 255)
    }

    pub fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style applied to every guide line primitive when it is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideLineStyle {
    /// Stroke color.
    pub stroke: SerializableColor,
    /// Fill color (used by backends that fill line caps).
    pub fill: SerializableColor,
    /// Stroke width in screen pixels.
    pub line_width: f64,
    /// Dash pattern in screen pixels (empty = solid).
    pub dash: Vec<f64>,
}

impl Default for GuideLineStyle {
    fn default() -> Self {
        Self {
            stroke: SerializableColor::blue(),
            fill: SerializableColor::red(),
            line_width: 1.0,
            dash: Vec::new(),
        }
    }
}

impl GuideLineStyle {
    pub fn stroke_color(&self) -> Color {
        self.stroke.into()
    }

    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_roundtrip() {
        let color = Color::from_rgba8(12, 34, 56, 78);
        let serializable = SerializableColor::from(color);
        assert_eq!(serializable, SerializableColor::new(12, 34, 56, 78));
        let back: Color = serializable.into();
        assert_eq!(back.to_rgba8(), color.to_rgba8());
    }

    #[test]
    fn test_default_style() {
        let style = GuideLineStyle::default();
        assert_eq!(style.stroke, SerializableColor::blue());
        assert!(!style.is_dashed());
        assert!((style.line_width - 1.0).abs() < f64::EPSILON);
    }
}
