//! Visual style of a shape.
//!
//! Colours travel as CSS colour strings. The special fill value `"fog"` means
//! "paint with the current fog colour" and is resolved through [`FogColour`].

use crate::collab::FogColour;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

/// Fill value that is painted with the fog colour.
pub const FOG_FILL: &str = "fog";

/// Stroke colour meaning "no stroke".
pub const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// Default canvas composite operation.
pub const DEFAULT_DRAW_OPERATOR: &str = "source-over";

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    /// Fill colour (CSS string or [`FOG_FILL`]).
    pub fill_colour: String,
    /// Stroke colour (CSS string).
    pub stroke_colour: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Canvas composite operation used when drawing.
    pub draw_operator: String,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_colour: "#000".to_string(),
            stroke_colour: TRANSPARENT.to_string(),
            stroke_width: 5.0,
            draw_operator: DEFAULT_DRAW_OPERATOR.to_string(),
        }
    }
}

impl ShapeStyle {
    /// Whether the fill follows the fog colour.
    pub fn is_fog(&self) -> bool {
        self.fill_colour == FOG_FILL
    }

    /// Resolve the fill to a peniko colour. Unparseable colours give `None`.
    pub fn fill(&self, fog: &dyn FogColour) -> Option<Color> {
        if self.is_fog() {
            return Some(fog.fog_colour());
        }
        parse_css(&self.fill_colour)
    }

    /// Resolve the stroke to a peniko colour. Fully transparent strokes give `None`.
    pub fn stroke(&self) -> Option<Color> {
        parse_css(&self.stroke_colour).filter(|c| c.components[3] > 0.0)
    }

    /// Whether a stroke should be drawn at all.
    pub fn has_stroke(&self) -> bool {
        self.stroke_width > 0.0 && self.stroke().is_some()
    }
}

fn parse_css(value: &str) -> Option<Color> {
    match parse_color(value) {
        Ok(dynamic) => Some(dynamic.to_alpha_color::<Srgb>()),
        Err(e) => {
            log::debug!("Unparseable colour {:?}: {}", value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct GreyFog;

    impl FogColour for GreyFog {
        fn fog_colour(&self) -> Color {
            Color::from_rgba8(82, 81, 81, 255)
        }
    }

    #[test]
    fn test_default_has_no_stroke() {
        let style = ShapeStyle::default();
        assert!(!style.has_stroke());
        assert!(style.fill(&GreyFog).is_some());
    }

    #[test]
    fn test_fog_fill() {
        let style = ShapeStyle {
            fill_colour: FOG_FILL.to_string(),
            ..ShapeStyle::default()
        };
        let fill = style.fill(&GreyFog).unwrap();
        assert_eq!(fill.to_rgba8().r, 82);
    }

    #[test]
    fn test_parse_stroke() {
        let style = ShapeStyle {
            stroke_colour: "#ff0000".to_string(),
            ..ShapeStyle::default()
        };
        let stroke = style.stroke().unwrap().to_rgba8();
        assert_eq!((stroke.r, stroke.g, stroke.b, stroke.a), (255, 0, 0, 255));
        assert!(style.has_stroke());
    }

    #[test]
    fn test_invalid_colour() {
        let style = ShapeStyle {
            fill_colour: "not a colour".to_string(),
            ..ShapeStyle::default()
        };
        assert!(style.fill(&GreyFog).is_none());
    }
}
