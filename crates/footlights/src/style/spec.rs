//! Plain-data style descriptions.
//!
//! A [`StyleSpec`] is what an embedding application (or a stylesheet file)
//! hands the engine: color text, stop lists, an angle, an image handle and
//! integer dimensions. Nothing is validated while deserializing;
//! [`StyleSpec::into_style`] performs every check and reports the first
//! failure.
//!
//! Accepted color shapes:
//!
//! ```yaml
//! color: "#336699"                      # bare text, a solid color
//! color: { Solid: "#336699" }           # tagged solid color
//! color:
//!   Linear:
//!     stops: [["red", "0%"], ["blue", 100]]
//!     degree: 35
//! ```

use serde::Deserialize;

use super::{DropShadow, Style, DEFAULT_SHADOW_BLUR, DEFAULT_SHADOW_OPACITY};
use crate::color::{parse_color, Color, LinearGradient, StopPosition};
use crate::error::EngineError;

/// Plain-data form of a [`Style`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleSpec {
    #[serde(default)]
    pub color: Option<ColorSpec>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "round")]
    pub corner_radius: Option<i64>,
    #[serde(default)]
    pub shadow: Option<ShadowSpec>,
}

impl StyleSpec {
    /// Validates every attribute and builds the style.
    pub fn into_style(self) -> Result<Style, EngineError> {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color.into_color()?);
        }
        if let Some(image) = self.image {
            style.set_image(image);
        }
        if let Some(radius) = self.corner_radius {
            style.set_corner_radius(radius)?;
        }
        if let Some(shadow) = self.shadow {
            style.set_shadow(shadow.into_shadow()?);
        }
        Ok(style)
    }
}

/// Plain-data form of a [`Color`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    Solid(String),
    Linear(GradientSpec),
}

impl ColorSpec {
    pub fn into_color(self) -> Result<Color, EngineError> {
        match self {
            ColorSpec::Solid(text) => parse_color(&text).map(Color::Solid),
            ColorSpec::Linear(gradient) => gradient.into_gradient().map(Color::Linear),
        }
    }
}

impl<'de> Deserialize<'de> for ColorSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        enum Tagged {
            #[serde(alias = "solid")]
            Solid(String),
            #[serde(alias = "linear")]
            Linear(GradientSpec),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Tagged(Tagged),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(text) | Repr::Tagged(Tagged::Solid(text)) => ColorSpec::Solid(text),
            Repr::Tagged(Tagged::Linear(gradient)) => ColorSpec::Linear(gradient),
        })
    }
}

/// Plain-data form of a [`LinearGradient`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradientSpec {
    pub stops: Vec<StopSpec>,
    #[serde(default, alias = "degree")]
    pub angle: f32,
}

impl GradientSpec {
    /// Resolves positions first, then hands the pairs to
    /// [`LinearGradient::new`] for the remaining checks.
    pub fn into_gradient(self) -> Result<LinearGradient, EngineError> {
        let pairs = self
            .stops
            .into_iter()
            .enumerate()
            .map(|(index, StopSpec(color, position))| {
                position
                    .resolve(index)
                    .map(|position| (color, position.percent()))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;
        LinearGradient::new(pairs, self.angle)
    }
}

/// A `[color, position]` pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StopSpec(pub String, pub PositionSpec);

/// A stop position written as a number (`50`) or text (`"50%"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PositionSpec {
    Number(f32),
    Text(String),
}

impl PositionSpec {
    pub fn resolve(&self, index: usize) -> Result<StopPosition, EngineError> {
        match self {
            PositionSpec::Number(percent) => StopPosition::new(index, *percent),
            PositionSpec::Text(text) => StopPosition::parse(index, text),
        }
    }
}

/// Plain-data form of a [`DropShadow`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShadowSpec {
    #[serde(default)]
    pub x: i64,
    #[serde(default)]
    pub y: i64,
    #[serde(default = "default_blur")]
    pub blur: i64,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_blur() -> i64 {
    i64::from(DEFAULT_SHADOW_BLUR)
}

fn default_opacity() -> f32 {
    DEFAULT_SHADOW_OPACITY
}

impl ShadowSpec {
    pub fn into_shadow(self) -> Result<DropShadow, EngineError> {
        DropShadow::new(self.x, self.y)?
            .with_blur(self.blur)?
            .with_opacity(self.opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(yaml: &str) -> StyleSpec {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_spec_bare_color_text() {
        let style = spec("color: '#FFF'").into_style().unwrap();
        assert_eq!(style, Style::new().with_color(Color::solid("#fff").unwrap()));
    }

    #[test]
    fn test_spec_tagged_solid() {
        let style = spec("color: { Solid: navy }").into_style().unwrap();
        assert_eq!(style.color(), Some(&Color::solid("navy").unwrap()));
    }

    #[test]
    fn test_spec_linear_with_aliases() {
        let yaml = r#"
color:
  Linear:
    stops: [["hsl(240 46% 65%)", "0%"], ["hsl(56 37% 89%)", 100]]
    degree: 35
round: 20
"#;
        let style = spec(yaml).into_style().unwrap();
        let expected = Color::linear([("hsl(240 46% 65%)", 0.0), ("hsl(56 37% 89%)", 100.0)], 35.0)
            .unwrap();
        assert_eq!(style.color(), Some(&expected));
        assert_eq!(style.corner_radius(), Some(20));
    }

    #[test]
    fn test_spec_lowercase_tag_and_angle_name() {
        let yaml = "color: { linear: { stops: [[red, 0]], angle: -90 } }";
        let style = spec(yaml).into_style().unwrap();
        match style.color() {
            Some(Color::Linear(gradient)) => assert_eq!(gradient.angle(), 270.0),
            other => panic!("expected gradient, got {:?}", other),
        }
    }

    #[test]
    fn test_spec_shadow_defaults() {
        let style = spec("shadow: { x: 5, y: 5 }").into_style().unwrap();
        let shadow = style.shadow().unwrap();
        assert_eq!((shadow.x(), shadow.y()), (5, 5));
        assert_eq!(shadow.blur(), DEFAULT_SHADOW_BLUR);
        assert_eq!(shadow.opacity(), DEFAULT_SHADOW_OPACITY);
    }

    #[test]
    fn test_spec_unknown_field_rejected() {
        let result: Result<StyleSpec, _> = serde_yaml::from_str("colour: red");
        assert!(result.is_err());
    }

    #[test]
    fn test_spec_json_input() {
        let spec: StyleSpec =
            serde_json::from_str(r#"{"image": "logo", "corner_radius": 4}"#).unwrap();
        let style = spec.into_style().unwrap();
        assert_eq!(style.image().map(|i| i.as_str()), Some("logo"));
        assert_eq!(style.corner_radius(), Some(4));
    }

    // =========================================================================
    // Validation happens in into_style
    // =========================================================================

    #[test]
    fn test_spec_negative_radius() {
        let err = spec("round: -3").into_style().unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimension { attribute: "corner radius", .. }));
    }

    #[test]
    fn test_spec_bad_position_text() {
        let err = spec("color: { Linear: { stops: [[red, 'half']] } }")
            .into_style()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidStopPosition { index: 0, .. }));
    }

    #[test]
    fn test_spec_empty_stops() {
        let err = spec("color: { Linear: { stops: [] } }").into_style().unwrap_err();
        assert_eq!(err, EngineError::EmptyGradient);
    }

    #[test]
    fn test_spec_bad_solid_color() {
        let err = spec("color: chartreusey").into_style().unwrap_err();
        assert!(matches!(err, EngineError::InvalidColorSyntax { .. }));
    }
}
