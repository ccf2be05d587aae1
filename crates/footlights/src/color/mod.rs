//! Color model: solid colors and linear gradients.
//!
//! - [`ColorValue`]: a validated solid color, kept in its resolved text form
//! - [`LinearGradient`]: ordered [`ColorStop`]s plus an angle
//! - [`Color`]: either of the two
//!
//! All values are immutable once built and construction has no side effects.

mod gradient;
mod parse;

pub use gradient::{normalize_angle, ColorStop, LinearGradient, StopPosition};
pub use parse::parse_color;

use std::fmt;

use crate::error::EngineError;

/// Notation a solid color was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorNotation {
    /// A CSS named color or `transparent`.
    Named,
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    Hex,
    /// `rgb()` / `rgba()`.
    Rgb,
    /// `hsl()` / `hsla()`.
    Hsl,
}

/// A solid color that passed the color grammar.
///
/// The stored text is the resolved form: lower-cased, comment-free and with
/// normalized separators, so equal colors written differently compare equal
/// and always serialize the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColorValue {
    resolved: String,
    notation: ColorNotation,
}

impl ColorValue {
    pub(crate) fn new(resolved: String, notation: ColorNotation) -> Self {
        Self { resolved, notation }
    }

    /// Parses color text. Same as [`parse_color`].
    pub fn parse(text: &str) -> Result<Self, EngineError> {
        parse_color(text)
    }

    /// The resolved text emitted by renderers.
    pub fn as_str(&self) -> &str {
        &self.resolved
    }

    pub fn notation(&self) -> ColorNotation {
        self.notation
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resolved)
    }
}

/// A fill color: flat or gradient.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Solid(ColorValue),
    Linear(LinearGradient),
}

impl Color {
    /// Parses a solid color.
    ///
    /// # Example
    ///
    /// ```rust
    /// use footlights::Color;
    ///
    /// let color = Color::solid("RGB(255, 0, 0)").unwrap();
    /// assert_eq!(color, Color::solid("rgb(255,0,0)").unwrap());
    /// ```
    pub fn solid(text: &str) -> Result<Self, EngineError> {
        parse_color(text).map(Color::Solid)
    }

    /// Builds a linear gradient from `(color text, percentage)` pairs.
    ///
    /// See [`LinearGradient::new`] for the validation rules.
    pub fn linear<I, S>(stops: I, angle: f32) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        LinearGradient::new(stops, angle).map(Color::Linear)
    }
}

impl From<ColorValue> for Color {
    fn from(value: ColorValue) -> Self {
        Color::Solid(value)
    }
}

impl From<LinearGradient> for Color {
    fn from(gradient: LinearGradient) -> Self {
        Color::Linear(gradient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_solid_resolves_text() {
        let color = Color::solid("  Red ").unwrap();
        match color {
            Color::Solid(value) => {
                assert_eq!(value.as_str(), "red");
                assert_eq!(value.notation(), ColorNotation::Named);
            }
            other => panic!("expected solid color, got {:?}", other),
        }
    }

    #[test]
    fn test_color_solid_rejects_garbage() {
        let err = Color::solid("not-a-color").unwrap_err();
        assert!(matches!(err, EngineError::InvalidColorSyntax { .. }));
    }

    #[test]
    fn test_color_linear_wraps_gradient() {
        let color = Color::linear([("red", 0.0), ("blue", 100.0)], 45.0).unwrap();
        match color {
            Color::Linear(gradient) => {
                assert_eq!(gradient.stops().len(), 2);
                assert_eq!(gradient.angle(), 45.0);
            }
            other => panic!("expected gradient, got {:?}", other),
        }
    }

    #[test]
    fn test_color_value_display_matches_as_str() {
        let value = ColorValue::parse("#ABCDEF").unwrap();
        assert_eq!(value.to_string(), value.as_str());
        assert_eq!(value.as_str(), "#abcdef");
    }
}
