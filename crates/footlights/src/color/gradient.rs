//! Linear gradients and their stops.

use std::fmt;

use super::{parse_color, ColorValue};
use crate::error::EngineError;

/// Position of a stop along the gradient, as a percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StopPosition(f32);

impl StopPosition {
    /// Validates a percentage for the stop at `index`.
    pub fn new(index: usize, percent: f32) -> Result<Self, EngineError> {
        if !percent.is_finite() {
            return Err(EngineError::InvalidStopPosition {
                index,
                position: percent.to_string(),
                reason: "not a finite number".to_string(),
            });
        }
        if !(0.0..=100.0).contains(&percent) {
            return Err(EngineError::InvalidStopPosition {
                index,
                position: percent.to_string(),
                reason: "must be between 0% and 100%".to_string(),
            });
        }
        // Folds -0.0 into 0.0 so it never prints as "-0".
        Ok(Self(percent + 0.0))
    }

    /// Parses `"10%"` or `"10"` for the stop at `index`.
    pub fn parse(index: usize, text: &str) -> Result<Self, EngineError> {
        let trimmed = text.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        match number.parse::<f32>() {
            Ok(percent) => Self::new(index, percent),
            Err(_) => Err(EngineError::InvalidStopPosition {
                index,
                position: text.to_string(),
                reason: "not a percentage".to_string(),
            }),
        }
    }

    pub fn percent(self) -> f32 {
        self.0
    }
}

/// Writes the percentage with a trailing `%`, e.g. `12.5%`.
impl fmt::Display for StopPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// One `(color, position)` point of a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub color: ColorValue,
    pub position: StopPosition,
}

impl ColorStop {
    pub fn new(color: ColorValue, position: StopPosition) -> Self {
        Self { color, position }
    }
}

/// A linear gradient: stops in declaration order plus an angle.
///
/// Stops are never sorted or deduplicated; the order given is the
/// interpolation order. The angle is stored in `[0, 360)`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    stops: Vec<ColorStop>,
    angle: f32,
}

impl LinearGradient {
    /// Builds a gradient from `(color text, percentage)` pairs.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmptyGradient`] when `stops` is empty
    /// - [`EngineError::InvalidStopPosition`] when a percentage is outside
    ///   `0..=100`, not finite, or lower than the previous stop's
    /// - [`EngineError::MalformedColor`] when a stop's color does not parse
    /// - [`EngineError::InvalidDimension`] when `angle` is not finite
    ///
    /// # Example
    ///
    /// ```rust
    /// use footlights::LinearGradient;
    ///
    /// let gradient = LinearGradient::new(
    ///     [("hsl(240 46% 65%)", 0.0), ("hsl(56 37% 89%)", 100.0)],
    ///     395.0,
    /// )
    /// .unwrap();
    /// assert_eq!(gradient.angle(), 35.0);
    /// assert_eq!(gradient.stops()[1].color.as_str(), "hsl(56 37% 89%)");
    /// ```
    pub fn new<I, S>(stops: I, angle: f32) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        let stops = stops
            .into_iter()
            .enumerate()
            .map(|(index, (text, percent))| {
                let position = StopPosition::new(index, percent)?;
                Ok((index, text, position))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        let stops = stops
            .into_iter()
            .map(|(index, text, position)| {
                let color = parse_color(text.as_ref()).map_err(|err| EngineError::MalformedColor {
                    index,
                    source: Box::new(err),
                })?;
                Ok(ColorStop::new(color, position))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        Self::from_stops(stops, angle)
    }

    /// Builds a gradient from already validated stops.
    ///
    /// Applies the same emptiness, ordering and angle checks as
    /// [`LinearGradient::new`].
    pub fn from_stops(stops: Vec<ColorStop>, angle: f32) -> Result<Self, EngineError> {
        if stops.is_empty() {
            return Err(EngineError::EmptyGradient);
        }

        for (index, pair) in stops.windows(2).enumerate() {
            if pair[1].position < pair[0].position {
                return Err(EngineError::InvalidStopPosition {
                    index: index + 1,
                    position: pair[1].position.to_string(),
                    reason: format!("must not be lower than the previous stop ({})", pair[0].position),
                });
            }
        }

        Ok(Self {
            stops,
            angle: normalize_angle(angle)?,
        })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Angle in degrees, in `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }
}

/// Reduces an angle in degrees to `[0, 360)`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidDimension`] for NaN or infinite input.
pub fn normalize_angle(angle: f32) -> Result<f32, EngineError> {
    if !angle.is_finite() {
        return Err(EngineError::InvalidDimension {
            attribute: "gradient angle",
            value: angle.to_string(),
            reason: "must be a finite number of degrees".to_string(),
        });
    }
    let reduced = angle.rem_euclid(360.0) + 0.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    Ok(if reduced >= 360.0 { 0.0 } else { reduced })
}
