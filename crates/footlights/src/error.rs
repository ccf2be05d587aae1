//! Error type shared by color parsing, style construction and rendering.

use thiserror::Error;

/// Error returned when a color, style or render pass is rejected.
///
/// Every variant is caused by caller input. Nothing is retried and no default
/// value is ever substituted for invalid input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Color text does not match the recognized color grammar.
    #[error("invalid color syntax '{text}': {reason}")]
    InvalidColorSyntax { text: String, reason: String },

    /// A gradient was built from an empty stop list.
    #[error("gradient has no color stops")]
    EmptyGradient,

    /// A stop position is outside 0–100, not a number, or decreasing.
    #[error("invalid position '{position}' for gradient stop {index}: {reason}")]
    InvalidStopPosition {
        index: usize,
        position: String,
        reason: String,
    },

    /// The color of a gradient stop failed to parse.
    #[error("malformed color in gradient stop {index}: {source}")]
    MalformedColor {
        index: usize,
        #[source]
        source: Box<EngineError>,
    },

    /// A numeric attribute is out of range.
    #[error("invalid {attribute} '{value}': {reason}")]
    InvalidDimension {
        attribute: &'static str,
        value: String,
        reason: String,
    },

    /// A style name cannot be emitted as a selector or element attribute.
    #[error("invalid style name '{name}': {reason}")]
    InvalidStyleName { name: String, reason: &'static str },

    /// An image reference cannot be turned into an emittable token.
    #[error("style '{style}': image reference '{reference}' cannot be resolved")]
    UnresolvedReference { style: String, reference: String },

    /// Wraps an error raised while building the named style.
    #[error("style '{style}': {source}")]
    InStyle {
        style: String,
        #[source]
        source: Box<EngineError>,
    },

    /// A stylesheet document could not be decoded.
    #[error("invalid stylesheet: {message}")]
    Sheet { message: String },

    /// The stylesheet template failed to render.
    #[error("template error: {message}")]
    Template { message: String },

    /// The markup writer failed.
    #[error("markup error: {message}")]
    Markup { message: String },
}

impl EngineError {
    /// Attaches the name of the style being built.
    pub fn in_style(self, style: impl Into<String>) -> Self {
        EngineError::InStyle {
            style: style.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping style and stop wrappers.
    pub fn root_cause(&self) -> &EngineError {
        match self {
            EngineError::InStyle { source, .. } | EngineError::MalformedColor { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

impl From<minijinja::Error> for EngineError {
    fn from(err: minijinja::Error) -> Self {
        EngineError::Template {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for EngineError {
    fn from(err: serde_yaml::Error) -> Self {
        EngineError::Sheet {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Sheet {
            message: err.to_string(),
        }
    }
}
