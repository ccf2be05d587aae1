//! Style values: the attribute bundle stored under each registry name.

use std::fmt;

use crate::color::Color;
use crate::error::EngineError;

/// Opaque handle for an image supplied by the host.
///
/// The handle is never decoded or fetched. Renderers pass it through an
/// [`ImageResolver`](crate::render::ImageResolver) and emit the resulting
/// token as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

impl From<String> for ImageRef {
    fn from(handle: String) -> Self {
        Self(handle)
    }
}

/// Default gaussian blur deviation, in pixels.
pub const DEFAULT_SHADOW_BLUR: u32 = 7;

/// Default shadow opacity.
pub const DEFAULT_SHADOW_OPACITY: f32 = 0.6;

/// A drop shadow cast by the styled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    x: u32,
    y: u32,
    blur: u32,
    opacity: f32,
}

impl DropShadow {
    /// Creates a shadow offset by `(x, y)` pixels with the default blur
    /// and opacity.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidDimension`] when an offset is negative or does
    /// not fit in `u32`.
    pub fn new(x: i64, y: i64) -> Result<Self, EngineError> {
        Ok(Self {
            x: pixels("shadow x offset", x)?,
            y: pixels("shadow y offset", y)?,
            blur: DEFAULT_SHADOW_BLUR,
            opacity: DEFAULT_SHADOW_OPACITY,
        })
    }

    pub fn with_blur(mut self, blur: i64) -> Result<Self, EngineError> {
        self.blur = pixels("shadow blur", blur)?;
        Ok(self)
    }

    /// Sets the opacity, which must lie in `0..=1`.
    pub fn with_opacity(mut self, opacity: f32) -> Result<Self, EngineError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(EngineError::InvalidDimension {
                attribute: "shadow opacity",
                value: opacity.to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }
        self.opacity = opacity + 0.0;
        Ok(self)
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    pub fn blur(&self) -> u32 {
        self.blur
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Space the shadow needs beyond the shape on each axis.
    ///
    /// A gaussian blur is visible up to three deviations out, plus one pixel
    /// for antialiasing.
    pub fn clearance(&self) -> (u32, u32) {
        let spread = self.blur.saturating_mul(3).saturating_add(1);
        (
            self.x.saturating_add(spread),
            self.y.saturating_add(spread),
        )
    }
}

/// Validates a signed pixel count.
pub(crate) fn pixels(attribute: &'static str, value: i64) -> Result<u32, EngineError> {
    if value < 0 {
        return Err(EngineError::InvalidDimension {
            attribute,
            value: value.to_string(),
            reason: "must not be negative".to_string(),
        });
    }
    u32::try_from(value).map_err(|_| EngineError::InvalidDimension {
        attribute,
        value: value.to_string(),
        reason: format!("must not exceed {}", u32::MAX),
    })
}

/// A bundle of optional visual attributes.
///
/// Every attribute is independent. An attribute left unset is omitted from
/// rendered output entirely; there are no defaults standing in for it.
///
/// # Example
///
/// ```rust
/// use footlights::{Color, Style};
///
/// let style = Style::new()
///     .with_color(Color::solid("navy").unwrap())
///     .with_corner_radius(12)
///     .unwrap();
///
/// assert_eq!(style.corner_radius(), Some(12));
/// assert!(style.image().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    color: Option<Color>,
    image: Option<ImageRef>,
    corner_radius: Option<u32>,
    shadow: Option<DropShadow>,
}

impl Style {
    /// Creates a style with every attribute unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = Some(color.into());
    }

    pub fn set_image(&mut self, image: impl Into<ImageRef>) {
        self.image = Some(image.into());
    }

    /// Sets the corner radius in pixels.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidDimension`] when `px` is negative or larger
    /// than `u32::MAX`. The style is left unchanged.
    pub fn set_corner_radius(&mut self, px: i64) -> Result<(), EngineError> {
        self.corner_radius = Some(pixels("corner radius", px)?);
        Ok(())
    }

    pub fn set_shadow(&mut self, shadow: DropShadow) {
        self.shadow = Some(shadow);
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_image(mut self, image: impl Into<ImageRef>) -> Self {
        self.set_image(image);
        self
    }

    pub fn with_corner_radius(mut self, px: i64) -> Result<Self, EngineError> {
        self.set_corner_radius(px)?;
        Ok(self)
    }

    pub fn with_shadow(mut self, shadow: DropShadow) -> Self {
        self.set_shadow(shadow);
        self
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn corner_radius(&self) -> Option<u32> {
        self.corner_radius
    }

    pub fn shadow(&self) -> Option<&DropShadow> {
        self.shadow.as_ref()
    }

    /// True when no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.image.is_none()
            && self.corner_radius.is_none()
            && self.shadow.is_none()
    }
}
