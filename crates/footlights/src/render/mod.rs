//! Rendering a style registry into SVG markup or a CSS stylesheet.
//!
//! Rendering is a pure read of a [`Styles`] snapshot. Every style becomes
//! one fragment, emitted in registration order; attributes a style leaves
//! unset produce nothing at all.
//!
//! # Formats
//!
//! - [`OutputFormat::Svg`] (default): an `<svg>` document with one `<g>` per
//!   style. Gradients, rounding clips and shadow filters live in the group's
//!   `<defs>`, followed by the shapes that use them.
//! - [`OutputFormat::Css`]: one `.name { ... }` rule per style.
//!
//! # Image references
//!
//! Image handles go through an [`ImageResolver`]. A handle that resolves to
//! nothing, or to a token that is not [emittable](is_emittable), is handled
//! according to [`ReferencePolicy`]:
//!
//! | Policy | Effect |
//! |--------|--------|
//! | `Strict` (default) | render fails with `UnresolvedReference` |
//! | `Permissive` | the image attribute is omitted and a warning is logged |
//!
//! The policy is a renderer setting and applies to every style alike.
//!
//! # Determinism
//!
//! Output depends only on registry content and order plus the
//! [`RenderOptions`]. Numbers are written in their shortest form (`35`, not
//! `35.0`).

mod css;
mod renderer;
mod resolve;
mod svg;

pub use renderer::Renderer;
pub use resolve::{is_emittable, AssetMap, ImageResolver, Verbatim};

use serde::Deserialize;

use crate::error::EngineError;
use crate::style::Styles;

/// Serialization target of a render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Svg,
    Css,
}

impl OutputFormat {
    /// Usual file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Css => "css",
        }
    }

    /// Format matching a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.eq_ignore_ascii_case("svg") {
            Some(OutputFormat::Svg)
        } else if extension.eq_ignore_ascii_case("css") {
            Some(OutputFormat::Css)
        } else {
            None
        }
    }
}

/// How unresolved image references are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Fail the render, naming the style and the reference.
    #[default]
    Strict,
    /// Omit the image attribute from that style and log a warning.
    Permissive,
}

/// Default canvas edge, in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 512;

/// Drawing area of an SVG render, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
    }
}

/// Renderer configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub canvas: Canvas,
    pub policy: ReferencePolicy,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn policy(mut self, policy: ReferencePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Renders `styles` with default options: strict SVG on a 512×512 canvas,
/// image handles used verbatim.
pub fn render(styles: &Styles) -> Result<String, EngineError> {
    Renderer::new(RenderOptions::default()).render(styles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::from_extension("CSS"), Some(OutputFormat::Css));
        assert_eq!(OutputFormat::from_extension("svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_extension("png"), None);
        assert_eq!(OutputFormat::Css.extension(), "css");
    }

    #[test]
    fn test_render_options_default() {
        let options = RenderOptions::default();
        assert_eq!(options.format, OutputFormat::Svg);
        assert_eq!(options.policy, ReferencePolicy::Strict);
        assert_eq!(options.canvas, Canvas::new(512, 512));
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .format(OutputFormat::Css)
            .policy(ReferencePolicy::Permissive)
            .canvas(Canvas::new(10, 20));
        assert_eq!(options.format, OutputFormat::Css);
        assert_eq!(options.policy, ReferencePolicy::Permissive);
        assert_eq!(options.canvas.height, 20);
    }

    #[test]
    fn test_render_empty_registry() {
        let output = render(&Styles::new()).unwrap();
        assert!(output.starts_with("<svg"));
        assert!(!output.contains("<g"));
    }
}
