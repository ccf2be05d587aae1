//! Named style registry with deterministic SVG and CSS rendering.
//!
//! Footlights keeps an ordered set of named [`Style`]s (solid colors, linear
//! gradients, image fills, corner rounding and drop shadows) and serializes
//! them into a single string: SVG markup by default, or a CSS stylesheet.
//!
//! # Pipeline
//!
//! ```text
//! color text ──► Color ──► Style ──► Styles (Engine) ──► Renderer ──► String
//! ```
//!
//! - [`parse_color`] validates color text against the CSS color grammar
//! - [`Style`] bundles optional attributes; unset ones never reach the output
//! - [`Engine`] owns the registry: [`Engine::add_style`] replaces in place,
//!   keeping render order stable
//! - [`Renderer`] resolves image handles and writes the output
//!
//! # Example
//!
//! ```rust
//! use footlights::{Color, Engine, Style};
//!
//! let mut engine = Engine::new();
//! engine.add_style("bg", Style::new().with_color(Color::solid("#1e1e2e")?));
//! engine.add_style("logo", Style::new().with_image("logo").with_corner_radius(20)?);
//!
//! let svg = engine.render()?;
//! assert!(svg.contains(r##"fill="#1e1e2e""##));
//! assert!(svg.contains(r#"rx="20""#));
//! # Ok::<(), footlights::EngineError>(())
//! ```
//!
//! # Stylesheets
//!
//! Styles can also be described as plain data and loaded from YAML or JSON,
//! see [`StyleSheet`].
//!
//! Rendering is deterministic: the same registry content and order always
//! yields the same bytes.

pub mod color;
mod engine;
mod error;
pub mod render;
pub mod style;

pub use color::{
    normalize_angle, parse_color, Color, ColorNotation, ColorStop, ColorValue, LinearGradient,
    StopPosition,
};
pub use engine::{Engine, SharedEngine};
pub use error::EngineError;
pub use render::{
    is_emittable, render, AssetMap, Canvas, ImageResolver, OutputFormat, ReferencePolicy,
    RenderOptions, Renderer, Verbatim,
};
pub use style::{
    check_style_name, ColorSpec, DropShadow, GradientSpec, ImageRef, PositionSpec, ShadowSpec, StopSpec, Style,
    StyleSheet, StyleSpec, Styles,
};
