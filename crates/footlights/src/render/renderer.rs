//! Configured renderer.

use std::fmt;
use std::sync::Arc;

use log::debug;
use minijinja::Environment;

use super::css::{environment, write_css};
use super::resolve::resolve_fragments;
use super::svg::write_svg;
use super::{ImageResolver, OutputFormat, RenderOptions, Verbatim};
use crate::error::EngineError;
use crate::style::Styles;

/// Turns a [`Styles`] snapshot into SVG or CSS text.
///
/// The renderer keeps its options and image resolver between calls but holds
/// no registry state; every [`render`](Renderer::render) borrows the
/// registry only for its own duration.
///
/// # Example
///
/// ```rust
/// use footlights::{AssetMap, OutputFormat, RenderOptions, Renderer, Style, Styles};
///
/// let styles = Styles::new().add("img", Style::new().with_image("logo"));
/// let renderer = Renderer::new(RenderOptions::new().format(OutputFormat::Css))
///     .with_resolver(AssetMap::new().with("logo", "/static/logo.png"));
///
/// let css = renderer.render(&styles).unwrap();
/// assert!(css.contains("url(\"/static/logo.png\")"));
/// ```
#[derive(Clone)]
pub struct Renderer {
    env: Environment<'static>,
    options: RenderOptions,
    resolver: Arc<dyn ImageResolver>,
}

impl Renderer {
    /// Creates a renderer that uses image handles verbatim.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            env: environment(),
            options,
            resolver: Arc::new(Verbatim),
        }
    }

    /// Replaces the image resolver.
    pub fn with_resolver(mut self, resolver: impl ImageResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// Renders every style in registration order.
    ///
    /// # Errors
    ///
    /// - [`EngineError::UnresolvedReference`] for an image that cannot be
    ///   resolved under the strict policy
    /// - [`EngineError::Template`] or [`EngineError::Markup`] if serialization
    ///   fails
    pub fn render(&self, styles: &Styles) -> Result<String, EngineError> {
        debug!(
            "rendering {} style(s) as {:?}",
            styles.len(),
            self.options.format
        );
        let fragments = resolve_fragments(
            styles,
            self.resolver.as_ref(),
            self.options.policy,
            self.options.canvas,
        )?;
        match self.options.format {
            OutputFormat::Svg => write_svg(&fragments, self.options.canvas),
            OutputFormat::Css => write_css(&self.env, &fragments),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::color::Color;
    use crate::style::{DropShadow, Style};
    use proptest::prelude::*;

    const NAMES: [&str; 5] = ["bg", "x", "x-fill", "my bg", "a\"b"];

    fn color_strategy() -> impl Strategy<Value = Color> {
        prop_oneof![
            prop::sample::select(vec!["red", "#336699", "rgb(1, 2, 3)", "hsl(240 46% 65%)"])
                .prop_map(|text| Color::solid(text).unwrap()),
            (prop::collection::vec(0u8..=100, 1..5), -720.0f32..720.0).prop_map(
                |(mut positions, angle)| {
                    positions.sort_unstable();
                    let stops: Vec<(&str, f32)> =
                        positions.iter().map(|&p| ("navy", f32::from(p))).collect();
                    Color::linear(stops, angle).unwrap()
                }
            ),
        ]
    }

    fn style_strategy() -> impl Strategy<Value = Style> {
        (
            prop::option::of(color_strategy()),
            prop::option::of(prop::sample::select(vec!["logo", "assets/a.png"])),
            prop::option::of(0i64..50),
            prop::option::of((0i64..10, 0i64..10, 0i64..8)),
        )
            .prop_map(|(color, image, radius, shadow)| {
                let mut style = Style::new();
                if let Some(color) = color {
                    style.set_color(color);
                }
                if let Some(image) = image {
                    style.set_image(image);
                }
                if let Some(px) = radius {
                    style.set_corner_radius(px).unwrap();
                }
                if let Some((x, y, blur)) = shadow {
                    style.set_shadow(DropShadow::new(x, y).unwrap().with_blur(blur).unwrap());
                }
                style
            })
    }

    /// `None` removes the name, `Some` inserts or replaces it.
    fn build(ops: &[(usize, Option<Style>)]) -> Styles {
        let mut styles = Styles::new();
        for (key, style) in ops {
            let name = NAMES[*key];
            match style {
                Some(style) => {
                    styles.insert(name, style.clone());
                }
                None => {
                    styles.remove(name);
                }
            }
        }
        styles
    }

    proptest! {
        #[test]
        fn render_is_deterministic(
            ops in prop::collection::vec(
                (0usize..NAMES.len(), prop::option::of(style_strategy())),
                0..20,
            ),
        ) {
            let first = build(&ops);
            let second = build(&ops);
            prop_assert_eq!(&first, &second);

            for format in [OutputFormat::Svg, OutputFormat::Css] {
                let renderer = Renderer::new(RenderOptions::new().format(format));
                let once = renderer.render(&first).unwrap();
                let again = renderer.render(&first).unwrap();
                let other = renderer.render(&second).unwrap();
                prop_assert_eq!(&once, &again);
                prop_assert_eq!(&once, &other);
            }
        }
    }
}
