//! The engine: a style registry paired with a renderer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::debug;

use crate::error::EngineError;
use crate::render::{RenderOptions, Renderer};
use crate::style::{check_style_name, Style, StyleSheet, StyleSpec, Styles};

/// One rendering context.
///
/// Owns an ordered registry of named styles and the renderer that
/// serializes it. Engines share nothing; create one per independent output.
///
/// # Example
///
/// ```rust
/// use footlights::{Color, Engine, Style};
///
/// let mut engine = Engine::new();
/// engine.add_style(
///     "bg",
///     Style::new().with_color(
///         Color::linear([("hsl(240 46% 65%)", 0.0), ("hsl(56 37% 89%)", 100.0)], 35.0).unwrap(),
///     ),
/// );
/// engine.add_style("img", Style::new().with_image("logo").with_corner_radius(20).unwrap());
///
/// let svg = engine.render().unwrap();
/// assert!(svg.find(r#"data-style="bg""#).unwrap() < svg.find(r#"data-style="img""#).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Engine {
    styles: Styles,
    renderer: Renderer,
}

impl Engine {
    /// Creates an engine with an empty registry and default render options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self::with_renderer(Renderer::new(options))
    }

    pub fn with_renderer(renderer: Renderer) -> Self {
        Self {
            styles: Styles::new(),
            renderer,
        }
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Registers `style` under `name`.
    ///
    /// An existing entry is replaced in place and returned; it keeps its
    /// render position. Names are checked when rendering (see
    /// [`check_style_name`]); [`Engine::define_style`] checks them up front.
    pub fn add_style(&mut self, name: impl Into<String>, style: Style) -> Option<Style> {
        let name = name.into();
        let replaced = self.styles.insert(name.clone(), style);
        if replaced.is_some() {
            debug!("replaced style '{}'", name);
        } else {
            debug!("added style '{}'", name);
        }
        replaced
    }

    /// Validates a plain-data style description and registers the result.
    ///
    /// Errors are wrapped in [`EngineError::InStyle`] naming the style; the
    /// registry is untouched on failure.
    pub fn define_style(&mut self, name: impl Into<String>, spec: StyleSpec) -> Result<(), EngineError> {
        let name = name.into();
        check_style_name(&name)?;
        let style = spec.into_style().map_err(|e| e.in_style(name.as_str()))?;
        self.add_style(name, style);
        Ok(())
    }

    /// Defines every style of `sheet` in document order and applies its
    /// canvas, if any.
    ///
    /// All specs are validated before anything is registered, so a failing
    /// sheet leaves the engine unchanged. Returns the number of styles
    /// defined.
    pub fn load_sheet(&mut self, sheet: StyleSheet) -> Result<usize, EngineError> {
        let canvas = sheet.canvas;
        let styles = sheet
            .into_styles()
            .into_iter()
            .map(|(name, spec)| {
                check_style_name(&name)?;
                match spec.into_style() {
                    Ok(style) => Ok((name, style)),
                    Err(e) => Err(e.in_style(name)),
                }
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        if let Some(canvas) = canvas {
            let options = self.renderer.options().canvas(canvas);
            self.renderer.set_options(options);
        }
        let count = styles.len();
        for (name, style) in styles {
            self.add_style(name, style);
        }
        debug!("loaded {} style(s) from sheet", count);
        Ok(count)
    }

    /// Removes `name` if present. Absence is not an error.
    pub fn remove_style(&mut self, name: &str) -> Option<Style> {
        let removed = self.styles.remove(name);
        if removed.is_some() {
            debug!("removed style '{}'", name);
        }
        removed
    }

    pub fn get_style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.names()
    }

    /// Renders the registry. See [`Renderer::render`].
    pub fn render(&self) -> Result<String, EngineError> {
        self.renderer.render(&self.styles)
    }
}

/// An [`Engine`] behind a single lock, for embedding across threads.
///
/// Mutations and renders take the same lock, so a render never sees a
/// half-applied update. A poisoned lock is recovered: every mutation is a
/// single registry operation and leaves the engine consistent.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_style(&self, name: impl Into<String>, style: Style) -> Option<Style> {
        self.lock().add_style(name, style)
    }

    pub fn define_style(&self, name: impl Into<String>, spec: StyleSpec) -> Result<(), EngineError> {
        self.lock().define_style(name, spec)
    }

    pub fn load_sheet(&self, sheet: StyleSheet) -> Result<usize, EngineError> {
        self.lock().load_sheet(sheet)
    }

    pub fn remove_style(&self, name: &str) -> Option<Style> {
        self.lock().remove_style(name)
    }

    /// Returns a copy of the style under `name`.
    pub fn get_style(&self, name: &str) -> Option<Style> {
        self.lock().get_style(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn render(&self) -> Result<String, EngineError> {
        self.lock().render()
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        f(&mut *self.lock())
    }
}
