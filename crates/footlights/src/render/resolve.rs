//! Image resolution and layout: turning registry entries into fragments.
//!
//! Both output formats share this step. Each style becomes a [`Fragment`]
//! holding borrowed attributes, the resolved image token (if any) and the
//! content box it occupies on the canvas.

use std::collections::HashMap;
use std::fmt;

use log::warn;

use super::{Canvas, ReferencePolicy};
use crate::color::Color;
use crate::error::EngineError;
use crate::style::{check_style_name, DropShadow, ImageRef, Style, Styles};

/// Maps an opaque image handle to the token written into the output.
///
/// Returning `None` means the handle is unknown. Whether that fails the
/// render or drops the image is decided by the [`ReferencePolicy`].
pub trait ImageResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, image: &ImageRef) -> Option<String>;
}

/// Uses every handle as its own token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl ImageResolver for Verbatim {
    fn resolve(&self, image: &ImageRef) -> Option<String> {
        Some(image.as_str().to_string())
    }
}

/// Resolves only handles registered up front, such as imported asset names
/// bound to URLs or data URIs.
///
/// ```rust
/// use footlights::{AssetMap, ImageRef, ImageResolver};
///
/// let assets = AssetMap::new().with("logo", "assets/logo.png");
/// assert_eq!(assets.resolve(&ImageRef::new("logo")).as_deref(), Some("assets/logo.png"));
/// assert_eq!(assets.resolve(&ImageRef::new("other")), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetMap {
    tokens: HashMap<String, String>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handle` to `token`, replacing any earlier binding.
    pub fn insert(&mut self, handle: impl Into<String>, token: impl Into<String>) {
        self.tokens.insert(handle.into(), token.into());
    }

    pub fn with(mut self, handle: impl Into<String>, token: impl Into<String>) -> Self {
        self.insert(handle, token);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl ImageResolver for AssetMap {
    fn resolve(&self, image: &ImageRef) -> Option<String> {
        self.tokens.get(image.as_str()).cloned()
    }
}

/// True when `token` can be written into an attribute or `url()` unchanged.
///
/// Tokens must be non-empty and free of whitespace, control characters,
/// quotes, angle brackets, ampersands and backslashes.
pub fn is_emittable(token: &str) -> bool {
    !token.is_empty()
        && !token.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '&' | '\\')
        })
}

/// Area a style occupies on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// The canvas minus the shadow clearance on every side.
    pub fn content_box(canvas: Canvas, shadow: Option<&DropShadow>) -> Self {
        let (clear_x, clear_y) = shadow.map(DropShadow::clearance).unwrap_or((0, 0));
        Self {
            x: clear_x,
            y: clear_y,
            width: canvas.width.saturating_sub(clear_x.saturating_mul(2)),
            height: canvas.height.saturating_sub(clear_y.saturating_mul(2)),
        }
    }
}

/// One style, resolved and laid out.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fragment<'a> {
    pub name: &'a str,
    /// Document-unique prefix for element ids.
    pub id: String,
    pub color: Option<&'a Color>,
    pub image: Option<String>,
    pub corner_radius: Option<u32>,
    pub shadow: Option<&'a DropShadow>,
    pub bounds: Bounds,
}

/// Resolves every style in registration order.
pub(crate) fn resolve_fragments<'a>(
    styles: &'a Styles,
    resolver: &dyn ImageResolver,
    policy: ReferencePolicy,
    canvas: Canvas,
) -> Result<Vec<Fragment<'a>>, EngineError> {
    styles
        .iter()
        .enumerate()
        .map(|(index, (name, style))| {
            resolve_fragment(index, name, style, resolver, policy, canvas)
        })
        .collect()
}

/// `s{index}-{name}`, with every character outside `[A-Za-z0-9_.-]` replaced
/// by `_`. The index comes before the first `-`, so ids never collide.
pub(crate) fn element_id(index: usize, name: &str) -> String {
    let mut id = format!("s{}-", index);
    id.extend(name.chars().map(|c| {
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
            c
        } else {
            '_'
        }
    }));
    id
}

fn resolve_fragment<'a>(
    index: usize,
    name: &'a str,
    style: &'a Style,
    resolver: &dyn ImageResolver,
    policy: ReferencePolicy,
    canvas: Canvas,
) -> Result<Fragment<'a>, EngineError> {
    check_style_name(name)?;
    let image = match style.image() {
        None => None,
        Some(image) => match resolver.resolve(image).filter(|token| is_emittable(token)) {
            Some(token) => Some(token),
            None if policy == ReferencePolicy::Permissive => {
                warn!(
                    "style '{}': dropping unresolved image reference '{}'",
                    name, image
                );
                None
            }
            None => {
                return Err(EngineError::UnresolvedReference {
                    style: name.to_string(),
                    reference: image.as_str().to_string(),
                })
            }
        },
    };

    Ok(Fragment {
        name,
        id: element_id(index, name),
        color: style.color(),
        image,
        corner_radius: style.corner_radius(),
        shadow: style.shadow(),
        bounds: Bounds::content_box(canvas, style.shadow()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_emittable() {
        assert!(is_emittable("logo"));
        assert!(is_emittable("assets/logo.png"));
        assert!(is_emittable("data:image/png;base64,iVBORw0KGgo="));
        assert!(!is_emittable(""));
        assert!(!is_emittable("two words"));
        assert!(!is_emittable("a\"b"));
        assert!(!is_emittable("<script>"));
        assert!(!is_emittable("a&b"));
        assert!(!is_emittable("line\nbreak"));
        assert!(!is_emittable("back\\slash"));
    }

    #[test]
    fn test_element_id() {
        assert_eq!(element_id(0, "bg"), "s0-bg");
        assert_eq!(element_id(3, "my bg"), "s3-my_bg");
        assert_eq!(element_id(1, "a#b\"c"), "s1-a_b_c");
        assert_ne!(element_id(0, "x-fill"), format!("{}-fill", element_id(1, "x")));
    }

    #[test]
    fn test_empty_name_fails_render() {
        let styles = Styles::new().add("", Style::new().with_corner_radius(2).unwrap());
        let err = resolve_fragments(&styles, &Verbatim, ReferencePolicy::Permissive, Canvas::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidStyleName { .. }));
    }

    #[test]
    fn test_verbatim_resolves_everything() {
        assert_eq!(Verbatim.resolve(&ImageRef::new("x y")).as_deref(), Some("x y"));
    }

    #[test]
    fn test_content_box_without_shadow() {
        let bounds = Bounds::content_box(Canvas::new(100, 50), None);
        assert_eq!(
            bounds,
            Bounds {
                x: 0,
                y: 0,
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn test_content_box_with_shadow() {
        let shadow = DropShadow::new(5, 5).unwrap().with_blur(3).unwrap();
        let bounds = Bounds::content_box(Canvas::new(100, 100), Some(&shadow));
        assert_eq!(
            bounds,
            Bounds {
                x: 15,
                y: 15,
                width: 70,
                height: 70
            }
        );
    }

    #[test]
    fn test_content_box_saturates() {
        let shadow = DropShadow::new(40, 0).unwrap();
        let bounds = Bounds::content_box(Canvas::new(20, 20), Some(&shadow));
        assert_eq!(bounds.width, 0);
        assert_eq!(bounds.height, 0);
    }

    #[test]
    fn test_strict_policy_fails_on_unemittable_handle() {
        let styles = Styles::new().add("img", Style::new().with_image("has space"));
        let err = resolve_fragments(&styles, &Verbatim, ReferencePolicy::Strict, Canvas::default())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::UnresolvedReference {
                style: "img".to_string(),
                reference: "has space".to_string(),
            }
        );
    }

    #[test]
    fn test_permissive_policy_drops_only_image() {
        let styles = Styles::new().add(
            "img",
            Style::new().with_image("unknown").with_corner_radius(4).unwrap(),
        );
        let fragments = resolve_fragments(
            &styles,
            &AssetMap::new(),
            ReferencePolicy::Permissive,
            Canvas::default(),
        )
        .unwrap();
        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].image.is_none());
        assert_eq!(fragments[0].corner_radius, Some(4));
    }

    #[test]
    fn test_asset_map_token_is_used() {
        let styles = Styles::new().add("img", Style::new().with_image("logo"));
        let assets = AssetMap::new().with("logo", "https://cdn.example/logo.png");
        let fragments =
            resolve_fragments(&styles, &assets, ReferencePolicy::Strict, Canvas::default()).unwrap();
        assert_eq!(fragments[0].image.as_deref(), Some("https://cdn.example/logo.png"));
    }
}
