//! CSS output through the `stylesheet.css` template.
//!
//! Declarations are computed here; the template only lays them out.

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

use super::resolve::Fragment;
use crate::color::{Color, LinearGradient};
use crate::error::EngineError;
use crate::style::DropShadow;

pub(crate) const TEMPLATE_NAME: &str = "stylesheet.css";

const TEMPLATE_SOURCE: &str = include_str!("../../templates/stylesheet.css.tmpl");

#[derive(Debug, Serialize)]
struct Rule {
    selector: String,
    declarations: Vec<Declaration>,
}

#[derive(Debug, Serialize)]
struct Declaration {
    property: &'static str,
    value: String,
}

impl Declaration {
    fn new(property: &'static str, value: impl Into<String>) -> Self {
        Self {
            property,
            value: value.into(),
        }
    }
}

/// Builds the template environment. The stylesheet template is loaded on
/// first use.
pub(crate) fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_loader(|name| Ok((name == TEMPLATE_NAME).then(|| TEMPLATE_SOURCE.to_string())));
    env
}

pub(crate) fn write_css(env: &Environment<'static>, fragments: &[Fragment<'_>]) -> Result<String, EngineError> {
    let rules = fragments.iter().map(rule).collect::<Result<Vec<_>, _>>()?;
    let template = env.get_template(TEMPLATE_NAME)?;
    Ok(template.render(context! { rules => rules })?)
}

fn rule(fragment: &Fragment<'_>) -> Result<Rule, EngineError> {
    let mut declarations = Vec::new();
    let mut layers = Vec::new();

    if let Some(token) = &fragment.image {
        layers.push(format!("url(\"{}\")", token));
    }
    match fragment.color {
        Some(Color::Solid(value)) => {
            declarations.push(Declaration::new("background-color", value.as_str()));
        }
        Some(Color::Linear(gradient)) => layers.push(linear_gradient(gradient)),
        None => {}
    }
    if !layers.is_empty() {
        declarations.push(Declaration::new("background-image", layers.join(", ")));
    }
    if fragment.image.is_some() {
        declarations.push(Declaration::new("background-size", "cover"));
    }
    if let Some(radius) = fragment.corner_radius {
        declarations.push(Declaration::new("border-radius", format!("{}px", radius)));
    }
    if let Some(shadow) = fragment.shadow {
        declarations.push(Declaration::new("filter", drop_shadow(shadow)));
    }

    Ok(Rule {
        selector: selector(fragment.name)?,
        declarations,
    })
}

/// CSS measures gradient angles from "to top"; stored angles rotate the
/// left-to-right axis, so they are a quarter turn behind.
fn linear_gradient(gradient: &LinearGradient) -> String {
    let angle = (gradient.angle() + 90.0).rem_euclid(360.0);
    let stops: Vec<String> = gradient
        .stops()
        .iter()
        .map(|stop| format!("{} {}", stop.color, stop.position))
        .collect();
    format!("linear-gradient({}deg, {})", angle, stops.join(", "))
}

/// CSS blur radius is twice the gaussian deviation.
fn drop_shadow(shadow: &DropShadow) -> String {
    format!(
        "drop-shadow({}px {}px {}px rgba(0, 0, 0, {}))",
        shadow.x(),
        shadow.y(),
        u64::from(shadow.blur()) * 2,
        shadow.opacity()
    )
}

fn selector(name: &str) -> Result<String, EngineError> {
    let mut selector = String::from(".");
    cssparser::serialize_identifier(name, &mut selector).map_err(|e| EngineError::Markup {
        message: e.to_string(),
    })?;
    Ok(selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::resolve::resolve_fragments;
    use crate::render::{Canvas, ReferencePolicy, Verbatim};
    use crate::style::{Style, Styles};

    fn css(styles: &Styles) -> String {
        let fragments =
            resolve_fragments(styles, &Verbatim, ReferencePolicy::Strict, Canvas::default())
                .unwrap();
        write_css(&environment(), &fragments).unwrap()
    }

    #[test]
    fn test_css_solid_and_radius() {
        let styles = Styles::new().add(
            "card",
            Style::new()
                .with_color(Color::solid("RGB(1,2,3)").unwrap())
                .with_corner_radius(8)
                .unwrap(),
        );
        assert_eq!(
            css(&styles),
            ".card {\n  background-color: rgb(1, 2, 3);\n  border-radius: 8px;\n}\n"
        );
    }

    #[test]
    fn test_css_gradient_under_image() {
        let color = Color::linear([("red", 0.0), ("blue", 100.0)], 35.0).unwrap();
        let styles = Styles::new().add("hero", Style::new().with_color(color).with_image("logo"));
        assert_eq!(
            css(&styles),
            concat!(
                ".hero {\n",
                "  background-image: url(\"logo\"), linear-gradient(125deg, red 0%, blue 100%);\n",
                "  background-size: cover;\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_css_angle_wraps() {
        let color = Color::linear([("red", 0.0)], 300.0).unwrap();
        let styles = Styles::new().add("a", Style::new().with_color(color));
        assert!(css(&styles).contains("linear-gradient(30deg, red 0%)"));
    }

    #[test]
    fn test_css_shadow() {
        let shadow = DropShadow::new(5, 4).unwrap().with_blur(3).unwrap();
        let styles = Styles::new().add("s", Style::new().with_shadow(shadow));
        assert!(css(&styles).contains("  filter: drop-shadow(5px 4px 6px rgba(0, 0, 0, 0.6));\n"));
    }

    #[test]
    fn test_css_radius_only() {
        let styles = Styles::new().add("r", Style::new().with_corner_radius(20).unwrap());
        assert_eq!(css(&styles), ".r {\n  border-radius: 20px;\n}\n");
    }

    #[test]
    fn test_css_selector_escaping() {
        assert_eq!(selector("plain-name").unwrap(), ".plain-name");
        assert_eq!(selector("2col").unwrap(), ".\\32 col");
        assert_eq!(selector("a b").unwrap(), ".a\\ b");
    }

    #[test]
    fn test_css_empty_registry() {
        assert_eq!(css(&Styles::new()), "");
    }
}
