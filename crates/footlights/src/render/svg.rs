//! SVG output.
//!
//! Each fragment becomes a group:
//!
//! ```text
//! <g id="s0-name" data-style="name">
//!   <defs>                      only when something below needs it
//!     <linearGradient id="s0-name-fill" .../>
//!     <clipPath id="s0-name-clip"><rect rx=.../></clipPath>
//!     <filter id="s0-name-shadow"><feDropShadow .../></filter>
//!   </defs>
//!   <rect filter=.../>          shadow caster
//!   <rect fill=.../>            color
//!   <image href=.../>           image, scaled to fill
//! </g>
//! ```
//!
//! Ids are prefixed with the registry position and carry only
//! `[A-Za-z0-9_.-]`, so `url(#...)` references stay valid and unique for any
//! style name. The name itself is kept verbatim in `data-style`.
//!
//! A style with only a corner radius emits the clip path and nothing else.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use super::resolve::{Bounds, Fragment};
use super::Canvas;
use crate::color::{Color, LinearGradient};
use crate::error::EngineError;
use crate::style::DropShadow;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

pub(crate) fn write_svg(fragments: &[Fragment<'_>], canvas: Canvas) -> Result<String, EngineError> {
    let mut svg = SvgWriter::new();

    let width = canvas.width.to_string();
    let height = canvas.height.to_string();
    let view_box = format!("0 0 {} {}", canvas.width, canvas.height);
    svg.start(
        "svg",
        &[
            ("xmlns", SVG_NAMESPACE),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("viewBox", view_box.as_str()),
        ],
    )?;
    for fragment in fragments {
        write_group(&mut svg, fragment)?;
    }
    svg.end("svg")?;

    svg.finish()
}

fn write_group(svg: &mut SvgWriter, fragment: &Fragment<'_>) -> Result<(), EngineError> {
    let id = fragment.id.as_str();
    let fill_id = format!("{}-fill", id);
    let clip_id = format!("{}-clip", id);
    let shadow_id = format!("{}-shadow", id);
    let gradient = match fragment.color {
        Some(Color::Linear(gradient)) => Some(gradient),
        _ => None,
    };

    svg.start("g", &[("id", id), ("data-style", fragment.name)])?;

    if gradient.is_some() || fragment.corner_radius.is_some() || fragment.shadow.is_some() {
        svg.start("defs", &[])?;
        if let Some(gradient) = gradient {
            write_gradient(svg, &fill_id, gradient)?;
        }
        if let Some(radius) = fragment.corner_radius {
            svg.start("clipPath", &[("id", clip_id.as_str())])?;
            svg.rect(fragment.bounds, &[("rx", radius.to_string().as_str())])?;
            svg.end("clipPath")?;
        }
        if let Some(shadow) = fragment.shadow {
            write_shadow_filter(svg, &shadow_id, shadow)?;
        }
        svg.end("defs")?;
    }

    let clip_ref = format!("url(#{})", clip_id);
    let clip: Option<(&str, &str)> = fragment
        .corner_radius
        .map(|_| ("clip-path", clip_ref.as_str()));

    if fragment.shadow.is_some() {
        let filter_ref = format!("url(#{})", shadow_id);
        let radius = fragment.corner_radius.map(|r| r.to_string());
        let mut attrs = vec![("filter", filter_ref.as_str())];
        if let Some(radius) = &radius {
            attrs.push(("rx", radius.as_str()));
        }
        svg.rect(fragment.bounds, &attrs)?;
    }

    if let Some(color) = fragment.color {
        let fill = match color {
            Color::Solid(value) => value.as_str().to_string(),
            Color::Linear(_) => format!("url(#{})", fill_id),
        };
        let mut attrs = vec![("fill", fill.as_str())];
        attrs.extend(clip);
        svg.rect(fragment.bounds, &attrs)?;
    }

    if let Some(token) = &fragment.image {
        let mut attrs = vec![("href", token.as_str())];
        attrs.extend(clip);
        attrs.push(("preserveAspectRatio", "xMidYMid slice"));
        svg.empty_in(fragment.bounds, "image", &attrs)?;
    }

    svg.end("g")
}

fn write_gradient(svg: &mut SvgWriter, id: &str, gradient: &LinearGradient) -> Result<(), EngineError> {
    let transform = format!("rotate({} 0.5 0.5)", gradient.angle());
    svg.start(
        "linearGradient",
        &[("id", id), ("gradientTransform", transform.as_str())],
    )?;
    for stop in gradient.stops() {
        let offset = stop.position.to_string();
        svg.empty(
            "stop",
            &[("offset", offset.as_str()), ("stop-color", stop.color.as_str())],
        )?;
    }
    svg.end("linearGradient")
}

fn write_shadow_filter(svg: &mut SvgWriter, id: &str, shadow: &DropShadow) -> Result<(), EngineError> {
    let dx = shadow.x().to_string();
    let dy = shadow.y().to_string();
    let deviation = shadow.blur().to_string();
    let opacity = shadow.opacity().to_string();
    svg.start("filter", &[("id", id)])?;
    svg.empty(
        "feDropShadow",
        &[
            ("dx", dx.as_str()),
            ("dy", dy.as_str()),
            ("stdDeviation", deviation.as_str()),
            ("flood-opacity", opacity.as_str()),
        ],
    )?;
    svg.end("filter")
}

/// Thin wrapper over the quick-xml writer that maps its errors.
struct SvgWriter {
    writer: Writer<Vec<u8>>,
}

impl SvgWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), EngineError> {
        self.writer
            .write_event(event)
            .map_err(|e| EngineError::Markup {
                message: e.to_string(),
            })
    }

    fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), EngineError> {
        self.write(Event::Start(element(tag, attrs)))
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), EngineError> {
        self.write(Event::Empty(element(tag, attrs)))
    }

    /// An empty element placed at `bounds`, followed by `attrs`.
    fn empty_in(&mut self, bounds: Bounds, tag: &str, attrs: &[(&str, &str)]) -> Result<(), EngineError> {
        let x = bounds.x.to_string();
        let y = bounds.y.to_string();
        let width = bounds.width.to_string();
        let height = bounds.height.to_string();
        let mut placed = vec![
            ("x", x.as_str()),
            ("y", y.as_str()),
            ("width", width.as_str()),
            ("height", height.as_str()),
        ];
        placed.extend_from_slice(attrs);
        self.empty(tag, &placed)
    }

    fn rect(&mut self, bounds: Bounds, attrs: &[(&str, &str)]) -> Result<(), EngineError> {
        self.empty_in(bounds, "rect", attrs)
    }

    fn end(&mut self, tag: &str) -> Result<(), EngineError> {
        self.write(Event::End(BytesEnd::new(tag)))
    }

    fn finish(self) -> Result<String, EngineError> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| EngineError::Markup {
            message: e.to_string(),
        })
    }
}

fn element<'a>(tag: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(tag);
    for &attr in attrs {
        element.push_attribute(attr);
    }
    element
}
