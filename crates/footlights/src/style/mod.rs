//! Styles and the style registry.
//!
//! - [`Style`]: optional color, image, corner radius and drop shadow
//! - [`Styles`]: ordered registry of named styles
//! - [`StyleSpec`] / [`StyleSheet`]: plain-data input, validated on conversion

mod registry;
mod sheet;
mod spec;
mod value;

pub use registry::{check_style_name, Styles};
pub use sheet::StyleSheet;
pub use spec::{ColorSpec, GradientSpec, PositionSpec, ShadowSpec, StopSpec, StyleSpec};
pub use value::{DropShadow, ImageRef, Style, DEFAULT_SHADOW_BLUR, DEFAULT_SHADOW_OPACITY};
