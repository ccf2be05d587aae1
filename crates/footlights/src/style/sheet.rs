//! Stylesheet documents.
//!
//! A stylesheet is a YAML or JSON document listing named style specs, with an
//! optional canvas size:
//!
//! ```yaml
//! canvas: { width: 512, height: 512 }
//! styles:
//!   bg:
//!     color: "#223344"
//!   img:
//!     image: logo
//!     round: 20
//! ```
//!
//! The order of the `styles` mapping is kept: it becomes the registration
//! order, and therefore the render order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::StyleSpec;
use crate::error::EngineError;
use crate::render::Canvas;

/// A parsed stylesheet document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleSheet {
    #[serde(default)]
    pub canvas: Option<Canvas>,
    #[serde(default)]
    styles: OrderedSpecs,
}

impl StyleSheet {
    pub fn from_yaml(text: &str) -> Result<Self, EngineError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Named specs in document order.
    pub fn styles(&self) -> &[(String, StyleSpec)] {
        &self.styles.0
    }

    pub fn into_styles(self) -> Vec<(String, StyleSpec)> {
        self.styles.0
    }

    pub fn len(&self) -> usize {
        self.styles.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct OrderedSpecs(Vec<(String, StyleSpec)>);

impl<'de> Deserialize<'de> for OrderedSpecs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedSpecsVisitor)
    }
}

struct OrderedSpecsVisitor;

impl<'de> Visitor<'de> for OrderedSpecsVisitor {
    type Value = OrderedSpecs;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping from style name to style")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut specs: Vec<(String, StyleSpec)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, spec)) = map.next_entry::<String, StyleSpec>()? {
            if specs.iter().any(|(existing, _)| existing == &name) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate style name '{}'",
                    name
                )));
            }
            specs.push((name, spec));
        }
        Ok(OrderedSpecs(specs))
    }
}
