//! Ordered registry of named styles.
//!
//! [`Styles`] maps unique names to [`Style`] values and remembers the order in
//! which names were first registered. That order is the render order.
//!
//! # Replacement
//!
//! Registering a name that already exists replaces its style *in place*: the
//! entry keeps the position it was first given. Only [`Styles::remove`]
//! followed by a fresh insert moves a name to the end.
//!
//! ```rust
//! use footlights::{Style, Styles};
//!
//! let mut styles = Styles::new()
//!     .add("a", Style::new())
//!     .add("b", Style::new());
//!
//! styles.insert("a", Style::new().with_image("logo"));
//! assert_eq!(styles.names().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```
//!
//! # Lookup
//!
//! Missing names are a normal outcome: [`Styles::get`] returns `None` and
//! [`Styles::remove`] does nothing.

use std::collections::HashMap;

use super::Style;
use crate::error::EngineError;

/// Ordered mapping from style name to [`Style`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    entries: Vec<(String, Style)>,
    index: HashMap<String, usize>,
}

impl Styles {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, returning the registry for chaining.
    ///
    /// Same semantics as [`Styles::insert`].
    pub fn add(mut self, name: impl Into<String>, style: Style) -> Self {
        self.insert(name, style);
        self
    }

    /// Inserts or replaces the style under `name`.
    ///
    /// Returns the replaced style, if any. A replaced entry keeps its
    /// original position.
    pub fn insert(&mut self, name: impl Into<String>, style: Style) -> Option<Style> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, style)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, style));
                None
            }
        }
    }

    /// Removes the style under `name`, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Style> {
        let position = self.index.remove(name)?;
        let (_, style) = self.entries.remove(position);
        for (shifted, (entry_name, _)) in self.entries.iter().enumerate().skip(position) {
            self.index.insert(entry_name.clone(), shifted);
        }
        Some(style)
    }

    pub fn get(&self, name: &str) -> Option<&Style> {
        self.index.get(name).map(|&position| &self.entries[position].1)
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registration position of `name`, starting at zero.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, style)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.entries.iter().map(|(name, style)| (name.as_str(), style))
    }
}

impl<'a> IntoIterator for &'a Styles {
    type Item = (&'a str, &'a Style);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Style)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Checks that `name` can be emitted as a CSS class and an SVG attribute.
///
/// Names must be non-empty and free of control characters. Anything else,
/// including whitespace and punctuation, is escaped on output.
pub fn check_style_name(name: &str) -> Result<(), EngineError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.chars().any(char::is_control) {
        "name contains control characters"
    } else {
        return Ok(());
    };
    Err(EngineError::InvalidStyleName {
        name: name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(styles: &Styles) -> Vec<&str> {
        styles.names().collect()
    }

    // =========================================================================
    // Insertion and replacement
    // =========================================================================

    #[test]
    fn test_styles_insert_keeps_order() {
        let styles = Styles::new()
            .add("c", Style::new())
            .add("a", Style::new())
            .add("b", Style::new());
        assert_eq!(names(&styles), vec!["c", "a", "b"]);
        assert_eq!(styles.len(), 3);
    }

    #[test]
    fn test_styles_replace_keeps_position() {
        let mut styles = Styles::new().add("a", Style::new()).add("b", Style::new());
        let replaced = styles.insert("a", Style::new().with_image("new"));

        assert_eq!(replaced, Some(Style::new()));
        assert_eq!(names(&styles), vec!["a", "b"]);
        assert_eq!(
            styles.get("a").and_then(Style::image).map(|i| i.as_str()),
            Some("new")
        );
    }

    #[test]
    fn test_styles_insert_new_returns_none() {
        let mut styles = Styles::new();
        assert!(styles.insert("a", Style::new()).is_none());
        assert!(styles.has("a"));
    }

    // =========================================================================
    // Removal
    // =========================================================================

    #[test]
    fn test_styles_remove_reindexes() {
        let mut styles = Styles::new()
            .add("a", Style::new())
            .add("b", Style::new())
            .add("c", Style::new().with_image("c"));

        assert!(styles.remove("a").is_some());
        assert_eq!(names(&styles), vec!["b", "c"]);
        assert_eq!(styles.position("c"), Some(1));
        assert_eq!(
            styles.get("c").and_then(Style::image).map(|i| i.as_str()),
            Some("c")
        );
    }

    #[test]
    fn test_styles_remove_missing_is_noop() {
        let mut styles = Styles::new().add("a", Style::new());
        assert!(styles.remove("zzz").is_none());
        assert_eq!(names(&styles), vec!["a"]);
    }

    #[test]
    fn test_styles_remove_then_insert_moves_to_end() {
        let mut styles = Styles::new().add("a", Style::new()).add("b", Style::new());
        styles.remove("a");
        styles.insert("a", Style::new());
        assert_eq!(names(&styles), vec!["b", "a"]);
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    #[test]
    fn test_styles_get_missing() {
        let styles = Styles::new();
        assert!(styles.get("missing").is_none());
        assert!(!styles.has("missing"));
        assert!(styles.is_empty());
    }

    #[test]
    fn test_styles_iter_pairs() {
        let styles = Styles::new()
            .add("x", Style::new().with_image("1"))
            .add("y", Style::new());
        let pairs: Vec<(&str, bool)> = (&styles)
            .into_iter()
            .map(|(name, style)| (name, style.image().is_some()))
            .collect();
        assert_eq!(pairs, vec![("x", true), ("y", false)]);
    }

    // =========================================================================
    // Names
    // =========================================================================

    #[test]
    fn test_check_style_name() {
        assert!(check_style_name("bg").is_ok());
        assert!(check_style_name("my bg").is_ok());
        assert!(check_style_name("x-fill").is_ok());

        let err = check_style_name("").unwrap_err();
        assert_eq!(err.to_string(), "invalid style name '': name is empty");
        assert!(matches!(
            check_style_name("a\u{7}b"),
            Err(EngineError::InvalidStyleName { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn registry_order_is_first_insertion_order(
            ops in prop::collection::vec((0u8..6, any::<bool>()), 0..40),
        ) {
            let mut styles = Styles::new();
            let mut expected: Vec<String> = Vec::new();

            for (key, is_insert) in ops {
                let name = format!("s{}", key);
                if is_insert {
                    if !expected.contains(&name) {
                        expected.push(name.clone());
                    }
                    styles.insert(name, Style::new());
                } else {
                    expected.retain(|existing| existing != &name);
                    styles.remove(&name);
                }
            }

            let actual: Vec<String> = styles.names().map(str::to_string).collect();
            prop_assert_eq!(&actual, &expected);
            for (position, name) in expected.iter().enumerate() {
                prop_assert_eq!(styles.position(name), Some(position));
            }
        }
    }
}
