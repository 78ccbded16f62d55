//! Inline style declarations.
//!
//! Surfaces receive styles as ordered `property -> value` maps and serialize
//! them to the `key:value;key:value` form SVG `style` attributes use.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered set of style properties. Setting an existing property replaces its
/// value in place and keeps the original position.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style {
    properties: IndexMap<String, String>,
}

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(property.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Parses `key:value;key:value`. Empty declarations are ignored and a
    /// declaration without `:` is dropped.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut style = Self::new();
        for declaration in raw.split(';') {
            if let Some((key, value)) = declaration.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    style.set(key, value.trim());
                }
            }
        }
        style
    }

    /// Overlays `other` on top of `self`.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{key}:{value}")?;
        }
        Ok(())
    }
}

/// Nested group styles as seen by a backend that resolves properties itself.
#[derive(Debug, Clone, Default)]
pub struct StyleStack {
    frames: Vec<Style>,
}

impl StyleStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, style: Style) {
        self.frames.push(style);
    }

    pub fn pop(&mut self) -> Option<Style> {
        self.frames.pop()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Effective style for a shape drawn with `local` inside the open groups.
    #[must_use]
    pub fn resolve(&self, local: Option<&Style>) -> Style {
        let mut effective = Style::new();
        for frame in &self.frames {
            effective.merge(frame);
        }
        if let Some(local) = local {
            effective.merge(local);
        }
        effective
    }

    /// Font size in pixels, applying each group's `font-size` relative to the
    /// one it inherits, then the local style's.
    #[must_use]
    pub fn font_size_px(&self, local: Option<&Style>, base_px: f64) -> f64 {
        self.frames
            .iter()
            .chain(local)
            .fold(base_px, |inherited, style| {
                resolve_font_size(style.get("font-size"), inherited)
            })
    }
}

/// Resolves a CSS `font-size` value (`18px`, `75%`, `18`) against the
/// inherited size in pixels.
#[must_use]
pub fn resolve_font_size(value: Option<&str>, inherited_px: f64) -> f64 {
    let Some(value) = value.map(str::trim) else {
        return inherited_px;
    };
    if let Some(percent) = value.strip_suffix('%') {
        return percent
            .trim()
            .parse::<f64>()
            .map_or(inherited_px, |p| inherited_px * p / 100.0);
    }
    value
        .trim_end_matches("px")
        .trim()
        .parse::<f64>()
        .unwrap_or(inherited_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_insertion_order() {
        let style = Style::new()
            .with("fill-opacity", "0.5")
            .with("fill", "rgb(200,200,200)");
        assert_eq!(style.to_string(), "fill-opacity:0.5;fill:rgb(200,200,200)");
    }

    #[test]
    fn overriding_keeps_position() {
        let style = Style::new()
            .with("text-anchor", "end")
            .with("font-weight", "bold")
            .with("text-anchor", "start");
        assert_eq!(style.to_string(), "text-anchor:start;font-weight:bold");
    }

    #[test]
    fn parse_reads_back_serialized_form() {
        let style = Style::parse(" text-anchor:middle ; font-size:75%;;junk");
        assert_eq!(style.get("text-anchor"), Some("middle"));
        assert_eq!(style.get("font-size"), Some("75%"));
        assert_eq!(style.iter().count(), 2);
    }

    #[test]
    fn stack_resolves_inner_groups_last() {
        let mut stack = StyleStack::new();
        stack.push(Style::parse("font-family:Calibri;font-size:18px"));
        stack.push(Style::parse("text-anchor:middle;font-size:75%"));
        let effective = stack.resolve(Some(&Style::new().with("fill", "black")));
        assert_eq!(effective.get("font-family"), Some("Calibri"));
        assert_eq!(effective.get("font-size"), Some("75%"));
        assert_eq!(effective.get("fill"), Some("black"));

        assert_eq!(stack.font_size_px(None, 16.0), 13.5);

        assert!(stack.pop().is_some());
        assert_eq!(stack.resolve(None).get("font-size"), Some("18px"));
    }

    #[test]
    fn font_size_resolution() {
        assert_eq!(resolve_font_size(Some("75%"), 16.0), 12.0);
        assert_eq!(resolve_font_size(Some("18px"), 16.0), 18.0);
        assert_eq!(resolve_font_size(Some("bogus"), 16.0), 16.0);
        assert_eq!(resolve_font_size(None, 16.0), 16.0);
    }
}
