//! Highlights list items: the marker and the item text separately

use super::pattern::PatternMatcher;
use super::{AttributeMerge, Highlighter};
use crate::attributes::AttributeSet;
use crate::error::Result;
use crate::text::StyledText;

/// Marker for unordered lists (`*`, `+`, `-`)
pub const UNORDERED_MARKER: &str = r"[*+-]";

/// Marker for ordered lists (`1.`)
pub const ORDERED_MARKER: &str = r"\d+[.]";

/// Styles list markers and the rest of their line
pub struct ListHighlighter {
    matcher: PatternMatcher,
    marker_attributes: Option<AttributeSet>,
    item_attributes: Option<AttributeSet>,
}

impl ListHighlighter {
    /// Create a list highlighter for lines starting with `marker_pattern`
    pub fn new(
        marker_pattern: &str,
        marker_attributes: Option<AttributeSet>,
        item_attributes: Option<AttributeSet>,
    ) -> Result<Self> {
        let pattern = format!(r"(?m)^[ \t]*({})[ \t]+(.*)$", marker_pattern);
        Ok(Self {
            matcher: PatternMatcher::new(&pattern)?,
            marker_attributes,
            item_attributes,
        })
    }

    /// Unordered (`*`, `+`, `-`) list highlighter
    pub fn unordered(marker: Option<AttributeSet>, item: Option<AttributeSet>) -> Result<Self> {
        Self::new(UNORDERED_MARKER, marker, item)
    }

    /// Ordered (`1.`) list highlighter
    pub fn ordered(marker: Option<AttributeSet>, item: Option<AttributeSet>) -> Result<Self> {
        Self::new(ORDERED_MARKER, marker, item)
    }
}

impl Highlighter for ListHighlighter {
    fn name(&self) -> &str {
        "list"
    }

    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge> {
        let mut merges = Vec::new();
        for m in self.matcher.matches(fragment.text()) {
            if let (Some(range), Some(attrs)) = (m.capture(1), &self.marker_attributes) {
                merges.push(AttributeMerge::new(range, attrs.clone()));
            }
            if let (Some(range), Some(attrs)) = (m.capture(2), &self.item_attributes) {
                if !range.is_empty() {
                    merges.push(AttributeMerge::new(range, attrs.clone()));
                }
            }
        }
        merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Color;
    use crate::range::TextRange;

    fn marker() -> Option<AttributeSet> {
        Some(AttributeSet::new().with_foreground(Color::Red))
    }

    fn item() -> Option<AttributeSet> {
        Some(AttributeSet::new().with_foreground(Color::Blue))
    }

    #[test]
    fn test_unordered_marker_and_item() {
        let hl = ListHighlighter::unordered(marker(), item()).unwrap();
        let merges = hl.highlight(&StyledText::new("intro\n  - one\n+ two\n", AttributeSet::body()));
        let ranges: Vec<_> = merges.iter().map(|m| m.range).collect();
        assert_eq!(
            ranges,
            vec![
                TextRange::new(8, 1),
                TextRange::new(10, 3),
                TextRange::new(14, 1),
                TextRange::new(16, 3),
            ]
        );
        assert_eq!(merges[0].attributes.foreground(), Some(Color::Red));
        assert_eq!(merges[1].attributes.foreground(), Some(Color::Blue));
    }

    #[test]
    fn test_ordered_marker() {
        let hl = ListHighlighter::ordered(marker(), None).unwrap();
        let merges = hl.highlight(&StyledText::new("12. twelve\n3 three\n", AttributeSet::body()));
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].range, TextRange::new(0, 3));
    }

    #[test]
    fn test_horizontal_rule_is_not_a_list() {
        let hl = ListHighlighter::unordered(marker(), item()).unwrap();
        assert!(hl.highlight(&StyledText::new("---\n", AttributeSet::body())).is_empty());
    }

    #[test]
    fn test_bad_marker_pattern() {
        assert!(ListHighlighter::new("[", marker(), item()).is_err());
    }
}
