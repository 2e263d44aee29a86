//! Highlights super^script text (unofficial extension)
//!
//! Each match is one or more carets followed by either a single token or
//! a parenthesized group: `x^2`, `x^^2`, `x^(a b)`. Directly adjacent
//! matches (`x^2^3`) compound their nesting level.

use super::pattern::PatternMatcher;
use super::{AttributeMerge, Highlighter};
use crate::attributes::AttributeSet;
use crate::error::Result;
use crate::range::TextRange;
use crate::text::StyledText;

/// Group 1 is the caret run
const SUPERSCRIPT_PATTERN: &str = r"(\^+)(?:[^\^\s(][^\^\s]*|\([^\n\r)]+\))";

/// Default ratio applied to the font size of superscript text
pub const DEFAULT_FONT_RATIO: f32 = 0.7;

/// Shrinks superscript text and records its nesting level
pub struct SuperscriptHighlighter {
    matcher: PatternMatcher,
    font_ratio: f32,
}

impl SuperscriptHighlighter {
    /// Create a new superscript highlighter with the default font ratio
    pub fn new() -> Result<Self> {
        Self::with_font_ratio(DEFAULT_FONT_RATIO)
    }

    /// Create a superscript highlighter scaling fonts by `font_ratio`
    pub fn with_font_ratio(font_ratio: f32) -> Result<Self> {
        Ok(Self {
            matcher: PatternMatcher::new(SUPERSCRIPT_PATTERN)?,
            font_ratio,
        })
    }
}

impl Highlighter for SuperscriptHighlighter {
    fn name(&self) -> &str {
        "superscript"
    }

    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge> {
        let mut merges = Vec::new();
        let mut previous: Option<TextRange> = None;
        let mut level: i32 = 0;

        for m in self.matcher.matches(fragment.text()) {
            let range = m.range();
            let carets = m.capture(1).map_or(0, |caret| caret.length);
            level = level.saturating_add(i32::try_from(carets).unwrap_or(i32::MAX));

            let consecutive = previous.is_some_and(|prev| prev.end() == range.location);
            if consecutive {
                level = level.saturating_add(1);
            }

            if let Ok((current, _)) = fragment.attributes_at(range.location) {
                if let Some(attributes) = superscript_attributes(current, level, self.font_ratio) {
                    merges.push(AttributeMerge::new(range, attributes));
                }
            }

            previous = Some(range);
            if !consecutive {
                level = 0;
            }
        }
        merges
    }
}

/// Scaled font plus level, or nothing when there is no font to scale
fn superscript_attributes(current: &AttributeSet, level: i32, ratio: f32) -> Option<AttributeSet> {
    let font = current.font()?;
    Some(
        AttributeSet::new()
            .with_font(font.scaled(ratio))
            .with_superscript(level),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Font;

    fn highlight(text: &str) -> Vec<AttributeMerge> {
        let hl = SuperscriptHighlighter::new().unwrap();
        hl.highlight(&StyledText::new(text, AttributeSet::new().with_font(Font::new("Body", 10.0))))
    }

    fn levels(merges: &[AttributeMerge]) -> Vec<Option<i32>> {
        merges.iter().map(|m| m.attributes.superscript()).collect()
    }

    #[test]
    fn test_adjacent_matches_compound() {
        let merges = highlight("x^2^3");
        assert_eq!(merges.len(), 2);
        assert_eq!(merges[0].range, TextRange::new(1, 2));
        assert_eq!(merges[1].range, TextRange::new(3, 2));

        let levels = levels(&merges);
        assert_eq!(levels, vec![Some(1), Some(2)]);
        assert!(levels[1] > levels[0]);

        // Font shrinks by the ratio once, not once per level
        for merge in &merges {
            assert_eq!(merge.attributes.font().map(|f| f.size), Some(10.0 * DEFAULT_FONT_RATIO));
        }
    }

    #[test]
    fn test_isolated_matches_are_independent() {
        let merges = highlight("a^b c^^d e^(f g)");
        assert_eq!(levels(&merges), vec![Some(1), Some(2), Some(1)]);
        assert_eq!(merges[2].range, TextRange::new(10, 6));
    }

    #[test]
    fn test_chain_keeps_compounding() {
        let merges = highlight("x^a^b^c");
        assert_eq!(levels(&merges), vec![Some(1), Some(2), Some(4)]);
    }

    #[test]
    fn test_long_caret_run_sets_level() {
        let text = format!("x{}y", "^".repeat(40));
        assert_eq!(levels(&highlight(&text)), vec![Some(40)]);
    }

    #[test]
    fn test_no_font_is_noop() {
        let hl = SuperscriptHighlighter::new().unwrap();
        let merges = hl.highlight(&StyledText::new("x^2", AttributeSet::new()));
        assert!(merges.is_empty());
    }

    #[test]
    fn test_caret_alone_does_not_match() {
        assert!(highlight("a ^ b ^(").is_empty());
    }

    #[test]
    fn test_custom_ratio() {
        let hl = SuperscriptHighlighter::with_font_ratio(0.5).unwrap();
        let merges = hl.highlight(&StyledText::new("x^2", AttributeSet::new().with_font(Font::new("Body", 10.0))));
        assert_eq!(merges[0].attributes.font().map(|f| f.size), Some(5.0));
    }
}
