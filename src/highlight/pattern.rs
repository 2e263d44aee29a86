//! Pattern matching and the generic pattern highlighter

use regex::{CaptureMatches, Regex};

use super::{AttributeMerge, Highlighter};
use crate::attributes::AttributeSet;
use crate::error::{Result, StyleError};
use crate::range::TextRange;
use crate::text::StyledText;

/// A compiled regular expression producing char-based matches
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a pattern
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(|regex| Self { regex })
            .map_err(|err| StyleError::initialization(pattern, err))
    }

    /// Lazily iterate non-overlapping matches, left to right
    ///
    /// Every call starts a fresh scan.
    pub fn matches<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        Matches {
            captures: self.regex.captures_iter(text),
            text,
            byte: 0,
            chars: 0,
        }
    }
}

/// A single match: the whole range plus numbered capture ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    range: TextRange,
    /// Groups 1.., `None` where the group did not participate
    groups: Vec<Option<TextRange>>,
}

impl Match {
    /// Range of the whole match
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Range of capture group `index` (0 is the whole match)
    pub fn capture(&self, index: usize) -> Option<TextRange> {
        match index {
            0 => Some(self.range),
            _ => self.groups.get(index - 1).copied().flatten(),
        }
    }
}

/// Iterator over the matches of a [`PatternMatcher`]
///
/// Converts the engine's byte offsets to char offsets incrementally.
pub struct Matches<'r, 't> {
    captures: CaptureMatches<'r, 't>,
    text: &'t str,
    /// Byte offset of the last converted match start
    byte: usize,
    /// Char offset corresponding to `byte`
    chars: usize,
}

impl Matches<'_, '_> {
    fn advance_to(&mut self, byte: usize) -> usize {
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

impl Iterator for Matches<'_, '_> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let captures = self.captures.next()?;
        let whole = captures.get(0)?;
        let start = self.advance_to(whole.start());
        let text = self.text;

        // Capture groups always lie within the whole match
        let to_range = |m: regex::Match<'_>| {
            let location = start + text[whole.start()..m.start()].chars().count();
            TextRange::new(location, m.as_str().chars().count())
        };

        Some(Match {
            range: to_range(whole),
            groups: captures.iter().skip(1).map(|m| m.map(to_range)).collect(),
        })
    }
}

/// Highlighter that merges fixed attributes over every match of a pattern
pub struct PatternHighlighter {
    /// Name for debugging
    name: String,
    matcher: PatternMatcher,
    attributes: AttributeSet,
}

impl PatternHighlighter {
    /// Create a new pattern highlighter
    pub fn new(name: &str, pattern: &str, attributes: AttributeSet) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            matcher: PatternMatcher::new(pattern)?,
            attributes,
        })
    }
}

impl Highlighter for PatternHighlighter {
    fn name(&self) -> &str {
        &self.name
    }

    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge> {
        self.matcher
            .matches(fragment.text())
            .filter(|m| !m.range().is_empty())
            .map(|m| AttributeMerge::new(m.range(), self.attributes.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Color;

    #[test]
    fn test_matches_use_char_offsets() {
        let matcher = PatternMatcher::new(r"\d+").unwrap();
        let found: Vec<_> = matcher.matches("héé 12 ü 345").map(|m| m.range()).collect();
        assert_eq!(found, vec![TextRange::new(4, 2), TextRange::new(9, 3)]);
    }

    #[test]
    fn test_absent_capture_is_none() {
        let matcher = PatternMatcher::new(r"(a)|(b)").unwrap();
        let found: Vec<_> = matcher.matches("b").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].capture(1), None);
        assert_eq!(found[0].capture(2), Some(TextRange::new(0, 1)));
        assert_eq!(found[0].capture(3), None);
        assert_eq!(found[0].capture(0), Some(found[0].range()));
    }

    #[test]
    fn test_matches_are_restartable() {
        let matcher = PatternMatcher::new(r"x").unwrap();
        assert_eq!(matcher.matches("x x").count(), 2);
        assert_eq!(matcher.matches("x x").count(), 2);
        assert_eq!(matcher.matches("").count(), 0);
    }

    #[test]
    fn test_invalid_pattern_is_initialization_error() {
        let err = PatternMatcher::new(r"(unclosed").unwrap_err();
        assert!(matches!(err, StyleError::Initialization { .. }));
    }

    #[test]
    fn test_pattern_highlighter() {
        let red = AttributeSet::new().with_foreground(Color::Red);
        let hl = PatternHighlighter::new("number", r"\d+", red.clone()).unwrap();
        let fragment = StyledText::new("a 1 b 22", AttributeSet::body());
        let merges = hl.highlight(&fragment);

        assert_eq!(hl.name(), "number");
        assert_eq!(
            merges,
            vec![
                AttributeMerge::new(TextRange::new(2, 1), red.clone()),
                AttributeMerge::new(TextRange::new(6, 2), red),
            ]
        );
    }
}
