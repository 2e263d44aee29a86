//! Highlights ~~strikethrough~~ text (unofficial extension)

use super::pattern::PatternMatcher;
use super::{AttributeMerge, Highlighter};
use crate::attributes::{AttributeSet, LineStyle};
use crate::error::Result;
use crate::text::StyledText;

/// Shortest `~~...~~` whose content starts and ends with non-space;
/// group 1 is the content
const STRIKETHROUGH_PATTERN: &str = r"~~(\S(?:.*?\S)??)~~";

/// Strikes through the text between `~~` delimiters
pub struct StrikethroughHighlighter {
    matcher: PatternMatcher,
    attributes: AttributeSet,
}

impl StrikethroughHighlighter {
    /// Create a new strikethrough highlighter
    ///
    /// `extra` is layered on top of the strikethrough style, so an extra
    /// strikethrough value replaces the single-line default.
    pub fn new(extra: Option<AttributeSet>) -> Result<Self> {
        let mut attributes = AttributeSet::new().with_strikethrough(LineStyle::Single);
        if let Some(extra) = extra {
            attributes.merge(&extra);
        }
        Ok(Self {
            matcher: PatternMatcher::new(STRIKETHROUGH_PATTERN)?,
            attributes,
        })
    }
}

impl Highlighter for StrikethroughHighlighter {
    fn name(&self) -> &str {
        "strikethrough"
    }

    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge> {
        self.matcher
            .matches(fragment.text())
            .filter_map(|m| m.capture(1))
            .map(|range| AttributeMerge::new(range, self.attributes.clone()))
            .collect()
    }
}
