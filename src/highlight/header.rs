//! Highlights atx-style Markdown headers (`# Title`)

use super::pattern::PatternMatcher;
use super::{AttributeMerge, Highlighter};
use crate::attributes::{AttributeSet, Font};
use crate::error::Result;
use crate::text::StyledText;

/// `#` run (the level), then either whitespace and content or content
/// that does not start with another `#`, optional closing hashes, and
/// the trailing newline(s).
const HEADER_PATTERN: &str = r"(?m)^(#{1,6})(?:[ \t]+\S|[^#\s]).*?[ \t]*#*\n+";

/// Attributes for each header level; `None` leaves that level unstyled
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderAttributes {
    pub h1: Option<AttributeSet>,
    pub h2: Option<AttributeSet>,
    pub h3: Option<AttributeSet>,
    pub h4: Option<AttributeSet>,
    pub h5: Option<AttributeSet>,
    pub h6: Option<AttributeSet>,
}

impl HeaderAttributes {
    /// Attributes for a header level (1-6)
    pub fn for_level(&self, level: usize) -> Option<&AttributeSet> {
        match level {
            1 => self.h1.as_ref(),
            2 => self.h2.as_ref(),
            3 => self.h3.as_ref(),
            4 => self.h4.as_ref(),
            5 => self.h5.as_ref(),
            6 => self.h6.as_ref(),
            _ => None,
        }
    }

    /// Mutable slot for a header level (1-6)
    pub fn level_mut(&mut self, level: usize) -> Option<&mut Option<AttributeSet>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

impl Default for HeaderAttributes {
    fn default() -> Self {
        let headline = Some(AttributeSet::new().with_font(Font::headline()));
        let subheadline = Some(AttributeSet::new().with_font(Font::subheadline()));
        Self {
            h1: headline.clone(),
            h2: headline.clone(),
            h3: headline,
            h4: subheadline.clone(),
            h5: subheadline.clone(),
            h6: subheadline,
        }
    }
}

/// Applies per-level attributes to atx headers
pub struct HeaderHighlighter {
    matcher: PatternMatcher,
    attributes: HeaderAttributes,
}

impl HeaderHighlighter {
    /// Create a new header highlighter
    pub fn new(attributes: HeaderAttributes) -> Result<Self> {
        Ok(Self {
            matcher: PatternMatcher::new(HEADER_PATTERN)?,
            attributes,
        })
    }
}

impl Highlighter for HeaderHighlighter {
    fn name(&self) -> &str {
        "header"
    }

    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge> {
        self.matcher
            .matches(fragment.text())
            .filter_map(|m| {
                let level = m.capture(1)?.length;
                let attributes = self.attributes.for_level(level)?;
                Some(AttributeMerge::new(m.range(), attributes.clone()))
            })
            .collect()
    }
}
