//! Highlighters
//!
//! A highlighter reads a snapshot of the styled text and returns the
//! attribute merges it wants applied. The store applies each
//! highlighter's merges before invoking the next, so later highlighters
//! see (and can build on) everything earlier ones did.

mod header;
mod link;
mod list;
pub mod markdown;
mod pattern;
mod strikethrough;
mod superscript;

pub use header::{HeaderAttributes, HeaderHighlighter};
pub use link::{LinkHighlighter, MarkdownLinkHighlighter};
pub use list::ListHighlighter;
pub use pattern::{Match, PatternHighlighter, PatternMatcher};
pub use strikethrough::StrikethroughHighlighter;
pub use superscript::{SuperscriptHighlighter, DEFAULT_FONT_RATIO};

use crate::attributes::AttributeSet;
use crate::range::TextRange;
use crate::text::StyledText;

/// One additive attribute merge over a range
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMerge {
    pub range: TextRange,
    pub attributes: AttributeSet,
}

impl AttributeMerge {
    /// Create a new merge
    pub fn new(range: TextRange, attributes: AttributeSet) -> Self {
        Self { range, attributes }
    }
}

/// A unit of styling logic
///
/// Implementations must be total: any valid fragment yields some
/// (possibly empty) list of merges whose ranges lie within the fragment.
pub trait Highlighter {
    /// Name for debugging
    fn name(&self) -> &str;

    /// Compute the merges to apply to `fragment`
    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge>;
}

/// Apply merges to a fragment in order
///
/// Merges whose range falls outside the fragment are skipped.
pub fn apply_merges(fragment: &mut StyledText, merges: &[AttributeMerge]) {
    for merge in merges {
        if let Err(err) = fragment.add_attributes(&merge.attributes, merge.range) {
            log::warn!("skipping merge: {}", err);
        }
    }
}
