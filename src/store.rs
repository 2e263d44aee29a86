//! Highlighting text store
//!
//! Couples a [`StyledTextBuffer`] with an ordered list of highlighters.
//! Every mutation re-derives the styling of the *whole* document: reset
//! to the default attributes, replay each highlighter in registration
//! order on a working copy, then commit the copy in one replace.
//!
//! Whole-document passes are slow for large texts but necessary, since
//! an edit can change formatting well beyond its own line or paragraph
//! (closing a code block, underlining a se-text header). Small documents
//! are the intended use.

use crate::attributes::AttributeSet;
use crate::buffer::{StyledTextBuffer, TextEdit};
use crate::config::MarkdownAttributes;
use crate::error::Result;
use crate::highlight::markdown::markdown_highlighters;
use crate::highlight::{apply_merges, Highlighter};
use crate::range::TextRange;
use crate::text::{AttributeRun, StyledText};

/// Styled text that re-highlights itself whenever it changes
pub struct HighlightingTextStore {
    buffer: StyledTextBuffer,
    /// Invoked in the order they were added
    highlighters: Vec<Box<dyn Highlighter>>,
    default_attributes: AttributeSet,
}

impl HighlightingTextStore {
    /// Create an empty store with no highlighters
    pub fn new(default_attributes: AttributeSet) -> Self {
        Self {
            buffer: StyledTextBuffer::new(default_attributes.clone()),
            highlighters: Vec::new(),
            default_attributes,
        }
    }

    /// Create a store highlighting Markdown with the given attributes
    pub fn markdown(attributes: MarkdownAttributes) -> Result<Self> {
        let highlighters = markdown_highlighters(&attributes)?;
        let mut store = Self::new(attributes.default_attributes);
        store.highlighters = highlighters;
        Ok(store)
    }

    /// Add a highlighter; it applies to existing text immediately
    pub fn add_highlighter(&mut self, highlighter: Box<dyn Highlighter>) {
        self.highlighters.push(highlighter);
        self.rehighlight();
    }

    /// Number of registered highlighters
    pub fn highlighter_count(&self) -> usize {
        self.highlighters.len()
    }

    /// Get the default attributes
    pub fn default_attributes(&self) -> &AttributeSet {
        &self.default_attributes
    }

    /// Change the default attributes and restyle everything
    pub fn set_default_attributes(&mut self, attributes: AttributeSet) {
        self.buffer.set_default_attributes(attributes.clone());
        self.default_attributes = attributes;
        self.rehighlight();
    }

    /// Replace characters in `range` with `text`
    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<()> {
        self.buffer.replace(range, text)?;
        self.rehighlight();
        Ok(())
    }

    /// Append text at the end
    pub fn append(&mut self, text: &str) -> Result<()> {
        self.replace(TextRange::new(self.len(), 0), text)
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.replace(TextRange::full(self.len()), text)
    }

    /// Overwrite attributes over `range`
    ///
    /// The edit is reported to observers, but the re-highlight pass that
    /// follows resets the range to the defaults like any other.
    pub fn set_attributes(&mut self, attributes: &AttributeSet, range: TextRange) -> Result<()> {
        self.buffer.set_attributes(attributes, range)?;
        self.rehighlight();
        Ok(())
    }

    /// Run the full re-highlight pass
    ///
    /// Running it again with no intervening mutation yields the same runs.
    pub fn rehighlight(&mut self) {
        let full = TextRange::full(self.buffer.len());
        if let Err(err) = self.buffer.set_attributes(&self.default_attributes, full) {
            log::error!("failed to reset attributes: {}", err);
            return;
        }

        let mut working = self.buffer.styled_text().clone();
        let mut total = 0;
        for highlighter in &self.highlighters {
            let merges = highlighter.highlight(&working);
            log::trace!("{}: {} merges", highlighter.name(), merges.len());
            total += merges.len();
            apply_merges(&mut working, &merges);
        }

        if let Err(err) = self.buffer.replace_styled(full, &working) {
            log::error!("failed to commit highlighting: {}", err);
            return;
        }
        log::debug!(
            "rehighlighted {} chars with {} highlighters ({} merges)",
            full.length,
            self.highlighters.len(),
            total
        );
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    /// Get the length in chars
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Attributes at `position` and the maximal range sharing them
    pub fn attributes_at(&self, position: usize) -> Result<(&AttributeSet, TextRange)> {
        self.buffer.attributes_at(position)
    }

    /// The current styled text
    pub fn styled_text(&self) -> &StyledText {
        self.buffer.styled_text()
    }

    /// The current attribute runs
    pub fn runs(&self) -> &[AttributeRun] {
        self.buffer.runs()
    }

    /// Take the coalesced change notifications
    pub fn take_edits(&mut self) -> Vec<TextEdit> {
        self.buffer.take_edits()
    }
}

impl Default for HighlightingTextStore {
    fn default() -> Self {
        Self::new(AttributeSet::body())
    }
}
