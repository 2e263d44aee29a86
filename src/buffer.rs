//! Styled text buffer - canonical text, attribute runs, and pending edits
//!
//! The buffer is passive: it records what changed but never restyles
//! anything itself. [`HighlightingTextStore`](crate::store::HighlightingTextStore)
//! owns it and drives re-highlighting.

use crate::attributes::AttributeSet;
use crate::error::{Result, StyleError};
use crate::range::TextRange;
use crate::text::{AttributeRun, StyledText};

/// Change notification for an external rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    /// Characters in `range` (pre-edit coordinates) were replaced;
    /// the text length changed by `delta`
    CharactersChanged { range: TextRange, delta: isize },
    /// Attributes over `range` changed; length is unchanged
    AttributesChanged { range: TextRange },
}

/// A buffer of styled text with change tracking
#[derive(Debug, Clone)]
pub struct StyledTextBuffer {
    /// Text and attribute runs
    content: StyledText,
    /// Attributes for text inserted into an empty buffer
    default_attributes: AttributeSet,
    /// Characters changed since the last take, in the coordinates of the
    /// text before the first of those changes
    pending_characters: Option<(TextRange, isize)>,
    /// Attributes changed since the last take, in current coordinates
    pending_attributes: Option<TextRange>,
}

impl StyledTextBuffer {
    /// Create a new empty buffer
    pub fn new(default_attributes: AttributeSet) -> Self {
        Self {
            content: StyledText::default(),
            default_attributes,
            pending_characters: None,
            pending_attributes: None,
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        self.content.text()
    }

    /// Get the length in chars
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get the styled content
    pub fn styled_text(&self) -> &StyledText {
        &self.content
    }

    /// Get the attribute runs
    pub fn runs(&self) -> &[AttributeRun] {
        self.content.runs()
    }

    /// Get the attributes used for text inserted into an empty buffer
    pub fn default_attributes(&self) -> &AttributeSet {
        &self.default_attributes
    }

    /// Set the attributes used for text inserted into an empty buffer
    pub fn set_default_attributes(&mut self, attributes: AttributeSet) {
        self.default_attributes = attributes;
    }

    /// Attributes at `position` and the maximal range sharing them
    ///
    /// Position 0 of an empty buffer reports the default attributes
    /// over an empty range.
    pub fn attributes_at(&self, position: usize) -> Result<(&AttributeSet, TextRange)> {
        if self.is_empty() {
            return if position == 0 {
                Ok((&self.default_attributes, TextRange::default()))
            } else {
                Err(StyleError::PositionOutOfRange { position, len: 0 })
            };
        }
        self.content.attributes_at(position)
    }

    /// Replace characters in `range` with plain text
    ///
    /// The new text takes the attributes at `range.location`, or of the
    /// preceding character when replacing at the very end.
    pub fn replace(&mut self, range: TextRange, new_text: &str) -> Result<()> {
        self.content.check_range(range)?;
        let attributes = self.inherited_attributes(range.location).clone();
        self.content.replace(range, new_text, &attributes)?;
        self.record_characters(range, new_text.chars().count());
        Ok(())
    }

    /// Replace characters in `range` with styled text
    pub fn replace_styled(&mut self, range: TextRange, replacement: &StyledText) -> Result<()> {
        self.content.replace_styled(range, replacement)?;
        self.record_characters(range, replacement.len());
        Ok(())
    }

    /// Overwrite the attributes over `range`
    pub fn set_attributes(&mut self, attributes: &AttributeSet, range: TextRange) -> Result<()> {
        self.content.set_attributes(attributes, range)?;
        self.record_attributes(range);
        Ok(())
    }

    /// Merge `attributes` onto everything in `range`
    pub fn add_attributes(&mut self, attributes: &AttributeSet, range: TextRange) -> Result<()> {
        self.content.add_attributes(attributes, range)?;
        self.record_attributes(range);
        Ok(())
    }

    /// Check if there are notifications waiting
    pub fn has_pending_edits(&self) -> bool {
        self.pending_characters.is_some() || self.pending_attributes.is_some()
    }

    /// Take the pending notifications
    ///
    /// Edits since the last take are coalesced, so there is at most one
    /// notification of each kind, characters first.
    pub fn take_edits(&mut self) -> Vec<TextEdit> {
        let characters = self
            .pending_characters
            .take()
            .map(|(range, delta)| TextEdit::CharactersChanged { range, delta });
        let attributes = self
            .pending_attributes
            .take()
            .map(|range| TextEdit::AttributesChanged { range });
        characters.into_iter().chain(attributes).collect()
    }

    fn inherited_attributes(&self, location: usize) -> &AttributeSet {
        let position = if location < self.len() {
            Some(location)
        } else {
            location.checked_sub(1)
        };
        position
            .and_then(|pos| self.content.attributes_at(pos).ok())
            .map_or(&self.default_attributes, |(attrs, _)| attrs)
    }

    fn record_characters(&mut self, range: TextRange, new_len: usize) {
        let delta = new_len as isize - range.length as isize;

        if let Some(attributes) = self.pending_attributes {
            self.pending_attributes = Some(TextRange::from_bounds(
                shift_position(attributes.location, range, new_len),
                shift_position(attributes.end(), range, new_len),
            ));
        }

        self.pending_characters = Some(match self.pending_characters {
            None => (range, delta),
            Some((pending, pending_delta)) => {
                // Union in current coordinates, then map the end back
                // past the earlier change
                let location = pending.location.min(range.location);
                let end = (pending.end() as isize + pending_delta).max(range.end() as isize);
                let end = (end - pending_delta) as usize;
                (TextRange::from_bounds(location, end), pending_delta + delta)
            }
        });
    }

    fn record_attributes(&mut self, range: TextRange) {
        self.pending_attributes = Some(match self.pending_attributes {
            None => range,
            Some(pending) => pending.union(&range),
        });
    }
}

/// Where `position` ends up after `edit` was replaced by `new_len` chars
fn shift_position(position: usize, edit: TextRange, new_len: usize) -> usize {
    if position <= edit.location {
        position
    } else if position >= edit.end() {
        position - edit.length + new_len
    } else {
        edit.location + (position - edit.location).min(new_len)
    }
}

impl Default for StyledTextBuffer {
    fn default() -> Self {
        Self::new(AttributeSet::body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Color;

    #[test]
    fn test_empty_buffer_reports_defaults() {
        let buffer = StyledTextBuffer::default();
        let (attrs, range) = buffer.attributes_at(0).unwrap();
        assert_eq!(attrs, &AttributeSet::body());
        assert!(range.is_empty());
        assert!(buffer.attributes_at(1).unwrap_err().is_range_error());
    }

    #[test]
    fn test_replace_emits_delta() {
        let mut buffer = StyledTextBuffer::default();
        buffer.replace(TextRange::new(0, 0), "hello").unwrap();
        assert_eq!(
            buffer.take_edits(),
            vec![TextEdit::CharactersChanged { range: TextRange::new(0, 0), delta: 5 }]
        );

        buffer.replace(TextRange::new(1, 3), "i").unwrap();
        assert_eq!(buffer.text(), "hio");
        assert_eq!(
            buffer.take_edits(),
            vec![TextEdit::CharactersChanged { range: TextRange::new(1, 3), delta: -2 }]
        );
        assert!(!buffer.has_pending_edits());
    }

    #[test]
    fn test_character_edits_coalesce() {
        let mut buffer = StyledTextBuffer::default();
        buffer.replace(TextRange::new(0, 0), "abcdefgh").unwrap();
        buffer.take_edits();

        // "abcdefgh" -> "abXYZefgh" -> "abXYZefg!"
        buffer.replace(TextRange::new(2, 2), "XYZ").unwrap();
        buffer.replace(TextRange::new(8, 1), "!").unwrap();
        assert_eq!(buffer.text(), "abXYZefg!");

        // One change covering 2..8 of the original text, one char longer
        assert_eq!(
            buffer.take_edits(),
            vec![TextEdit::CharactersChanged { range: TextRange::new(2, 6), delta: 1 }]
        );
    }

    #[test]
    fn test_pending_edits_stay_bounded() {
        let mut buffer = StyledTextBuffer::default();
        for i in 0..1000 {
            buffer.replace(TextRange::new(i, 0), "x").unwrap();
            buffer.set_attributes(&AttributeSet::body(), TextRange::new(i, 1)).unwrap();
        }
        assert_eq!(
            buffer.take_edits(),
            vec![
                TextEdit::CharactersChanged { range: TextRange::new(0, 0), delta: 1000 },
                TextEdit::AttributesChanged { range: TextRange::new(0, 1000) },
            ]
        );
    }

    #[test]
    fn test_attribute_range_follows_character_edits() {
        let mut buffer = StyledTextBuffer::default();
        buffer.replace(TextRange::new(0, 0), "abcdef").unwrap();
        buffer.take_edits();

        buffer.set_attributes(&AttributeSet::new(), TextRange::new(3, 2)).unwrap();
        buffer.replace(TextRange::new(0, 1), "xyz").unwrap();
        let edits = buffer.take_edits();
        assert_eq!(edits[1], TextEdit::AttributesChanged { range: TextRange::new(5, 2) });
    }

    #[test]
    fn test_insert_inherits_attributes() {
        let red = AttributeSet::body().with_foreground(Color::Red);
        let mut buffer = StyledTextBuffer::default();
        buffer.replace(TextRange::new(0, 0), "ab").unwrap();
        buffer.set_attributes(&red, TextRange::new(1, 1)).unwrap();

        // Appending at the end inherits from the last character
        buffer.replace(TextRange::new(2, 0), "c").unwrap();
        assert_eq!(buffer.attributes_at(2).unwrap().0, &red);
        assert_eq!(buffer.attributes_at(1).unwrap().1, TextRange::new(1, 2));

        // Inserting at the front inherits from the first character
        buffer.replace(TextRange::new(0, 0), "z").unwrap();
        assert_eq!(buffer.attributes_at(0).unwrap().0, &AttributeSet::body());
    }

    #[test]
    fn test_attribute_edits_are_recorded() {
        let mut buffer = StyledTextBuffer::default();
        buffer.replace(TextRange::new(0, 0), "abc").unwrap();
        buffer.take_edits();

        let blue = AttributeSet::new().with_foreground(Color::Blue);
        buffer.add_attributes(&blue, TextRange::new(0, 2)).unwrap();
        assert_eq!(
            buffer.take_edits(),
            vec![TextEdit::AttributesChanged { range: TextRange::new(0, 2) }]
        );
        assert_eq!(buffer.attributes_at(0).unwrap().0.foreground(), Some(Color::Blue));
    }

    #[test]
    fn test_range_error_leaves_buffer_unmodified() {
        let mut buffer = StyledTextBuffer::default();
        buffer.replace(TextRange::new(0, 0), "abc").unwrap();
        buffer.take_edits();

        let err = buffer.replace(TextRange::new(2, 5), "x").unwrap_err();
        assert!(err.is_range_error());
        assert_eq!(buffer.text(), "abc");
        assert!(!buffer.has_pending_edits());
    }
}
