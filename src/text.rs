//! Styled text: a string partitioned into attribute runs
//!
//! [`StyledText`] is both the canonical storage inside a
//! [`StyledTextBuffer`](crate::buffer::StyledTextBuffer) and the
//! fragment handed to highlighters during a re-highlight pass.
//!
//! Invariants kept by every operation:
//! - run lengths sum to the text length (in chars)
//! - no run is empty
//! - adjacent runs never carry equal attribute sets

use crate::attributes::AttributeSet;
use crate::error::{Result, StyleError};
use crate::range::TextRange;

/// A maximal stretch of text sharing one attribute set
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRun {
    /// Length in chars
    pub len: usize,
    pub attributes: AttributeSet,
}

/// Text with per-range attributes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    /// Cached char count of `text`
    len: usize,
    runs: Vec<AttributeRun>,
}

impl StyledText {
    /// Create styled text carrying one attribute set throughout
    pub fn new(text: impl Into<String>, attributes: AttributeSet) -> Self {
        let text = text.into();
        let len = text.chars().count();
        let runs = if len == 0 {
            Vec::new()
        } else {
            vec![AttributeRun { len, attributes }]
        };
        Self { text, len, runs }
    }

    /// The plain text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if there is no text
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The attribute runs, in text order
    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    /// Iterate runs along with the range each one covers
    pub fn iter_runs(&self) -> impl Iterator<Item = (TextRange, &AttributeSet)> {
        self.runs.iter().scan(0usize, |start, run| {
            let range = TextRange::new(*start, run.len);
            *start += run.len;
            Some((range, &run.attributes))
        })
    }

    /// Fail unless `range` lies within the text
    pub fn check_range(&self, range: TextRange) -> Result<()> {
        if range.fits(self.len) {
            Ok(())
        } else {
            Err(StyleError::OutOfRange {
                range,
                len: self.len,
            })
        }
    }

    /// The substring covered by `range`, if it lies within the text
    pub fn slice(&self, range: TextRange) -> Option<&str> {
        if !range.fits(self.len) {
            return None;
        }
        let start = self.byte_offset(range.location);
        let end = self.byte_offset(range.end());
        Some(&self.text[start..end])
    }

    /// Attributes at `position` and the run containing it
    pub fn attributes_at(&self, position: usize) -> Result<(&AttributeSet, TextRange)> {
        self.iter_runs()
            .find(|(range, _)| range.contains(position))
            .map(|(range, attrs)| (attrs, range))
            .ok_or(StyleError::PositionOutOfRange {
                position,
                len: self.len,
            })
    }

    /// Overwrite the attributes over `range`
    pub fn set_attributes(&mut self, attributes: &AttributeSet, range: TextRange) -> Result<()> {
        self.check_range(range)?;
        if range.is_empty() {
            return Ok(());
        }
        let (first, last) = self.split_range(range);
        self.runs.splice(
            first..last,
            [AttributeRun {
                len: range.length,
                attributes: attributes.clone(),
            }],
        );
        self.normalize();
        Ok(())
    }

    /// Merge `attributes` onto every run over `range`
    pub fn add_attributes(&mut self, attributes: &AttributeSet, range: TextRange) -> Result<()> {
        self.check_range(range)?;
        if range.is_empty() || attributes.is_empty() {
            return Ok(());
        }
        let (first, last) = self.split_range(range);
        for run in &mut self.runs[first..last] {
            run.attributes.merge(attributes);
        }
        self.normalize();
        Ok(())
    }

    /// Replace the text over `range` with `new_text` styled by `attributes`
    pub fn replace(&mut self, range: TextRange, new_text: &str, attributes: &AttributeSet) -> Result<()> {
        self.replace_styled(range, &StyledText::new(new_text, attributes.clone()))
    }

    /// Replace the text over `range` with another styled text, runs included
    pub fn replace_styled(&mut self, range: TextRange, replacement: &StyledText) -> Result<()> {
        self.check_range(range)?;
        let start = self.byte_offset(range.location);
        let end = self.byte_offset(range.end());

        let (first, last) = self.split_range(range);
        self.runs.splice(first..last, replacement.runs.iter().cloned());
        self.text.replace_range(start..end, &replacement.text);
        self.len = self.len - range.length + replacement.len;
        self.normalize();
        Ok(())
    }

    /// Byte offset of char position `pos` (`pos == len` maps to the end)
    fn byte_offset(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    /// Split runs so `range` starts and ends on run boundaries.
    /// Returns the run index span covering `range`.
    fn split_range(&mut self, range: TextRange) -> (usize, usize) {
        let first = self.split_at(range.location);
        let last = self.split_at(range.end());
        (first, last)
    }

    /// Split the run containing `pos` so a run starts exactly at `pos`.
    /// Returns the index of that run (`runs.len()` when `pos == len`).
    fn split_at(&mut self, pos: usize) -> usize {
        let mut start = 0;
        for i in 0..self.runs.len() {
            let len = self.runs[i].len;
            if pos == start {
                return i;
            }
            if pos < start + len {
                let head = pos - start;
                let tail = AttributeRun {
                    len: len - head,
                    attributes: self.runs[i].attributes.clone(),
                };
                self.runs[i].len = head;
                self.runs.insert(i + 1, tail);
                return i + 1;
            }
            start += len;
        }
        self.runs.len()
    }

    /// Drop empty runs and coalesce equal neighbours
    fn normalize(&mut self) {
        let mut merged: Vec<AttributeRun> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.len == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.attributes == run.attributes => last.len += run.len,
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Color, Font};

    fn red() -> AttributeSet {
        AttributeSet::new().with_foreground(Color::Red)
    }

    fn assert_invariants(text: &StyledText) {
        let total: usize = text.runs().iter().map(|r| r.len).sum();
        assert_eq!(total, text.len());
        assert_eq!(text.len(), text.text().chars().count());
        assert!(text.runs().iter().all(|r| r.len > 0));
        for pair in text.runs().windows(2) {
            assert_ne!(pair[0].attributes, pair[1].attributes);
        }
    }

    #[test]
    fn test_new_empty_has_no_runs() {
        let text = StyledText::new("", AttributeSet::body());
        assert!(text.is_empty());
        assert!(text.runs().is_empty());
    }

    #[test]
    fn test_set_attributes_splits_and_merges() {
        let mut text = StyledText::new("hello world", AttributeSet::body());
        text.set_attributes(&red(), TextRange::new(6, 5)).unwrap();
        assert_eq!(text.runs().len(), 2);
        assert_invariants(&text);

        let (attrs, range) = text.attributes_at(8).unwrap();
        assert_eq!(attrs, &red());
        assert_eq!(range, TextRange::new(6, 5));

        // Setting the body style back coalesces into one run again
        text.set_attributes(&AttributeSet::body(), TextRange::new(6, 5)).unwrap();
        assert_eq!(text.runs().len(), 1);
        assert_invariants(&text);
    }

    #[test]
    fn test_add_attributes_merges_per_run() {
        let mut text = StyledText::new("abcdef", AttributeSet::body());
        text.set_attributes(&red(), TextRange::new(0, 3)).unwrap();
        let italic = AttributeSet::new().with_font(Font::body().with_italic());
        text.add_attributes(&italic, TextRange::new(2, 2)).unwrap();
        assert_invariants(&text);

        let (at2, _) = text.attributes_at(2).unwrap();
        assert_eq!(at2.foreground(), Some(Color::Red));
        assert!(at2.font().unwrap().italic);

        let (at3, _) = text.attributes_at(3).unwrap();
        assert_eq!(at3.foreground(), None);
        assert!(at3.font().unwrap().italic);

        let (at4, _) = text.attributes_at(4).unwrap();
        assert!(!at4.font().unwrap().italic);
    }

    #[test]
    fn test_replace_counts_chars_not_bytes() {
        let mut text = StyledText::new("héllo", AttributeSet::body());
        text.replace(TextRange::new(1, 1), "ee", &red()).unwrap();
        assert_eq!(text.text(), "heello");
        assert_eq!(text.len(), 6);
        assert_eq!(text.attributes_at(2).unwrap().1, TextRange::new(1, 2));
        assert_eq!(text.slice(TextRange::new(1, 3)), Some("eel"));
        assert_invariants(&text);
    }

    #[test]
    fn test_replace_styled_keeps_replacement_runs() {
        let mut replacement = StyledText::new("xyz", AttributeSet::body());
        replacement.set_attributes(&red(), TextRange::new(1, 1)).unwrap();

        let mut text = StyledText::new("ab", AttributeSet::body());
        text.replace_styled(TextRange::new(1, 0), &replacement).unwrap();
        assert_eq!(text.text(), "axyzb");
        assert_eq!(text.attributes_at(2).unwrap(), (&red(), TextRange::new(2, 1)));
        assert_invariants(&text);
    }

    #[test]
    fn test_out_of_range_leaves_text_untouched() {
        let mut text = StyledText::new("abc", AttributeSet::body());
        let before = text.clone();
        assert!(text.replace(TextRange::new(2, 2), "x", &red()).is_err());
        assert!(text.set_attributes(&red(), TextRange::new(4, 0)).is_err());
        assert!(text.attributes_at(3).is_err());
        assert_eq!(text, before);
    }

    #[test]
    fn test_delete_everything() {
        let mut text = StyledText::new("abc", AttributeSet::body());
        text.replace(TextRange::full(3), "", &red()).unwrap();
        assert!(text.is_empty());
        assert!(text.runs().is_empty());
    }
}
