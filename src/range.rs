//! Character ranges over styled text
//!
//! Positions count Unicode scalar values (`char`s), not bytes, so a
//! range stays meaningful no matter how the text is encoded.

use std::fmt;

/// A half-open range of characters: `location..location + length`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    /// First character covered
    pub location: usize,
    /// Number of characters covered
    pub length: usize,
}

impl TextRange {
    /// Create a new range
    pub fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// Create a range from start and end positions
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            location: start,
            length: end.saturating_sub(start),
        }
    }

    /// Range covering a whole text of `len` characters
    pub fn full(len: usize) -> Self {
        Self::new(0, len)
    }

    /// One past the last covered position
    pub fn end(&self) -> usize {
        self.location + self.length
    }

    /// Check if the range covers nothing
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if this range contains a position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.location && pos < self.end()
    }

    /// Check if the range fits inside a text of `len` characters
    pub fn fits(&self, len: usize) -> bool {
        self.location
            .checked_add(self.length)
            .is_some_and(|end| end <= len)
    }

    /// Smallest range covering both ranges
    pub fn union(&self, other: &TextRange) -> Self {
        Self::from_bounds(
            self.location.min(other.location),
            self.end().max(other.end()),
        )
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.location, self.end())
    }
}
