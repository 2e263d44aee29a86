//! Style attribute types
//!
//! An [`AttributeSet`] maps a closed set of [`AttributeKey`]s to typed
//! [`AttributeValue`]s. Highlighters compose by merging sets: keys they
//! set are overwritten, everything else left by earlier highlighters
//! survives.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// Text color: a named system color or an arbitrary RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    /// One third white
    DarkGray,
    /// Half white
    Gray,
    /// Two thirds white
    LightGray,
    White,
    Red,
    Green,
    Blue,
    Cyan,
    Yellow,
    Magenta,
    Orange,
    Purple,
    Brown,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a name (for TOML loading)
    ///
    /// Accepts the named colors in kebab or snake case, with `grey`
    /// spellings, and `#rrggbb` hex triples.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-").replace("grey", "gray");
        if let Some(hex) = name.strip_prefix('#') {
            return parse_hex(hex);
        }
        let color = match name.as_str() {
            "black" => Color::Black,
            "dark-gray" => Color::DarkGray,
            "gray" => Color::Gray,
            "light-gray" => Color::LightGray,
            "white" => Color::White,
            "red" => Color::Red,
            "green" => Color::Green,
            "blue" => Color::Blue,
            "cyan" => Color::Cyan,
            "yellow" => Color::Yellow,
            "magenta" => Color::Magenta,
            "orange" => Color::Orange,
            "purple" => Color::Purple,
            "brown" => Color::Brown,
            _ => return None,
        };
        Some(color)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// A font: family, point size and symbolic traits
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    /// Point size of the body text font
    pub const BODY_SIZE: f32 = 17.0;

    /// Create a plain font
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// The body text font
    pub fn body() -> Self {
        Self::new("System", Self::BODY_SIZE)
    }

    /// Headline font (levels 1-3)
    pub fn headline() -> Self {
        Self::body().with_bold()
    }

    /// Subheadline font (levels 4-6)
    pub fn subheadline() -> Self {
        Self::new("System", 15.0).with_bold()
    }

    /// Monospace font at body size
    pub fn monospace() -> Self {
        Self::new("Menlo", Self::BODY_SIZE)
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set point size
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Same font with its point size multiplied by `ratio`
    pub fn scaled(&self, ratio: f32) -> Self {
        self.clone().with_size(self.size * ratio)
    }
}

/// Line style for strikethrough and underline decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    #[default]
    Single,
    Double,
    Thick,
}

/// Target of a link attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A URL that was detected and parsed
    Url(Url),
    /// The literal destination written in markdown link syntax
    Text(String),
}

impl LinkTarget {
    /// The target as a string
    pub fn as_str(&self) -> &str {
        match self {
            LinkTarget::Url(url) => url.as_str(),
            LinkTarget::Text(text) => text,
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known style attribute keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKey {
    Font,
    ForegroundColor,
    BackgroundColor,
    Link,
    Strikethrough,
    Underline,
    /// Superscript nesting level
    Superscript,
}

/// Value stored under an [`AttributeKey`]
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Font(Font),
    Color(Color),
    Link(LinkTarget),
    Line(LineStyle),
    Level(i32),
}

/// A mapping from attribute keys to values applied over a text range
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeSet {
    entries: BTreeMap<AttributeKey, AttributeValue>,
}

impl AttributeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// The default body style
    pub fn body() -> Self {
        Self::new().with_font(Font::body())
    }

    /// Insert a value, returning the previous one for the key
    pub fn insert(&mut self, key: AttributeKey, value: AttributeValue) -> Option<AttributeValue> {
        self.entries.insert(key, value)
    }

    /// Look up a key
    pub fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.entries.get(&key)
    }

    /// Check if a key is set
    pub fn contains(&self, key: AttributeKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Additive merge: keys in `other` overwrite, all others are kept
    pub fn merge(&mut self, other: &AttributeSet) {
        for (key, value) in &other.entries {
            self.entries.insert(*key, value.clone());
        }
    }

    /// Merge into a copy
    pub fn merged(&self, other: &AttributeSet) -> AttributeSet {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    /// Number of keys set
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no keys are set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (AttributeKey, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// The font, if set
    pub fn font(&self) -> Option<&Font> {
        match self.get(AttributeKey::Font) {
            Some(AttributeValue::Font(font)) => Some(font),
            _ => None,
        }
    }

    /// The foreground color, if set
    pub fn foreground(&self) -> Option<Color> {
        match self.get(AttributeKey::ForegroundColor) {
            Some(AttributeValue::Color(color)) => Some(*color),
            _ => None,
        }
    }

    /// The background color, if set
    pub fn background(&self) -> Option<Color> {
        match self.get(AttributeKey::BackgroundColor) {
            Some(AttributeValue::Color(color)) => Some(*color),
            _ => None,
        }
    }

    /// The link target, if set
    pub fn link(&self) -> Option<&LinkTarget> {
        match self.get(AttributeKey::Link) {
            Some(AttributeValue::Link(target)) => Some(target),
            _ => None,
        }
    }

    /// The strikethrough style, if set
    pub fn strikethrough(&self) -> Option<LineStyle> {
        match self.get(AttributeKey::Strikethrough) {
            Some(AttributeValue::Line(style)) => Some(*style),
            _ => None,
        }
    }

    /// The underline style, if set
    pub fn underline(&self) -> Option<LineStyle> {
        match self.get(AttributeKey::Underline) {
            Some(AttributeValue::Line(style)) => Some(*style),
            _ => None,
        }
    }

    /// The superscript level, if set
    pub fn superscript(&self) -> Option<i32> {
        match self.get(AttributeKey::Superscript) {
            Some(AttributeValue::Level(level)) => Some(*level),
            _ => None,
        }
    }

    /// Builder: set font
    pub fn with_font(mut self, font: Font) -> Self {
        self.insert(AttributeKey::Font, AttributeValue::Font(font));
        self
    }

    /// Builder: set foreground color
    pub fn with_foreground(mut self, color: Color) -> Self {
        self.insert(AttributeKey::ForegroundColor, AttributeValue::Color(color));
        self
    }

    /// Builder: set background color
    pub fn with_background(mut self, color: Color) -> Self {
        self.insert(AttributeKey::BackgroundColor, AttributeValue::Color(color));
        self
    }

    /// Builder: set link target
    pub fn with_link(mut self, target: LinkTarget) -> Self {
        self.insert(AttributeKey::Link, AttributeValue::Link(target));
        self
    }

    /// Builder: set strikethrough
    pub fn with_strikethrough(mut self, style: LineStyle) -> Self {
        self.insert(AttributeKey::Strikethrough, AttributeValue::Line(style));
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self, style: LineStyle) -> Self {
        self.insert(AttributeKey::Underline, AttributeValue::Line(style));
        self
    }

    /// Builder: set superscript level
    pub fn with_superscript(mut self, level: i32) -> Self {
        self.insert(AttributeKey::Superscript, AttributeValue::Level(level));
        self
    }
}
