//! Markdown style configuration
//!
//! [`MarkdownAttributes`] holds the attributes for every construct and is
//! fully defaulted. A TOML style file (default `~/.mdstyle.toml`) can
//! override individual constructs:
//!
//! ```text
//! # mdstyle configuration
//! superscript-font-ratio = 0.6
//! detect-links = false
//!
//! [default]
//! font-family = "Georgia"
//! font-size = 16
//!
//! [block-quote]
//! foreground = "dark-gray"
//! italic = true
//!
//! [headers.h1]
//! font-size = 28
//! bold = true
//!
//! [inline-code]
//! disabled = true
//! ```
//!
//! A section replaces the attributes of its construct; `disabled = true`
//! turns the construct's highlighting off.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::attributes::{AttributeSet, Color, Font, LineStyle};
use crate::error::{Result, StyleError};
use crate::highlight::{HeaderAttributes, DEFAULT_FONT_RATIO};

/// Attributes for styling each kind of Markdown element
///
/// `None` means "skip this rule", not "apply empty attributes".
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownAttributes {
    /// Base style every re-highlight pass starts from
    pub default_attributes: AttributeSet,
    /// `None` falls back to the default font in bold
    pub strong: Option<AttributeSet>,
    /// `None` falls back to the default font in italics
    pub emphasis: Option<AttributeSet>,
    pub headers: Option<HeaderAttributes>,
    pub code_block: Option<AttributeSet>,
    pub inline_code: Option<AttributeSet>,
    pub block_quote: Option<AttributeSet>,
    pub ordered_list: Option<AttributeSet>,
    pub ordered_list_item: Option<AttributeSet>,
    pub unordered_list: Option<AttributeSet>,
    pub unordered_list_item: Option<AttributeSet>,
    /// Extra attributes layered over the strikethrough style
    pub strikethrough: Option<AttributeSet>,
    /// Font size ratio for superscript text
    pub superscript_font_ratio: Option<f32>,
    /// Whether bare URLs are detected and marked as links
    pub detect_links: bool,
}

impl Default for MarkdownAttributes {
    fn default() -> Self {
        let monospace = AttributeSet::new().with_font(Font::monospace());
        let marker = AttributeSet::new().with_font(Font::body().with_bold());
        let item = AttributeSet::body().with_foreground(Color::DarkGray);
        Self {
            default_attributes: AttributeSet::body(),
            strong: None,
            emphasis: None,
            headers: Some(HeaderAttributes::default()),
            code_block: Some(monospace.clone()),
            inline_code: Some(monospace),
            block_quote: Some(AttributeSet::new().with_foreground(Color::DarkGray)),
            ordered_list: Some(marker.clone()),
            ordered_list_item: Some(item.clone()),
            unordered_list: Some(marker),
            unordered_list_item: Some(item),
            strikethrough: Some(AttributeSet::new()),
            superscript_font_ratio: Some(DEFAULT_FONT_RATIO),
            detect_links: true,
        }
    }
}

impl MarkdownAttributes {
    /// Defaults overlaid with the user's style file, if there is one
    ///
    /// An unreadable or invalid file is reported and ignored.
    pub fn load() -> Self {
        let defaults = Self::default();
        let Some(path) = StyleConfig::config_path() else {
            return defaults;
        };
        if !path.exists() {
            return defaults;
        }
        match StyleConfig::load(&path).and_then(|config| config.apply(defaults.clone())) {
            Ok(attributes) => attributes,
            Err(err) => {
                log::warn!("ignoring style file {}: {}", path.display(), err);
                defaults
            }
        }
    }
}

/// Style settings for one construct, as written in the style file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleSection {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    #[serde(default)]
    pub disabled: bool,
}

impl StyleSection {
    /// Build the attribute set, deriving any font from `base_font`
    pub fn to_attributes(&self, base_font: &Font) -> Result<AttributeSet> {
        let mut attributes = AttributeSet::new();

        let touches_font = self.font_family.is_some()
            || self.font_size.is_some()
            || self.bold.is_some()
            || self.italic.is_some();
        if touches_font {
            let mut font = base_font.clone();
            if let Some(family) = &self.font_family {
                font.family = family.clone();
            }
            if let Some(size) = self.font_size {
                font.size = size;
            }
            if let Some(bold) = self.bold {
                font.bold = bold;
            }
            if let Some(italic) = self.italic {
                font.italic = italic;
            }
            attributes = attributes.with_font(font);
        }

        if let Some(name) = &self.foreground {
            attributes = attributes.with_foreground(parse_color(name)?);
        }
        if let Some(name) = &self.background {
            attributes = attributes.with_background(parse_color(name)?);
        }
        if self.underline == Some(true) {
            attributes = attributes.with_underline(LineStyle::Single);
        }
        if self.strikethrough == Some(true) {
            attributes = attributes.with_strikethrough(LineStyle::Single);
        }
        Ok(attributes)
    }

    /// The construct's attributes, or `None` when disabled
    fn resolve(&self, base_font: &Font) -> Result<Option<AttributeSet>> {
        if self.disabled {
            Ok(None)
        } else {
            self.to_attributes(base_font).map(Some)
        }
    }
}

/// Header sections, one per level
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HeaderSections {
    #[serde(default)]
    pub disabled: bool,
    pub h1: Option<StyleSection>,
    pub h2: Option<StyleSection>,
    pub h3: Option<StyleSection>,
    pub h4: Option<StyleSection>,
    pub h5: Option<StyleSection>,
    pub h6: Option<StyleSection>,
}

impl HeaderSections {
    fn level(&self, level: usize) -> Option<&StyleSection> {
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
}

/// Contents of a style file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleConfig {
    pub superscript_font_ratio: Option<f32>,
    /// `false` turns superscript highlighting off
    pub superscript: Option<bool>,
    pub detect_links: Option<bool>,
    pub default: Option<StyleSection>,
    pub strong: Option<StyleSection>,
    pub emphasis: Option<StyleSection>,
    pub headers: Option<HeaderSections>,
    pub code_block: Option<StyleSection>,
    pub inline_code: Option<StyleSection>,
    pub block_quote: Option<StyleSection>,
    pub ordered_list: Option<StyleSection>,
    pub ordered_list_item: Option<StyleSection>,
    pub unordered_list: Option<StyleSection>,
    pub unordered_list_item: Option<StyleSection>,
    pub strikethrough: Option<StyleSection>,
}

impl StyleConfig {
    /// Get the style file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".mdstyle.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".mdstyle.toml"))
        }
    }

    /// Parse style file contents
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a style file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Overlay these settings on `attributes`
    pub fn apply(&self, mut attributes: MarkdownAttributes) -> Result<MarkdownAttributes> {
        if let Some(section) = &self.default {
            attributes.default_attributes = section.to_attributes(&Font::body())?;
        }
        let base_font = attributes
            .default_attributes
            .font()
            .cloned()
            .unwrap_or_else(Font::body);

        let slots = [
            (&self.strong, &mut attributes.strong),
            (&self.emphasis, &mut attributes.emphasis),
            (&self.code_block, &mut attributes.code_block),
            (&self.inline_code, &mut attributes.inline_code),
            (&self.block_quote, &mut attributes.block_quote),
            (&self.ordered_list, &mut attributes.ordered_list),
            (&self.ordered_list_item, &mut attributes.ordered_list_item),
            (&self.unordered_list, &mut attributes.unordered_list),
            (&self.unordered_list_item, &mut attributes.unordered_list_item),
            (&self.strikethrough, &mut attributes.strikethrough),
        ];
        for (section, slot) in slots {
            if let Some(section) = section {
                *slot = section.resolve(&base_font)?;
            }
        }

        if let Some(sections) = &self.headers {
            if sections.disabled {
                attributes.headers = None;
            } else {
                let headers = attributes.headers.get_or_insert_with(HeaderAttributes::default);
                for level in 1..=6 {
                    if let (Some(section), Some(slot)) = (sections.level(level), headers.level_mut(level)) {
                        *slot = section.resolve(&base_font)?;
                    }
                }
            }
        }

        if let Some(ratio) = self.superscript_font_ratio {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(StyleError::InvalidFontRatio(ratio));
            }
            attributes.superscript_font_ratio = Some(ratio);
        }
        if self.superscript == Some(false) {
            attributes.superscript_font_ratio = None;
        }
        if let Some(detect) = self.detect_links {
            attributes.detect_links = detect;
        }

        Ok(attributes)
    }
}

fn parse_color(name: &str) -> Result<Color> {
    Color::from_name(name).ok_or_else(|| StyleError::InvalidColor(name.to_string()))
}
