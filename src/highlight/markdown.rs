//! Markdown ruleset
//!
//! Builds the ordered highlighter list for a [`MarkdownAttributes`]
//! configuration. Block-level rules come before inline ones so that
//! emphasis and code only layer their own keys on top of, say, a block
//! quote's color.
//!
//! Patterns follow markdown.pl v1.0.1, rewritten for an engine without
//! look-around or backreferences.

use super::pattern::PatternHighlighter;
use super::{
    HeaderHighlighter, Highlighter, LinkHighlighter, ListHighlighter, MarkdownLinkHighlighter,
    StrikethroughHighlighter, SuperscriptHighlighter,
};
use crate::attributes::{AttributeSet, Font};
use crate::config::MarkdownAttributes;
use crate::error::Result;

/// Indented (4 spaces or a tab) lines after a blank line or at the start
///
/// The block runs through its trailing blank lines and stops at the
/// first line indented less, or at the end of the text.
pub const CODE_BLOCK_PATTERN: &str = r"(?:\n\n|\A)((?:(?:[ ]{4}|\t).*(?:\n+|\z))+)";

/// Consecutive `>` lines plus their lazy continuation lines
pub const BLOCK_QUOTE_PATTERN: &str = r"(?m)(?:^[ \t]*>[ \t]?.+\n(.+\n)*\n*)+";

/// Text underlined with `=`
pub const SETEXT_H1_PATTERN: &str = r"(?m)^.+[ \t]*\n=+[ \t]*\n+";

/// Text underlined with `-`
pub const SETEXT_H2_PATTERN: &str = r"(?m)^.+[ \t]*\n-+[ \t]*\n+";

/// `*em*` or `_em_`, content starting and ending with non-space
pub const EMPHASIS_PATTERN: &str = r"\*\S(?:.*?\S)??\*|_\S(?:.*?\S)??_";

/// `**strong**` or `__strong__`
pub const STRONG_PATTERN: &str = r"\*\*\S(?:.*?\S)??\*\*|__\S(?:.*?\S)??__";

/// Longest backtick run recognized as an inline code delimiter
pub const MAX_CODE_FENCE: usize = 16;

/// Code spans delimited by equal runs of 1 to [`MAX_CODE_FENCE`] backticks
///
/// Longer runs are tried first, so ```` ```a``b``` ```` is one span.
pub fn inline_code_pattern() -> String {
    (1..=MAX_CODE_FENCE)
        .rev()
        .map(|count| {
            let fence = "`".repeat(count);
            format!(r"{fence}[^`\n](?:.*?[^`\n])??{fence}")
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Build the markdown highlighters in registration order
///
/// Constructs whose attributes are `None` are skipped entirely.
pub fn markdown_highlighters(attributes: &MarkdownAttributes) -> Result<Vec<Box<dyn Highlighter>>> {
    let mut highlighters: Vec<Box<dyn Highlighter>> = Vec::new();

    if let Some(headers) = &attributes.headers {
        highlighters.push(Box::new(HeaderHighlighter::new(headers.clone())?));
    }

    if attributes.detect_links {
        highlighters.push(Box::new(LinkHighlighter::new()?));
    }
    highlighters.push(Box::new(MarkdownLinkHighlighter::new()?));

    if attributes.unordered_list.is_some() || attributes.unordered_list_item.is_some() {
        highlighters.push(Box::new(ListHighlighter::unordered(
            attributes.unordered_list.clone(),
            attributes.unordered_list_item.clone(),
        )?));
    }
    if attributes.ordered_list.is_some() || attributes.ordered_list_item.is_some() {
        highlighters.push(Box::new(ListHighlighter::ordered(
            attributes.ordered_list.clone(),
            attributes.ordered_list_item.clone(),
        )?));
    }

    add_pattern(&mut highlighters, "code_block", CODE_BLOCK_PATTERN, &attributes.code_block)?;
    add_pattern(&mut highlighters, "block_quote", BLOCK_QUOTE_PATTERN, &attributes.block_quote)?;

    let headers = attributes.headers.as_ref();
    add_pattern(
        &mut highlighters,
        "setext_h1",
        SETEXT_H1_PATTERN,
        &headers.and_then(|h| h.h1.clone()),
    )?;
    add_pattern(
        &mut highlighters,
        "setext_h2",
        SETEXT_H2_PATTERN,
        &headers.and_then(|h| h.h2.clone()),
    )?;

    let emphasis = attributes
        .emphasis
        .clone()
        .or_else(|| trait_attributes(&attributes.default_attributes, Font::with_italic));
    add_pattern(&mut highlighters, "emphasis", EMPHASIS_PATTERN, &emphasis)?;

    let strong = attributes
        .strong
        .clone()
        .or_else(|| trait_attributes(&attributes.default_attributes, Font::with_bold));
    add_pattern(&mut highlighters, "strong", STRONG_PATTERN, &strong)?;

    add_pattern(&mut highlighters, "inline_code", &inline_code_pattern(), &attributes.inline_code)?;

    if attributes.strikethrough.is_some() {
        highlighters.push(Box::new(StrikethroughHighlighter::new(
            attributes.strikethrough.clone(),
        )?));
    }

    if let Some(ratio) = attributes.superscript_font_ratio {
        highlighters.push(Box::new(SuperscriptHighlighter::with_font_ratio(ratio)?));
    }

    log::debug!("built {} markdown highlighters", highlighters.len());
    Ok(highlighters)
}

fn add_pattern(
    highlighters: &mut Vec<Box<dyn Highlighter>>,
    name: &str,
    pattern: &str,
    attributes: &Option<AttributeSet>,
) -> Result<()> {
    if let Some(attributes) = attributes {
        highlighters.push(Box::new(PatternHighlighter::new(name, pattern, attributes.clone())?));
    }
    Ok(())
}

/// The default font with a trait applied, when the defaults carry a font
fn trait_attributes(defaults: &AttributeSet, with_trait: fn(Font) -> Font) -> Option<AttributeSet> {
    let font = defaults.font()?.clone();
    Some(AttributeSet::new().with_font(with_trait(font)))
}
