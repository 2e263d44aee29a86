//! Link highlighters: bare URL detection and `[text](url)` syntax

use url::Url;

use super::pattern::PatternMatcher;
use super::{AttributeMerge, Highlighter};
use crate::attributes::{AttributeSet, LinkTarget};
use crate::error::Result;
use crate::range::TextRange;
use crate::text::StyledText;

/// Candidate URLs: scheme URLs, mailto addresses and bare `www.` hosts
const URL_PATTERN: &str = r#"(?i)\b(?:(?:https?|ftp)://[^\s<>"]+|mailto:[^\s<>"@]+@[^\s<>"]+|www\.[^\s<>"]+)"#;

/// `[text](url "title")`; group 2 is the destination
const MARKDOWN_LINK_PATTERN: &str =
    r#"\[([^\[]+)\]\([ \t]*<?(.*?)>?[ \t]*(?:"(.*?)"|'(.*?)')?\)"#;

/// Characters that end a sentence rather than a URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', '\'', '"'];

/// Detects URLs in plain text and marks them as links
pub struct LinkHighlighter {
    matcher: PatternMatcher,
}

impl LinkHighlighter {
    /// Create a new link highlighter
    pub fn new() -> Result<Self> {
        Ok(Self {
            matcher: PatternMatcher::new(URL_PATTERN)?,
        })
    }
}

impl Highlighter for LinkHighlighter {
    fn name(&self) -> &str {
        "link"
    }

    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge> {
        let mut merges = Vec::new();
        for m in self.matcher.matches(fragment.text()) {
            let Some(candidate) = fragment.slice(m.range()) else {
                continue;
            };
            let trimmed = trim_url(candidate);
            if trimmed.is_empty() {
                continue;
            }
            match parse_url(trimmed) {
                Some(url) => {
                    let range = TextRange::new(m.range().location, trimmed.chars().count());
                    let attributes = AttributeSet::new().with_link(LinkTarget::Url(url));
                    merges.push(AttributeMerge::new(range, attributes));
                }
                None => log::trace!("skipping unparsable url: {}", trimmed),
            }
        }
        merges
    }
}

/// Strip trailing punctuation and unbalanced closing parens
fn trim_url(candidate: &str) -> &str {
    let mut url = candidate;
    loop {
        if let Some(stripped) = url.strip_suffix(TRAILING_PUNCTUATION) {
            url = stripped;
        } else if url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
            url = &url[..url.len() - 1];
        } else {
            return url;
        }
    }
}

fn parse_url(candidate: &str) -> Option<Url> {
    let has_scheme = candidate.contains(':')
        && !candidate
            .get(..4)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("www."));
    if has_scheme {
        Url::parse(candidate).ok()
    } else {
        Url::parse(&format!("http://{}", candidate)).ok()
    }
}

/// Marks `[text](url)` constructs with their literal destination
///
/// The markup itself is left visible; the link attribute covers the
/// whole construct, brackets and parens included.
pub struct MarkdownLinkHighlighter {
    matcher: PatternMatcher,
}

impl MarkdownLinkHighlighter {
    /// Create a new markdown link highlighter
    pub fn new() -> Result<Self> {
        Ok(Self {
            matcher: PatternMatcher::new(MARKDOWN_LINK_PATTERN)?,
        })
    }
}

impl Highlighter for MarkdownLinkHighlighter {
    fn name(&self) -> &str {
        "markdown_link"
    }

    fn highlight(&self, fragment: &StyledText) -> Vec<AttributeMerge> {
        self.matcher
            .matches(fragment.text())
            .filter_map(|m| {
                let destination = fragment.slice(m.capture(2)?)?;
                let attributes =
                    AttributeSet::new().with_link(LinkTarget::Text(destination.to_string()));
                Some(AttributeMerge::new(m.range(), attributes))
            })
            .collect()
    }
}
