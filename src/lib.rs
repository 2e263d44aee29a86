//! mdstyle - markdown re-styling of plain text
//!
//! A [`HighlightingTextStore`] holds plain text plus attribute runs. Every
//! edit re-runs an ordered chain of regex highlighters over the whole
//! document, so the styling always reflects the current text.
//!
//! ```
//! use mdstyle::{HighlightingTextStore, MarkdownAttributes, TextRange};
//!
//! let mut store = HighlightingTextStore::markdown(MarkdownAttributes::default())?;
//! store.replace(TextRange::new(0, 0), "# Title\n\nSome *text*.")?;
//! let (attributes, _) = store.attributes_at(0)?;
//! assert!(attributes.font().is_some_and(|font| font.bold));
//! # Ok::<(), mdstyle::StyleError>(())
//! ```

pub mod attributes;
pub mod buffer;
pub mod config;
pub mod error;
pub mod highlight;
pub mod range;
pub mod store;
pub mod text;

pub use attributes::{AttributeKey, AttributeSet, AttributeValue, Color, Font, LineStyle, LinkTarget};
pub use buffer::{StyledTextBuffer, TextEdit};
pub use config::{MarkdownAttributes, StyleConfig};
pub use error::{Result, StyleError};
pub use highlight::{AttributeMerge, Highlighter};
pub use range::TextRange;
pub use store::HighlightingTextStore;
pub use text::{AttributeRun, StyledText};
