//! Configuration options for markup serialization

use crate::schema::Schema;

/// How link inlines are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// Render links as plain `<span>`; the target is dropped
    #[default]
    Span,
    /// Render links as `<a href="...">`
    Anchor,
}

/// Options for markup serialization
#[derive(Debug, Clone)]
pub struct Options {
    /// Link style (span or anchor)
    pub link_style: LinkStyle,

    /// Render `\n` inside text leaves as `<br/>`
    pub line_breaks: bool,

    /// Void block declarations
    pub schema: Schema,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            link_style: LinkStyle::Span,
            line_breaks: true,
            schema: Schema::default(),
        }
    }
}
