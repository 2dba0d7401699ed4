//! Tag classification tables.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Elements thrown away entirely (replaced by an empty text leaf)
pub const DISCARD_TAGS: &[&str] = &["source"];

/// Elements that become paragraphs
pub const PARAGRAPH_TAGS: &[&str] = &["p", "li"];

/// Elements that become generic block containers
pub const BLOCK_CONTAINER_TAGS: &[&str] = &[
    "div", "blockquote", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "footer",
];

/// Elements that become generic inline containers
pub const INLINE_CONTAINER_TAGS: &[&str] = &["span", "strong", "em", "u", "s", "code"];

/// Category of an element tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagClass {
    Discard,
    ParagraphLike,
    BlockContainer,
    InlineContainer,
    /// Everything else, including `img` and `a` which have dedicated rules
    Unclassified,
}

static CLASSES: Lazy<HashMap<&'static str, TagClass>> = Lazy::new(|| {
    let tables = [
        (DISCARD_TAGS, TagClass::Discard),
        (PARAGRAPH_TAGS, TagClass::ParagraphLike),
        (BLOCK_CONTAINER_TAGS, TagClass::BlockContainer),
        (INLINE_CONTAINER_TAGS, TagClass::InlineContainer),
    ];

    let mut classes = HashMap::new();
    for (tags, class) in tables {
        for tag in tags {
            // Earlier tables win, matching rule order
            classes.entry(*tag).or_insert(class);
        }
    }
    classes
});

/// Classify a tag name. Total: unknown tags are `Unclassified`.
pub fn classify(tag: &str) -> TagClass {
    let tag = tag.to_ascii_lowercase();
    CLASSES
        .get(tag.as_str())
        .copied()
        .unwrap_or(TagClass::Unclassified)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tables() {
        assert_eq!(classify("source"), TagClass::Discard);
        assert_eq!(classify("p"), TagClass::ParagraphLike);
        assert_eq!(classify("li"), TagClass::ParagraphLike);
        assert_eq!(classify("blockquote"), TagClass::BlockContainer);
        assert_eq!(classify("h6"), TagClass::BlockContainer);
        assert_eq!(classify("footer"), TagClass::BlockContainer);
        assert_eq!(classify("code"), TagClass::InlineContainer);
        assert_eq!(classify("s"), TagClass::InlineContainer);
    }

    #[test]
    fn test_unclassified() {
        assert_eq!(classify("img"), TagClass::Unclassified);
        assert_eq!(classify("a"), TagClass::Unclassified);
        assert_eq!(classify("table"), TagClass::Unclassified);
        assert_eq!(classify(""), TagClass::Unclassified);
        assert_eq!(classify("h7"), TagClass::Unclassified);
    }

    #[test]
    fn test_classify_ignores_case() {
        assert_eq!(classify("DIV"), TagClass::BlockContainer);
        assert_eq!(classify("Strong"), TagClass::InlineContainer);
    }
}
