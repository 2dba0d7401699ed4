//! Built-in rules for pasted HTML.

use once_cell::sync::Lazy;
use regex::Regex;

use richpaste_core::{Block, Inline, Node};

use super::{Filter, Rule};
use crate::classify::TagClass;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<!--.*?-->").unwrap());

/// Create the paste rules, in evaluation order
pub fn paste_rules() -> Vec<Rule> {
    vec![
        discard_rule(),
        paragraph_rule(),
        div_rule(),
        span_rule(),
        image_rule(),
        link_rule(),
    ]
}

/// Create the fallback rules for line breaks and text nodes
pub fn text_rules() -> Vec<Rule> {
    vec![line_break_rule(), text_rule()]
}

fn discard_rule() -> Rule {
    Rule::for_class(TagClass::Discard, |node, _| {
        log::debug!("discarding <{}> element", node.tag_name());
        Some(Node::text(""))
    })
}

fn paragraph_rule() -> Rule {
    Rule::for_class(TagClass::ParagraphLike, |node, next| {
        Some(Block::paragraph(next.children(node)).into())
    })
}

fn div_rule() -> Rule {
    Rule::for_class(TagClass::BlockContainer, |node, next| {
        Some(Block::div(next.children(node)).into())
    })
}

fn span_rule() -> Rule {
    Rule::for_class(TagClass::InlineContainer, |node, next| {
        Some(Inline::span(next.children(node)).into())
    })
}

/// Images keep their `src`; any children are ignored
fn image_rule() -> Rule {
    Rule::for_tag("img", |node, _| Some(Block::image(node.attr("src")).into()))
}

fn link_rule() -> Rule {
    Rule::for_tag("a", |node, next| {
        Some(Inline::link(node.attr("href"), next.children(node)).into())
    })
}

fn line_break_rule() -> Rule {
    Rule::for_tag("br", |_, _| Some(Node::text("\n")))
}

fn text_rule() -> Rule {
    Rule::new(Filter::Text, |node, _| {
        let value = node.value();
        if COMMENT_RE.is_match(value) {
            return None;
        }
        Some(Node::text(value))
    })
}
