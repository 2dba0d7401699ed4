//! Markup serialization
//!
//! Converts a document tree into HTML markup. Serialization is children-first:
//! a node's children are rendered to markup before the rule for the node
//! itself runs. The output mirrors the tree's nesting but does not preserve
//! the pasted HTML it came from (container kinds and link targets are lost).

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::ast::{Block, BlockType, Document, Inline, InlineType, Node, Text};
use crate::options::{LinkStyle, Options};
use crate::SerializeError;

/// Serialize a document to a markup string
pub fn serialize(document: &Document, options: &Options) -> Result<String, SerializeError> {
    let mut output = String::with_capacity(256);
    for node in &document.nodes {
        output.push_str(&serialize_node(node, options)?);
    }
    Ok(output)
}

/// Serialize a single node (and its subtree)
pub fn serialize_node(node: &Node, options: &Options) -> Result<String, SerializeError> {
    match node {
        Node::Text(text) => Ok(serialize_text(text, options)),
        Node::Block(block) => {
            let children = if options.schema.is_void(&block.block_type) {
                String::new()
            } else {
                serialize_children(&block.nodes, options)?
            };
            serialize_block(block, &children, options)
        }
        Node::Inline(inline) => {
            let children = serialize_children(&inline.nodes, options)?;
            serialize_inline(inline, &children, options)
        }
    }
}

/// Element tag a node renders as, or `None` when no rule covers its type.
///
/// Text leaves have no tag of their own.
pub fn render_tag(node: &Node, options: &Options) -> Option<&'static str> {
    match node {
        Node::Block(block) => block_tag(&block.block_type),
        Node::Inline(inline) => inline_tag(&inline.inline_type, options),
        Node::Text(_) => None,
    }
}

fn block_tag(block_type: &BlockType) -> Option<&'static str> {
    match block_type {
        BlockType::Div => Some("div"),
        BlockType::Paragraph => Some("p"),
        BlockType::Image => Some("img"),
        BlockType::Other(_) => None,
    }
}

fn inline_tag(inline_type: &InlineType, options: &Options) -> Option<&'static str> {
    match inline_type {
        InlineType::Span => Some("span"),
        InlineType::Link => match options.link_style {
            LinkStyle::Span => Some("span"),
            LinkStyle::Anchor => Some("a"),
        },
        InlineType::Other(_) => None,
    }
}

fn serialize_children(nodes: &[Node], options: &Options) -> Result<String, SerializeError> {
    nodes
        .iter()
        .map(|node| serialize_node(node, options))
        .collect()
}

fn serialize_block(
    block: &Block,
    children: &str,
    options: &Options,
) -> Result<String, SerializeError> {
    let tag = block_tag(&block.block_type)
        .ok_or_else(|| SerializeError::unsupported("block", block.block_type.as_str()))?;

    let mut out = String::with_capacity(children.len() + 16);
    match block.block_type {
        BlockType::Image => {
            let attrs: Vec<(&str, &str)> =
                block.src().map(|src| ("src", src)).into_iter().collect();
            write_void(&mut out, tag, &attrs);
        }
        _ if options.schema.is_void(&block.block_type) => write_void(&mut out, tag, &[]),
        _ => write_element(&mut out, tag, &[], children),
    }
    Ok(out)
}

fn serialize_inline(
    inline: &Inline,
    children: &str,
    options: &Options,
) -> Result<String, SerializeError> {
    let tag = inline_tag(&inline.inline_type, options)
        .ok_or_else(|| SerializeError::unsupported("inline", inline.inline_type.as_str()))?;

    let mut out = String::with_capacity(children.len() + 16);
    if tag == "a" {
        let attrs: Vec<(&str, &str)> =
            inline.href().map(|href| ("href", href)).into_iter().collect();
        write_element(&mut out, tag, &attrs, children);
    } else {
        write_element(&mut out, tag, &[], children);
    }
    Ok(out)
}

fn serialize_text(text: &Text, options: &Options) -> String {
    let mut out = String::with_capacity(text.text.len());
    if options.line_breaks {
        for (i, line) in text.text.split('\n').enumerate() {
            if i > 0 {
                out.push_str("<br/>");
            }
            out.push_str(&encode_text(line));
        }
    } else {
        out.push_str(&encode_text(&text.text));
    }

    // Every mark, whatever its kind, becomes a plain span
    for _ in &text.marks {
        let mut wrapped = String::with_capacity(out.len() + 13);
        write_element(&mut wrapped, "span", &[], &out);
        out = wrapped;
    }
    out
}

fn write_attrs(out: &mut String, attrs: &[(&str, &str)]) {
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
}

fn write_element(out: &mut String, tag: &str, attrs: &[(&str, &str)], children: &str) {
    out.push('<');
    out.push_str(tag);
    write_attrs(out, attrs);
    out.push('>');
    out.push_str(children);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn write_void(out: &mut String, tag: &str, attrs: &[(&str, &str)]) {
    out.push('<');
    out.push_str(tag);
    write_attrs(out, attrs);
    out.push_str("/>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Mark, Text};
    use crate::schema::Schema;

    fn p(nodes: Vec<Node>) -> Node {
        Block::paragraph(nodes).into()
    }

    fn ser(nodes: Vec<Node>) -> String {
        serialize(&Document::new(nodes), &Options::default()).unwrap()
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(ser(vec![p(vec![Node::text("Hello")])]), "<p>Hello</p>");
    }

    #[test]
    fn test_div_with_paragraph_and_image() {
        let doc = vec![Block::div(vec![
            p(vec![Node::text("Hello")]),
            Block::image(Some("x.png")).into(),
        ])
        .into()];
        insta::assert_snapshot!(ser(doc), @r#"<div><p>Hello</p><img src="x.png"/></div>"#);
    }

    #[test]
    fn test_image_ignores_children_and_missing_src() {
        let mut image = Block::image(None);
        image.nodes.push(Node::text("ignored"));
        assert_eq!(ser(vec![image.into()]), "<img/>");
    }

    #[test]
    fn test_link_renders_as_span_by_default() {
        let link = Inline::link(Some("https://example.com"), vec![Node::text("here")]);
        assert_eq!(ser(vec![p(vec![link.into()])]), "<p><span>here</span></p>");
    }

    #[test]
    fn test_link_anchor_style() {
        let options = Options {
            link_style: LinkStyle::Anchor,
            ..Default::default()
        };
        let link = Inline::link(Some("https://example.com/?a=1&b=2"), vec![Node::text("here")]);
        let doc = Document::new(vec![p(vec![link.into()])]);
        assert_eq!(
            serialize(&doc, &options).unwrap(),
            "<p><a href=\"https://example.com/?a=1&amp;b=2\">here</a></p>"
        );
    }

    #[test]
    fn test_marks_wrap_in_spans() {
        let text = Text::with_marks("bold", vec![Mark::Bold, Mark::Italic]);
        assert_eq!(
            ser(vec![p(vec![text.into()])]),
            "<p><span><span>bold</span></span></p>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            ser(vec![p(vec![Node::text("a < b & c")])]),
            "<p>a &lt; b &amp; c</p>"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(ser(vec![p(vec![Node::text("a\nb")])]), "<p>a<br/>b</p>");

        let options = Options {
            line_breaks: false,
            ..Default::default()
        };
        let doc = Document::new(vec![p(vec![Node::text("a\nb")])]);
        assert_eq!(serialize(&doc, &options).unwrap(), "<p>a\nb</p>");
    }

    #[test]
    fn test_empty_text_contributes_nothing() {
        assert_eq!(ser(vec![Block::div(vec![Node::text("")]).into()]), "<div></div>");
    }

    #[test]
    fn test_unknown_block_type_fails() {
        let doc = Document::new(vec![
            Block::new(BlockType::Other("heading".into()), vec![]).into(),
        ]);
        let err = serialize(&doc, &Options::default()).unwrap_err();
        assert_eq!(
            err,
            SerializeError::Unsupported {
                object: "block",
                node_type: "heading".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_inline_nested_fails() {
        let inline = Inline::new(InlineType::Other("mention".into()), vec![]);
        let doc = Document::new(vec![p(vec![inline.into()])]);
        assert!(serialize(&doc, &Options::default()).is_err());
    }

    #[test]
    fn test_custom_void_block() {
        let options = Options {
            schema: Schema::default().with_void(BlockType::Div),
            ..Default::default()
        };
        let doc = Document::new(vec![Block::div(vec![Node::text("x")]).into()]);
        assert_eq!(serialize(&doc, &options).unwrap(), "<div/>");
    }

    #[test]
    fn test_render_tag() {
        let options = Options::default();
        assert_eq!(render_tag(&p(vec![]), &options), Some("p"));
        assert_eq!(
            render_tag(&Inline::link(None, vec![]).into(), &options),
            Some("span")
        );
        assert_eq!(
            render_tag(&Block::new(BlockType::Other("x".into()), vec![]).into(), &options),
            None
        );
        assert_eq!(render_tag(&Node::text("t"), &options), None);
    }
}
