use std::fmt::Write;

use crate::notes::model::Node;

/// Serialize a whole (possibly section-reduced) tree to HTML. Block-level
/// children are separated by newlines; inline content is emitted as-is.
pub fn to_html(root: &Node) -> String {
    match root.children() {
        Some(children) => join_blocks(children),
        None => fragment(root),
    }
}

/// Serialize a single subtree to an HTML fragment. This is the conversion
/// the homework extractor uses for individual list-item children.
pub fn fragment(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Convert a flat markdown field (transcript, description) straight to HTML.
/// No tree, no section logic; the pipeline's structured path never goes
/// through here.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    pulldown_cmark::html::push_html(&mut out, pulldown_cmark::Parser::new(markdown));
    out
}

fn join_blocks(children: &[Node]) -> String {
    let mut out = String::new();
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        write_node(child, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Root { children } => out.push_str(&join_blocks(children)),
        Node::Heading { depth, children } => {
            write!(out, "<h{depth}>").unwrap();
            write_inline(children, out);
            write!(out, "</h{depth}>").unwrap();
        }
        Node::Paragraph { children } => {
            out.push_str("<p>");
            write_inline(children, out);
            out.push_str("</p>");
        }
        Node::List { ordered, children } => {
            let tag = if *ordered { "ol" } else { "ul" };
            write!(out, "<{tag}>").unwrap();
            for item in children {
                out.push('\n');
                write_node(item, out);
            }
            write!(out, "\n</{tag}>").unwrap();
        }
        Node::ListItem { children } => {
            out.push_str("<li>");
            // tight-list style: direct paragraph children render bare
            for (i, child) in children.iter().enumerate() {
                match child {
                    Node::Paragraph { children } => write_inline(children, out),
                    other => {
                        if i > 0 {
                            out.push('\n');
                        }
                        write_node(other, out);
                    }
                }
            }
            out.push_str("</li>");
        }
        Node::Blockquote { children } => {
            out.push_str("<blockquote>\n");
            out.push_str(&join_blocks(children));
            out.push_str("\n</blockquote>");
        }
        Node::Link {
            url,
            title,
            children,
        } => {
            write!(out, r#"<a href="{}""#, escape_html(url)).unwrap();
            if let Some(title) = title {
                write!(out, r#" title="{}""#, escape_html(title)).unwrap();
            }
            out.push('>');
            write_inline(children, out);
            out.push_str("</a>");
        }
        Node::Emphasis { children } => {
            out.push_str("<em>");
            write_inline(children, out);
            out.push_str("</em>");
        }
        Node::Strong { children } => {
            out.push_str("<strong>");
            write_inline(children, out);
            out.push_str("</strong>");
        }
        Node::Image { url, alt } => {
            write!(
                out,
                r#"<img src="{}" alt="{}">"#,
                escape_html(url),
                escape_html(alt)
            )
            .unwrap();
        }
        Node::CodeBlock { lang, value } => match lang {
            Some(lang) => write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(value)
            )
            .unwrap(),
            None => write!(out, "<pre><code>{}</code></pre>", escape_html(value)).unwrap(),
        },
        Node::InlineCode { value } => {
            write!(out, "<code>{}</code>", escape_html(value)).unwrap();
        }
        Node::Text { value } => out.push_str(&escape_html(value)),
        Node::Html { value } => out.push_str(value),
        Node::Break => out.push_str("<br>"),
        Node::ThematicBreak => out.push_str("<hr>"),
    }
}

fn write_inline(children: &[Node], out: &mut String) {
    for child in children {
        write_node(child, out);
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
