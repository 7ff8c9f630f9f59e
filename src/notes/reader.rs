use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};
use scraper::{Html, node::Node as DomNode};

use crate::notes::errors::NotesError;
use crate::notes::model::Node;

/// Parse raw show notes into a normalized document tree.
///
/// Authors paste either markdown or HTML into the hosting dashboard, so the
/// grammar is picked by a leading-character heuristic: trimmed input that
/// starts with `<` is HTML, everything else is markdown. Both branches
/// produce the same [`Node`] shape.
pub fn parse(raw: &str) -> Result<Node, NotesError> {
    if raw.trim_start().starts_with('<') {
        parse_html(raw)
    } else {
        Ok(parse_markdown(raw))
    }
}

// ---------------------------------------------------------------------------
// markdown grammar
// ---------------------------------------------------------------------------

fn parse_markdown(raw: &str) -> Node {
    let mut builder = TreeBuilder::new();
    for event in Parser::new(raw) {
        builder.event(event);
    }
    builder.finish()
}

/// Stack-based tree builder over the pulldown event stream. `Start` pushes a
/// container, `End` pops it and attaches it to the container below.
struct TreeBuilder {
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::Root {
                children: Vec::new(),
            }],
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.attach(Node::text(text.into_string())),
            Event::Code(code) => self.attach(Node::InlineCode {
                value: code.into_string(),
            }),
            Event::Html(html) | Event::InlineHtml(html) => self.attach(Node::Html {
                value: html.into_string(),
            }),
            Event::SoftBreak => self.attach(Node::text("\n")),
            Event::HardBreak => self.attach(Node::Break),
            Event::Rule => self.attach(Node::ThematicBreak),
            // Footnotes, math, task markers and the like are not enabled on
            // the parser; anything that still slips through is dropped.
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let node = match tag {
            Tag::Paragraph => Node::Paragraph {
                children: Vec::new(),
            },
            Tag::Heading { level, .. } => Node::Heading {
                depth: heading_depth(level),
                children: Vec::new(),
            },
            Tag::BlockQuote(_) => Node::Blockquote {
                children: Vec::new(),
            },
            Tag::List(start) => Node::List {
                ordered: start.is_some(),
                children: Vec::new(),
            },
            Tag::Item => Node::ListItem {
                children: Vec::new(),
            },
            Tag::Emphasis => Node::Emphasis {
                children: Vec::new(),
            },
            Tag::Strong => Node::Strong {
                children: Vec::new(),
            },
            Tag::Link {
                dest_url, title, ..
            } => Node::Link {
                url: dest_url.into_string(),
                title: (!title.is_empty()).then(|| title.into_string()),
                children: Vec::new(),
            },
            Tag::Image { dest_url, .. } => Node::Image {
                url: dest_url.into_string(),
                alt: String::new(),
            },
            Tag::CodeBlock(kind) => Node::CodeBlock {
                lang: fence_language(&kind),
                value: String::new(),
            },
            // HtmlBlock and any other wrapper act as transparent frames:
            // their children are hoisted into the surrounding container.
            _ => Node::Root {
                children: Vec::new(),
            },
        };
        self.stack.push(node);
    }

    fn end(&mut self, _tag: TagEnd) {
        let node = self
            .stack
            .pop()
            .unwrap_or_else(|| unreachable!("pulldown emits balanced start/end tags"));
        match node {
            // transparent frame: splice children through
            Node::Root { children } => {
                for child in children {
                    self.attach(child);
                }
            }
            // pulldown leaves tight-list item content bare; normalize to the
            // paragraph-wrapped shape loose items (and mdast) have, so the
            // extractors see one contract
            Node::ListItem { children } => self.attach(Node::ListItem {
                children: into_blocks(children),
            }),
            other => self.attach(other),
        }
    }

    /// Attach a finished node to the container on top of the stack, merging
    /// adjacent text nodes the way mdast normalizes them.
    fn attach(&mut self, node: Node) {
        let top = self
            .stack
            .last_mut()
            .unwrap_or_else(|| unreachable!("root frame is never popped by events"));
        match top {
            // alt text of an image under construction
            Node::Image { alt, .. } => {
                if let Node::Text { value } = node {
                    alt.push_str(&value);
                }
            }
            // literal content of a code block under construction
            Node::CodeBlock { value, .. } => {
                if let Node::Text { value: text } = node {
                    value.push_str(&text);
                }
            }
            _ => {
                let children = top
                    .children_mut()
                    .unwrap_or_else(|| unreachable!("only containers are pushed as frames"));
                if let (Some(Node::Text { value: last }), Node::Text { value }) =
                    (children.last_mut(), &node)
                {
                    last.push_str(value);
                } else {
                    children.push(node);
                }
            }
        }
    }

    fn finish(mut self) -> Node {
        self.stack
            .pop()
            .unwrap_or_else(|| unreachable!("root frame always present"))
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn fence_language(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => {
            let lang = info.split_whitespace().next().unwrap_or_default();
            (!lang.is_empty()).then(|| lang.to_string())
        }
        CodeBlockKind::Indented => None,
    }
}

// ---------------------------------------------------------------------------
// HTML grammar
// ---------------------------------------------------------------------------

fn parse_html(raw: &str) -> Result<Node, NotesError> {
    let dom = Html::parse_document(raw);
    let mut children = Vec::new();
    collect_dom(dom.tree.root(), &mut children);
    Ok(Node::Root {
        children: into_blocks(children),
    })
}

fn collect_dom(node: ego_tree::NodeRef<'_, DomNode>, out: &mut Vec<Node>) {
    for child in node.children() {
        match child.value() {
            DomNode::Text(text) => out.push(Node::text(text.to_string())),
            DomNode::Element(el) => {
                let name = el.name().to_ascii_lowercase();
                convert_element(child, &name, out);
            }
            _ => {}
        }
    }
}

fn convert_element(
    node: ego_tree::NodeRef<'_, DomNode>,
    name: &str,
    out: &mut Vec<Node>,
) {
    let element = match node.value() {
        DomNode::Element(el) => el,
        _ => return,
    };
    match name {
        "head" | "script" | "style" | "template" | "title" => {}
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let depth = name.as_bytes()[1] - b'0';
            out.push(Node::Heading {
                depth,
                children: clean_inline(dom_children(node)),
            });
        }
        "p" => out.push(Node::Paragraph {
            children: clean_inline(dom_children(node)),
        }),
        "ul" | "ol" => {
            let mut items = Vec::new();
            for child in node.children() {
                if let DomNode::Element(el) = child.value() {
                    if el.name().eq_ignore_ascii_case("li") {
                        items.push(Node::ListItem {
                            children: into_blocks(dom_children(child)),
                        });
                    }
                }
            }
            out.push(Node::List {
                ordered: name == "ol",
                children: items,
            });
        }
        "blockquote" => out.push(Node::Blockquote {
            children: into_blocks(dom_children(node)),
        }),
        "a" => out.push(Node::Link {
            url: element.attr("href").unwrap_or_default().to_string(),
            title: element.attr("title").map(str::to_string),
            children: clean_inline(dom_children(node)),
        }),
        "em" | "i" => out.push(Node::Emphasis {
            children: clean_inline(dom_children(node)),
        }),
        "strong" | "b" => out.push(Node::Strong {
            children: clean_inline(dom_children(node)),
        }),
        "pre" => out.push(Node::CodeBlock {
            lang: None,
            value: text_content(node),
        }),
        "code" => out.push(Node::InlineCode {
            value: text_content(node),
        }),
        "img" => out.push(Node::Image {
            url: element.attr("src").unwrap_or_default().to_string(),
            alt: element.attr("alt").unwrap_or_default().to_string(),
        }),
        "br" => out.push(Node::Break),
        "hr" => out.push(Node::ThematicBreak),
        // unknown wrappers (div, span, html, body, ...) are transparent
        _ => collect_dom(node, out),
    }
}

fn dom_children(node: ego_tree::NodeRef<'_, DomNode>) -> Vec<Node> {
    let mut out = Vec::new();
    collect_dom(node, &mut out);
    out
}

fn text_content(node: ego_tree::NodeRef<'_, DomNode>) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        if let DomNode::Text(text) = descendant.value() {
            out.push_str(&text);
        }
    }
    out
}

fn is_inline(node: &Node) -> bool {
    matches!(
        node,
        Node::Text { .. }
            | Node::Link { .. }
            | Node::Emphasis { .. }
            | Node::Strong { .. }
            | Node::InlineCode { .. }
            | Node::Image { .. }
            | Node::Html { .. }
            | Node::Break
    )
}

fn is_blank_text(node: &Node) -> bool {
    node.text_value().is_some_and(|v| v.trim().is_empty())
}

/// Group runs of inline content into paragraphs. Both grammars funnel
/// through this: HTML element children and tight markdown list items arrive
/// with bare inline nodes, and downstream consumers expect the
/// paragraph-wrapped shape. Whitespace-only text between blocks (source
/// formatting) is dropped.
fn into_blocks(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::new();
    let mut run: Vec<Node> = Vec::new();
    for node in children {
        if is_inline(&node) {
            run.push(node);
        } else {
            flush_run(&mut run, &mut out);
            out.push(node);
        }
    }
    flush_run(&mut run, &mut out);
    out
}

fn flush_run(run: &mut Vec<Node>, out: &mut Vec<Node>) {
    let children = clean_inline(std::mem::take(run));
    if !children.is_empty() {
        out.push(Node::Paragraph { children });
    }
}

/// Trim source-formatting whitespace from an inline sequence: blank edge
/// text nodes go away, the first and last text nodes lose their outer
/// whitespace, and adjacent text nodes merge.
fn clean_inline(children: Vec<Node>) -> Vec<Node> {
    let mut merged: Vec<Node> = Vec::new();
    for node in children {
        if let (Some(Node::Text { value: last }), Node::Text { value }) =
            (merged.last_mut(), &node)
        {
            last.push_str(value);
        } else {
            merged.push(node);
        }
    }
    while merged.first().is_some_and(is_blank_text) {
        merged.remove(0);
    }
    while merged.last().is_some_and(is_blank_text) {
        merged.pop();
    }
    if let Some(Node::Text { value }) = merged.first_mut() {
        *value = value.trim_start().to_string();
    }
    if let Some(Node::Text { value }) = merged.last_mut() {
        *value = value.trim_end().to_string();
    }
    merged
}
