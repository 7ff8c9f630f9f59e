use once_cell::sync::Lazy;
use regex::Regex;

use crate::notes::errors::NotesError;
use crate::notes::model::{GuestRecord, Node};

static GUEST_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^guest:?").unwrap());

/// Build the guest record for one guest section.
///
/// The display name comes from the section title with the leading "guest"
/// token (and optional colon) stripped. The section yields at most one
/// record, accumulated across all of its list items. Unlike the resources
/// extractor there is no silent-skip path here: every item must be shaped
/// ListItem -> [Paragraph -> [Text(label), Link -> [Text(value), ..], ..]]
/// and any deviation is fatal.
pub fn collect(title: &str, body: &[Node]) -> Result<Option<GuestRecord>, NotesError> {
    if body.is_empty() {
        return Ok(None);
    }

    let mut record = GuestRecord {
        name: GUEST_PREFIX.replace(title, "").trim().to_string(),
        company: None,
        github: None,
        twitter: None,
    };

    for node in body {
        apply_items(node, title, &mut record)?;
    }
    Ok(Some(record))
}

fn apply_items(node: &Node, section: &str, record: &mut GuestRecord) -> Result<(), NotesError> {
    if let Node::ListItem { children } = node {
        apply_item(children, section, record)?;
    }
    if let Some(children) = node.children() {
        for child in children {
            apply_items(child, section, record)?;
        }
    }
    Ok(())
}

fn apply_item(
    children: &[Node],
    section: &str,
    record: &mut GuestRecord,
) -> Result<(), NotesError> {
    let Some(Node::Paragraph { children: inline }) = children.first() else {
        return Err(NotesError::GuestItemNotParagraph {
            section: section.to_string(),
        });
    };

    let Some(Node::Text { value: label }) = inline.first() else {
        return Err(NotesError::GuestLabelNotText {
            section: section.to_string(),
        });
    };

    let Some(Node::Link {
        children: link_children,
        ..
    }) = inline.get(1)
    else {
        return Err(NotesError::GuestValueNotLink {
            section: section.to_string(),
        });
    };

    let Some(Node::Text { value }) = link_children.first() else {
        return Err(NotesError::GuestLinkTextMissing {
            section: section.to_string(),
        });
    };

    let label = label.to_ascii_lowercase();
    if label.contains("company") {
        record.company = Some(value.clone());
    } else if label.contains("github") {
        record.github = Some(strip_handle(value));
    } else if label.contains("twitter") {
        record.twitter = Some(strip_handle(value));
    }
    // any other label is ignored on purpose
    Ok(())
}

fn strip_handle(value: &str) -> String {
    value.strip_prefix('@').unwrap_or(value).to_string()
}
