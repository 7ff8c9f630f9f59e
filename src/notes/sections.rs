use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use crate::notes::errors::NotesError;
use crate::notes::model::Node;

/// A titled span of the document: the depth-3 heading at `start` plus the
/// body siblings after it, bounded as described on [`segment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// Index of the heading in the root's children.
    pub start: usize,
    /// End of the body span (exclusive).
    pub end: usize,
}

impl Section {
    /// Indices of the heading and body nodes, for the removal set.
    pub fn node_indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn body_range(&self) -> std::ops::Range<usize> {
        self.start + 1..self.end
    }
}

/// What the classifier decided to do with a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Author self-reference block; removed without extracting anything.
    Drop,
    Resources,
    Homework,
    Guest,
    /// No pattern matched; the section stays in the summary untouched.
    Unclassified,
}

static DROP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)kent c\. dodds").unwrap());
static RESOURCES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)resources").unwrap());
static HOMEWORK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)homework").unwrap());
static GUEST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^guest").unwrap());

/// Classify a section title. The patterns run in fixed priority order and
/// the first match wins, so a title matching several patterns gets the
/// earliest tag.
pub fn classify(title: &str) -> SectionKind {
    if DROP_RE.is_match(title) {
        SectionKind::Drop
    } else if RESOURCES_RE.is_match(title) {
        SectionKind::Resources
    } else if HOMEWORK_RE.is_match(title) {
        SectionKind::Homework
    } else if GUEST_RE.is_match(title) {
        SectionKind::Guest
    } else {
        SectionKind::Unclassified
    }
}

/// Partition the root's children into titled sections.
///
/// Only depth-3 headings at the top level open a section; headings of other
/// depths (and depth-3 headings nested inside other blocks) are ordinary
/// content. A heading of depth >= 3 closes the running section, and so does
/// the return of narrative prose: once a section's list block has started,
/// the first non-list sibling ends the body. Closing remarks an author
/// writes after the final metadata list stay in the document instead of
/// being swallowed by the section above them. Duplicate titles collapse
/// last-wins: the later section's span replaces the earlier one while
/// keeping its place in the order. That silently drops the earlier section's
/// content from extraction; see the test pinning this quirk.
pub fn segment(root: &Node) -> Result<Vec<Section>, NotesError> {
    let children = root.children().unwrap_or(&[]);

    let mut sections: Vec<Section> = Vec::new();
    for (index, node) in children.iter().enumerate() {
        let Node::Heading {
            depth: 3,
            children: heading_children,
        } = node
        else {
            continue;
        };

        let mut end = index + 1;
        let mut saw_list = false;
        for sibling in &children[index + 1..] {
            if is_section_boundary(sibling) {
                break;
            }
            if matches!(sibling, Node::List { .. }) {
                saw_list = true;
            } else if saw_list {
                // narrative resumes after the structured block
                break;
            }
            end += 1;
        }

        let title = heading_children
            .first()
            .and_then(Node::text_value)
            .ok_or(NotesError::UntitledSection)?
            .to_string();

        match sections.iter_mut().find(|s| s.title == title) {
            Some(existing) => {
                existing.start = index;
                existing.end = end;
            }
            None => sections.push(Section { title, start: index, end }),
        }
    }
    Ok(sections)
}

fn is_section_boundary(node: &Node) -> bool {
    matches!(node, Node::Heading { depth, .. } if *depth >= 3)
}

/// Drop every root child whose index is in the removal set.
///
/// The set is computed in full before this runs; nothing ever mutates the
/// children while a traversal of the same sequence is active, which is what
/// keeps sibling order intact.
pub fn remove_nodes(root: &mut Node, removal: &BTreeSet<usize>) {
    if removal.is_empty() {
        return;
    }
    if let Some(children) = root.children_mut() {
        let mut index = 0;
        children.retain(|_| {
            let keep = !removal.contains(&index);
            index += 1;
            keep
        });
    }
}

/// Authors conventionally close the metadata block with a divider; once the
/// metadata sections are gone the dangling trailing divider goes too. A
/// divider anywhere else stays.
pub fn trim_trailing_break(root: &mut Node) {
    if let Some(children) = root.children_mut() {
        if children.last() == Some(&Node::ThematicBreak) {
            children.pop();
        }
    }
}
