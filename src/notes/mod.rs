pub mod errors;
pub mod guests;
pub mod homework;
pub mod model;
pub mod reader;
pub mod render;
pub mod resources;
pub mod sections;

#[cfg(test)]
mod tests;

pub use errors::NotesError;
pub use model::{GuestRecord, Node, NotesExtract, ResourceRecord};

use std::collections::BTreeSet;

use sections::SectionKind;

/// Run the whole show-notes pipeline on one raw document.
///
/// The tree is built once, mutated in place and discarded; sections and the
/// removal set are transient. Any error aborts the call as a whole — callers
/// never see a partially populated extract.
pub fn extract(raw: &str) -> Result<NotesExtract, NotesError> {
    // 1. Parse raw input into the normalized tree
    let mut tree = reader::parse(raw)?;

    // 2. Partition the top level into titled sections
    let found = sections::segment(&tree)?;

    // 3. Classify each section, collecting records and the removal set.
    //    Removal is deferred: nothing touches the tree while section body
    //    slices are alive.
    let mut resources = Vec::new();
    let mut guests = Vec::new();
    let mut homework = Vec::new();
    let mut removal = BTreeSet::new();
    {
        let children = tree.children().unwrap_or(&[]);
        for section in &found {
            let kind = sections::classify(&section.title);
            if kind == SectionKind::Unclassified {
                continue;
            }
            removal.extend(section.node_indices());
            let body = &children[section.body_range()];
            match kind {
                SectionKind::Drop => {}
                SectionKind::Resources => resources.extend(resources::collect(body)),
                SectionKind::Homework => homework.extend(homework::collect(body)),
                SectionKind::Guest => {
                    if let Some(guest) = guests::collect(&section.title, body)? {
                        guests.push(guest);
                    }
                }
                SectionKind::Unclassified => unreachable!(),
            }
        }
    }

    // 4. Filter the removal set out in one pass, then drop a trailing divider
    sections::remove_nodes(&mut tree, &removal);
    sections::trim_trailing_break(&mut tree);

    // 5. Render whatever is left
    let summary_html = render::to_html(&tree);

    Ok(NotesExtract {
        summary_html,
        resources,
        guests,
        homework,
    })
}
