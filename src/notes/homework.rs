use crate::notes::model::Node;
use crate::notes::render;

/// Render each top-level list item of a homework section to one HTML
/// fragment. The item's children render (the `<li>` wrapper itself does
/// not), every item yields exactly one entry, and order is preserved.
pub fn collect(body: &[Node]) -> Vec<String> {
    let mut entries = Vec::new();
    for node in body {
        let Node::List { children, .. } = node else {
            continue;
        };
        for item in children {
            if let Node::ListItem { children } = item {
                entries.push(children.iter().map(render::fragment).collect());
            }
        }
    }
    entries
}
