use crate::notes::model::{Node, ResourceRecord, for_each};

/// Pull `{name, url}` records out of a resources section body.
///
/// Depth-first: every list item, every link inside it, every text node
/// inside the link. A list item with no link, or a link with no text,
/// contributes nothing; that is a silent skip, not an error. A list item
/// holding several links yields one record per link, in link order.
pub fn collect(body: &[Node]) -> Vec<ResourceRecord> {
    let mut records = Vec::new();
    for node in body {
        for_each(node, &mut |item| {
            if matches!(item, Node::ListItem { .. }) {
                collect_links(item, &mut records);
            }
        });
    }
    records
}

fn collect_links(item: &Node, records: &mut Vec<ResourceRecord>) {
    for_each(item, &mut |node| {
        if let Node::Link { url, children, .. } = node {
            for link_child in children {
                for_each(link_child, &mut |text| {
                    if let Some(value) = text.text_value() {
                        records.push(ResourceRecord {
                            name: value.to_string(),
                            url: url.clone(),
                        });
                    }
                });
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::reader;

    fn body_of(raw: &str) -> Vec<Node> {
        let tree = reader::parse(raw).unwrap();
        tree.children().unwrap().to_vec()
    }

    #[test]
    fn one_record_per_link() {
        let body = body_of(
            "- [React docs](https://reactjs.org)\n\
             - [Kent's blog](https://kentcdodds.com)\n",
        );
        let records = collect(&body);
        assert_eq!(
            records,
            vec![
                ResourceRecord {
                    name: "React docs".into(),
                    url: "https://reactjs.org".into(),
                },
                ResourceRecord {
                    name: "Kent's blog".into(),
                    url: "https://kentcdodds.com".into(),
                },
            ]
        );
    }

    #[test]
    fn multiple_links_in_one_item() {
        let body = body_of("- [a](https://a.test) and [b](https://b.test)\n");
        let records = collect(&body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "a");
        assert_eq!(records[1].name, "b");
    }

    #[test]
    fn linkless_items_are_skipped_silently() {
        let body = body_of(
            "- plain text, no link\n\
             - [kept](https://kept.test)\n",
        );
        let records = collect(&body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "kept");
    }

    #[test]
    fn link_without_text_is_skipped() {
        let body = body_of("- [![img](https://img.test/x.png)](https://target.test)\n");
        assert!(collect(&body).is_empty());
    }

    #[test]
    fn non_list_content_contributes_nothing() {
        let body = body_of("Just a paragraph with [a link](https://x.test).\n");
        assert!(collect(&body).is_empty());
    }
}
