use std::fs;

use pretty_assertions::assert_eq;

use crate::notes::{GuestRecord, ResourceRecord, extract};

fn load_fixture(name: &str) -> String {
    fs::read_to_string(format!("src/notes/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

#[test]
fn extract_markdown_show_notes() {
    let notes = extract(&load_fixture("shownotes.md")).unwrap();

    assert_eq!(
        notes.resources,
        vec![
            ResourceRecord {
                name: "React docs".into(),
                url: "https://reactjs.org".into(),
            },
            ResourceRecord {
                name: "Testing Library".into(),
                url: "https://testing-library.com".into(),
            },
        ]
    );

    assert_eq!(
        notes.guests,
        vec![GuestRecord {
            name: "Jane Doe".into(),
            company: Some("Acme Inc".into()),
            github: Some("janedoe".into()),
            twitter: Some("janedoe".into()),
        }]
    );

    assert_eq!(notes.homework.len(), 2);
    assert_eq!(
        notes.homework[0],
        "<p>Read <a href=\"https://testing-library.com/docs/guiding-principles\">the guiding principles</a></p>"
    );
    assert_eq!(
        notes.homework[1],
        "<p>Refactor one test to avoid implementation details</p>"
    );

    // every classified section is gone, the narrative remains, the trailing
    // divider is trimmed
    assert_eq!(
        notes.summary_html,
        "<p>Jane joins Kent to talk about testing React apps without testing \
         implementation details.</p>\n<p>Thanks for listening!</p>"
    );
}

#[test]
fn extract_html_show_notes_matches_markdown() {
    let from_markdown = extract(&load_fixture("shownotes.md")).unwrap();
    let from_html = extract(&load_fixture("shownotes.html")).unwrap();

    assert_eq!(from_html.resources, from_markdown.resources);
    assert_eq!(from_html.guests, from_markdown.guests);
    assert_eq!(from_html.summary_html, from_markdown.summary_html);
    assert_eq!(from_html.homework.len(), from_markdown.homework.len());
}

#[test]
fn unclassified_sections_survive_in_order() {
    let notes = extract(
        "### Sponsors\n\n- [Ad read](https://sponsor.test)\n\n\
         ### Resources\n\n- [x](https://x.test)\n\n\
         ### Outro\n\nSee you next week.\n",
    )
    .unwrap();

    assert_eq!(notes.resources.len(), 1);
    assert_eq!(
        notes.summary_html,
        "<h3>Sponsors</h3>\n<ul>\n<li><a href=\"https://sponsor.test\">Ad read</a></li>\n</ul>\n\
         <h3>Outro</h3>\n<p>See you next week.</p>"
    );
}

#[test]
fn classified_sections_never_leak_into_summary() {
    let notes = extract(&load_fixture("shownotes.md")).unwrap();
    for needle in ["Resources", "Homework", "Guest", "Kent C. Dodds", "acme.com"] {
        assert!(
            !notes.summary_html.contains(needle),
            "summary leaked {needle:?}: {}",
            notes.summary_html
        );
    }
}

#[test]
fn empty_document_extracts_to_nothing() {
    let notes = extract("").unwrap();
    assert_eq!(notes.summary_html, "");
    assert!(notes.resources.is_empty());
    assert!(notes.guests.is_empty());
    assert!(notes.homework.is_empty());
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(input in ".*") {
            // Errors are fine; panics are not.
            let _ = extract(&input);
        }

        #[test]
        fn summary_never_contains_classified_headings(
            body in "[a-z ]{0,40}"
        ) {
            let doc = format!("### Resources\n\n- [{body}](https://x.test)\n");
            if let Ok(notes) = extract(&doc) {
                prop_assert!(!notes.summary_html.contains("<h3>Resources</h3>"));
            }
        }
    }
}
