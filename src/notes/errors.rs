use thiserror::Error;

/// Failures of the show-notes extraction engine.
///
/// Every variant is fatal for the document that triggered it; there is no
/// partial extraction. The only tolerated irregularities are handled inline
/// (unmatched section titles stay in the summary, resource items without a
/// link are skipped) and never surface here.
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("could not parse show notes: {0}")]
    Parse(String),

    #[error("section with no title")]
    UntitledSection,

    #[error("guest listItem first child is not a paragraph (section {section:?})")]
    GuestItemNotParagraph { section: String },

    #[error("guest listItem first child's first child is not a text node (section {section:?})")]
    GuestLabelNotText { section: String },

    #[error("guest listItem first child's second child is not a link node (section {section:?})")]
    GuestValueNotLink { section: String },

    #[error("second child's first child is not a text node (section {section:?})")]
    GuestLinkTextMissing { section: String },
}
