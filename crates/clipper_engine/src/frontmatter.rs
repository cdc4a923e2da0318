/// Builds the full note content: a frontmatter block and nothing else.
///
/// The `tags:` list is omitted entirely when no tags were assigned. The
/// document always ends with the closing delimiter and a single newline.
pub fn build_note_document(url_key: &str, url: &str, tags: &[String]) -> String {
    let mut doc = String::from("---\n");
    doc.push_str(url_key);
    doc.push_str(": ");
    doc.push_str(url);
    doc.push('\n');
    if !tags.is_empty() {
        doc.push_str("tags:\n");
        for tag in tags {
            doc.push_str("  - ");
            doc.push_str(tag);
            doc.push('\n');
        }
    }
    doc.push_str("---\n");
    doc
}
