use clipper_engine::{build_note_document, note_filename, sanitize_title};
use pretty_assertions::assert_eq;

#[test]
fn slashes_become_spaces_and_colons_become_hyphens() {
    assert_eq!(sanitize_title("A/B: C"), "A B- C");
    assert_eq!(note_filename("A/B: C"), "A B- C.md");
}

#[test]
fn line_breaks_collapse_to_single_spaces() {
    assert_eq!(
        sanitize_title("line one\r\nline two\nline three"),
        "line one line two line three"
    );
}

#[test]
fn link_hostile_characters_are_stripped() {
    assert_eq!(sanitize_title("a^[b]#c|d"), "abcd");
    assert_eq!(sanitize_title("back\\slash"), "back slash");
}

#[test]
fn whitespace_runs_collapse_and_edges_trim() {
    assert_eq!(sanitize_title("  spaced \t out   title  "), "spaced out title");
}

#[test]
fn long_titles_truncate_to_one_hundred_characters() {
    let long = "a".repeat(150);
    let sanitized = sanitize_title(&long);
    assert_eq!(sanitized.chars().count(), 100);
    assert_eq!(sanitized, "a".repeat(100));
}

#[test]
fn sanitization_is_idempotent() {
    let repeated = "word ".repeat(40);
    let inputs = [
        "A/B: C",
        "  what\r\nabout #tags [and] ^carets|  ",
        "plain title",
        repeated.as_str(),
    ];
    for input in inputs {
        let once = sanitize_title(input);
        assert_eq!(sanitize_title(&once), once, "not idempotent for {input:?}");
    }
}

#[test]
fn empty_titles_fall_back_to_untitled() {
    assert_eq!(sanitize_title(""), "untitled");
    assert_eq!(sanitize_title("#[]|^"), "untitled");
    assert_eq!(note_filename("   "), "untitled.md");
}

#[test]
fn note_is_frontmatter_only_with_trailing_newline() {
    let doc = build_note_document("url", "https://x.com/a/status/1", &[]);
    assert_eq!(doc, "---\nurl: https://x.com/a/status/1\n---\n");
}

#[test]
fn configured_url_key_is_used_verbatim() {
    let doc = build_note_document("source", "https://x.com/a/status/1", &[]);
    assert_eq!(doc, "---\nsource: https://x.com/a/status/1\n---\n");
}

#[test]
fn tags_render_as_a_yaml_list() {
    let tags = vec!["reading".to_string(), "video".to_string()];
    let doc = build_note_document("url", "https://youtube.com/watch?v=1", &tags);
    assert_eq!(
        doc,
        "---\nurl: https://youtube.com/watch?v=1\ntags:\n  - reading\n  - video\n---\n"
    );
}
