use std::fs;

use clipper_engine::{ensure_vault_dir, ImportError, NoteImporter, PendingNote};
use pretty_assertions::assert_eq;

fn note(url: &str, title: &str, tags: &[&str]) -> PendingNote {
    PendingNote {
        url: url.to_string(),
        title: title.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn selected_items_become_frontmatter_notes() {
    let temp = tempfile::TempDir::new().unwrap();
    let importer = NoteImporter::new(temp.path().to_path_buf(), "url");

    let report = importer
        .import(&[
            note("https://x.com/a/status/1", "first post", &["reading"]),
            note("https://x.com/a/status/2", "second post", &[]),
        ])
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 0);

    let tagged = fs::read_to_string(temp.path().join("first post.md")).unwrap();
    assert_eq!(
        tagged,
        "---\nurl: https://x.com/a/status/1\ntags:\n  - reading\n---\n"
    );
    let untagged = fs::read_to_string(temp.path().join("second post.md")).unwrap();
    assert_eq!(untagged, "---\nurl: https://x.com/a/status/2\n---\n");
}

#[test]
fn colliding_titles_skip_without_aborting_the_batch() {
    let temp = tempfile::TempDir::new().unwrap();
    let importer = NoteImporter::new(temp.path().to_path_buf(), "url");

    // Different raw titles, identical once sanitized.
    let report = importer
        .import(&[
            note("https://x.com/a/status/1", "A/B: C", &[]),
            note("https://x.com/a/status/2", "A B- C", &[]),
            note("https://x.com/a/status/3", "untouched", &[]),
        ])
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.skipped_titles, vec!["A B- C".to_string()]);

    // The first writer wins; the collision left its note alone.
    let kept = fs::read_to_string(temp.path().join("A B- C.md")).unwrap();
    assert!(kept.contains("status/1"));
}

#[test]
fn existing_notes_are_skipped() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("already here.md"), "old content\n").unwrap();
    let importer = NoteImporter::new(temp.path().to_path_buf(), "url");

    let report = importer
        .import(&[note("https://x.com/a/status/9", "already here", &[])])
        .unwrap();

    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped, 1);
    // The existing note is untouched.
    let content = fs::read_to_string(temp.path().join("already here.md")).unwrap();
    assert_eq!(content, "old content\n");
}

#[test]
fn missing_vault_dir_is_created() {
    let temp = tempfile::TempDir::new().unwrap();
    let vault = temp.path().join("vault").join("clips");
    let importer = NoteImporter::new(vault.clone(), "url");

    let report = importer
        .import(&[note("https://x.com/a/status/1", "first", &[])])
        .unwrap();

    assert_eq!(report.imported, 1);
    assert!(vault.join("first.md").exists());
}

#[test]
fn vault_path_that_is_a_file_fails_the_whole_import() {
    let temp = tempfile::TempDir::new().unwrap();
    let not_a_dir = temp.path().join("vault");
    fs::write(&not_a_dir, "file").unwrap();

    let err = ensure_vault_dir(&not_a_dir).unwrap_err();
    assert!(matches!(err, ImportError::VaultDir(_)));

    let importer = NoteImporter::new(not_a_dir, "url");
    let err = importer
        .import(&[note("https://x.com/a/status/1", "first", &[])])
        .unwrap_err();
    assert!(matches!(err, ImportError::VaultDir(_)));
}

#[test]
fn non_collision_io_errors_abort_the_batch() {
    let temp = tempfile::TempDir::new().unwrap();
    let importer = NoteImporter::new(temp.path().to_path_buf(), "url");

    // 100 sanitized characters of three bytes each blow past the 255-byte
    // filename limit, which is an IO error that is not a collision.
    let oversized = "€".repeat(150);
    let err = importer
        .import(&[
            note("https://x.com/a/status/1", "fine", &[]),
            note("https://x.com/a/status/2", &oversized, &[]),
        ])
        .unwrap_err();

    assert!(matches!(err, ImportError::Io(_)));
    // The first note landed before the abort.
    assert!(temp.path().join("fine.md").exists());
}
