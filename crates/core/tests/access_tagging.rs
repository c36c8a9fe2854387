use std::fs;
use std::path::{Path, PathBuf};

use postbook_core::{
    AccessDefaults, AccessFields, AccessLevel, AccessTagger, DocumentStore, PostbookError,
    read_document,
};
use pretty_assertions::assert_eq;

fn write_post(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn tagger(root: &Path) -> AccessTagger {
    AccessTagger::new(DocumentStore::new(root), AccessDefaults::default())
}

#[test]
fn update_preserves_unrelated_fields_and_body() {
    let dir = tempfile::tempdir().unwrap();
    let post = write_post(
        dir.path(),
        "2026/intro.md",
        "---\ntitle: Intro\ndate: 2026-01-02 10:00:00\ntags:\n  - rust\n---\n\n# Hello\n\nBody.\n",
    );

    tagger(dir.path())
        .update_access(&post, &AccessFields::level(AccessLevel::Premium))
        .unwrap();

    let doc = read_document(&post).unwrap();
    assert_eq!(doc.header.title(), Some("Intro"));
    assert_eq!(doc.header.access_level(), Some("premium"));
    assert_eq!(doc.header.published(), Some(true));
    assert!(doc.header.get("tags").is_some());
    assert!(doc.header.get("date").is_some());
    assert_eq!(doc.body, "\n# Hello\n\nBody.\n");
}

#[test]
fn update_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let post = write_post(dir.path(), "p.md", "---\ntitle: P\n---\nText\n");
    let tagger = tagger(dir.path());
    let fields = AccessFields::level(AccessLevel::Registered).with_book_chapter(true);

    tagger.update_access(&post, &fields).unwrap();
    let once = fs::read(&post).unwrap();
    tagger.update_access(&post, &fields).unwrap();
    let twice = fs::read(&post).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn unknown_level_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = "---\ntitle: Keep\naccess_level: public\n---\nBody\n";
    let post = write_post(dir.path(), "keep.md", original);

    let err = tagger(dir.path()).update_level(&post, "vip").unwrap_err();

    assert!(matches!(err, PostbookError::Validation { .. }), "{err:?}");
    assert_eq!(fs::read(&post).unwrap(), original.as_bytes());
}

#[test]
fn update_matching_only_touches_matching_paths() {
    let dir = tempfile::tempdir().unwrap();
    let hit = write_post(dir.path(), "2026/a.md", "---\ntitle: A\n---\n");
    let miss_content = "---\ntitle: B\n---\n";
    let miss = write_post(dir.path(), "2025/b.md", miss_content);

    let updated = tagger(dir.path())
        .update_matching("2026/a", "private")
        .unwrap();

    assert_eq!(updated, vec![hit.clone()]);
    assert_eq!(read_document(&hit).unwrap().header.access_level(), Some("private"));
    assert_eq!(fs::read_to_string(&miss).unwrap(), miss_content);
}

#[test]
fn update_matching_rejects_unknown_level_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let content = "---\ntitle: A\n---\n";
    let post = write_post(dir.path(), "a.md", content);

    let err = tagger(dir.path()).update_matching("*", "gold").unwrap_err();

    assert!(err.is_validation());
    assert_eq!(fs::read_to_string(&post).unwrap(), content);
}

#[test]
fn check_access_uses_rank_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let premium = write_post(dir.path(), "premium.md", "---\naccess_level: premium\n---\n");
    let untagged = write_post(dir.path(), "plain.md", "no header\n");
    let odd = write_post(dir.path(), "odd.md", "---\naccess_level: staff\n---\n");
    let tagger = tagger(dir.path());

    assert!(tagger.check_access(&premium, "private").unwrap());
    assert!(tagger.check_access(&premium, "premium").unwrap());
    assert!(!tagger.check_access(&premium, "registered").unwrap());
    assert!(tagger.check_access(&untagged, "public").unwrap());
    assert!(!tagger.check_access(&untagged, "guest").unwrap());
    assert!(!tagger.check_access(&odd, "private").unwrap());
}

#[test]
fn malformed_document_level_denies_everyone() {
    let dir = tempfile::tempdir().unwrap();
    let numeric = write_post(dir.path(), "numeric.md", "---\naccess_level: 3\n---\n");
    let sequence = write_post(dir.path(), "sequence.md", "---\naccess_level: [premium]\n---\n");
    let null = write_post(dir.path(), "null.md", "---\naccess_level: ~\n---\n");
    let tagger = tagger(dir.path());

    for post in [&numeric, &sequence, &null] {
        for level in ["public", "registered", "premium", "private"] {
            assert!(
                !tagger.check_access(post, level).unwrap(),
                "{} readable at {level}",
                post.display()
            );
        }
    }

    let mut posts = tagger.list_posts().unwrap();
    posts.sort_by(|a, b| a.path.cmp(&b.path));
    let levels: Vec<_> = posts.iter().map(|p| p.access_level.as_str()).collect();
    assert_eq!(levels, vec!["null", "3", "[\"premium\"]"]);
}

#[test]
fn null_level_is_replaced_on_update() {
    let dir = tempfile::tempdir().unwrap();
    let post = write_post(dir.path(), "null.md", "---\ntitle: N\naccess_level: ~\n---\nBody\n");
    let tagger = tagger(dir.path());

    tagger.update_access(&post, &AccessFields::default()).unwrap();

    let doc = read_document(&post).unwrap();
    assert_eq!(doc.header.access_level(), Some("public"));
    assert!(tagger.check_access(&post, "public").unwrap());
}

#[test]
fn list_posts_reports_effective_values() {
    let dir = tempfile::tempdir().unwrap();
    write_post(dir.path(), "a.md", "---\naccess_level: registered\npublished: false\n---\n");
    write_post(dir.path(), "b.md", "---\ntitle: B\n---\n");

    let mut posts = tagger(dir.path()).list_posts().unwrap();
    posts.sort_by(|a, b| a.path.cmp(&b.path));

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].access_level, "registered");
    assert!(!posts[0].published);
    assert_eq!(posts[1].access_level, "public");
    assert!(posts[1].published);
}

#[test]
fn chapters_flagged_for_book_are_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write_post(dir.path(), "x/one.md", "---\ntitle: One\nbook_chapter: true\ndate: 2024-01-01\n---\n");
    write_post(dir.path(), "y/two.md", "---\ntitle: Two\nbook_chapter: true\ndate: 2025-01-01\n---\n");
    write_post(dir.path(), "three.md", "---\ntitle: Three\ndate: 2026-01-01\n---\n");
    write_post(dir.path(), "broken.md", "---\ntitle: [\n---\n");

    let chapters = tagger(dir.path()).list_chapters_flagged_for_book().unwrap();
    let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Two", "One"]);
}

#[test]
fn audit_finds_and_fixes_missing_published() {
    let dir = tempfile::tempdir().unwrap();
    let missing = write_post(dir.path(), "missing.md", "---\ntitle: M\n---\nBody\n");
    let present_content = "---\ntitle: P\npublished: false\n---\n";
    let present = write_post(dir.path(), "present.md", present_content);
    let tagger = tagger(dir.path());

    let report = tagger.audit_published(false).unwrap();
    assert_eq!(report.missing, vec![missing.clone()]);
    assert!(report.fixed.is_empty());
    assert!(!read_document(&missing).unwrap().header.contains("published"));

    let report = tagger.audit_published(true).unwrap();
    assert_eq!(report.fixed, vec![missing.clone()]);
    let fixed = read_document(&missing).unwrap();
    assert_eq!(fixed.header.published(), Some(true));
    assert_eq!(fixed.header.access_level(), Some("public"));
    assert_eq!(fixed.body, "Body\n");
    assert_eq!(fs::read_to_string(&present).unwrap(), present_content);

    assert!(tagger.audit_published(false).unwrap().missing.is_empty());
}
