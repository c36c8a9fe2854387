//! Selection and ordering of book chapters.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{Document, DocumentStore, read_document};

/// Category shown for posts without `categories`.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Display metadata for a post included in the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Post title, or the file stem when the header has none.
    pub title: String,
    /// Source post.
    pub path: PathBuf,
    /// Publish date; `None` when missing or unparseable.
    pub date: Option<NaiveDateTime>,
    /// Flattened categories.
    pub category: String,
}

impl Chapter {
    /// Projects a document into chapter metadata.
    pub fn from_document(document: &Document) -> Self {
        let title = match document.header.title_text() {
            Some(title) => title,
            None => document
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        Self {
            title,
            path: document.path.clone(),
            date: document.header.date(),
            category: document
                .header
                .category()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        }
    }
}

/// Keeps documents flagged `book_chapter: true`, newest first.
///
/// The sort is stable: chapters with equal dates keep their input order, and
/// undated chapters go last.
pub fn select_chapters<'a, I>(documents: I) -> Vec<Chapter>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut chapters: Vec<Chapter> = documents
        .into_iter()
        .filter(|document| document.header.book_chapter())
        .map(Chapter::from_document)
        .collect();
    sort_chapters(&mut chapters);
    chapters
}

/// Sorts chapters by descending date, preserving the order of ties.
pub fn sort_chapters(chapters: &mut [Chapter]) {
    chapters.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Reads every post in `store` and selects the book chapters.
///
/// Posts that fail to read or parse are logged and skipped.
pub fn list_chapters(store: &DocumentStore) -> Result<Vec<Chapter>> {
    let mut documents = Vec::new();
    for path in store.documents()? {
        match read_document(&path) {
            Ok(document) => documents.push(document),
            Err(err) => log::warn!("Skipping {}: {err}", path.display()),
        }
    }
    let chapters = select_chapters(&documents);
    log::debug!(
        "Selected {} of {} posts as chapters",
        chapters.len(),
        documents.len()
    );
    Ok(chapters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use pretty_assertions::assert_eq;

    fn doc(path: &str, yaml: &str) -> Document {
        Document {
            path: PathBuf::from(path),
            header: Header::from(serde_yaml::from_str::<serde_yaml::Mapping>(yaml).unwrap()),
            body: String::new(),
        }
    }

    fn titles(chapters: &[Chapter]) -> Vec<&str> {
        chapters.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn keeps_only_flagged_documents() {
        let docs = vec![
            doc("a.md", "title: A\nbook_chapter: true\ndate: 2024-01-01\n"),
            doc("b.md", "title: B\nbook_chapter: false\ndate: 2024-01-02\n"),
            doc("c.md", "title: C\ndate: 2024-01-03\n"),
        ];
        assert_eq!(titles(&select_chapters(&docs)), vec!["A"]);
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let docs = vec![doc("a.md", "title: A\n")];
        assert!(select_chapters(&docs).is_empty());
        assert!(select_chapters(&Vec::<Document>::new()).is_empty());
    }

    #[test]
    fn sorts_newest_first() {
        let docs = vec![
            doc("old.md", "title: Old\nbook_chapter: true\ndate: 2023-05-01\n"),
            doc("new.md", "title: New\nbook_chapter: true\ndate: 2025-02-01 09:00:00\n"),
            doc("mid.md", "title: Mid\nbook_chapter: true\ndate: 2024-07-15\n"),
        ];
        assert_eq!(titles(&select_chapters(&docs)), vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn equal_dates_keep_discovery_order() {
        let docs = vec![
            doc("x.md", "title: First\nbook_chapter: true\ndate: 2024-03-03\n"),
            doc("y.md", "title: Newer\nbook_chapter: true\ndate: 2024-04-01\n"),
            doc("z.md", "title: Second\nbook_chapter: true\ndate: 2024-03-03\n"),
            doc("w.md", "title: Third\nbook_chapter: true\ndate: 2024-03-03\n"),
        ];
        assert_eq!(
            titles(&select_chapters(&docs)),
            vec!["Newer", "First", "Second", "Third"]
        );
    }

    #[test]
    fn undated_chapters_go_last() {
        let docs = vec![
            doc("u.md", "title: Undated\nbook_chapter: true\n"),
            doc("d.md", "title: Dated\nbook_chapter: true\ndate: 2020-01-01\n"),
        ];
        assert_eq!(titles(&select_chapters(&docs)), vec!["Dated", "Undated"]);
    }

    #[test]
    fn projection_fills_defaults() {
        let chapter = Chapter::from_document(&doc("posts/hello-world.md", "book_chapter: true\n"));
        assert_eq!(chapter.title, "hello-world");
        assert_eq!(chapter.category, DEFAULT_CATEGORY);
        assert_eq!(chapter.date, None);
        assert_eq!(chapter.path, PathBuf::from("posts/hello-world.md"));
    }

    #[test]
    fn scalar_title_is_kept_as_text() {
        let chapter = Chapter::from_document(&doc("posts/yearly.md", "title: 2024\nbook_chapter: true\n"));
        assert_eq!(chapter.title, "2024");
    }
}
