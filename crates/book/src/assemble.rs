//! Book assembly: chapters in, HTML page and JSON manifest out.

use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use postbook_core::{Chapter, Config, PostbookError, Result, read_document};

use crate::render::{ChapterBlock, TocEntry, chapter_anchor, render_page};
use crate::transform::markup::convert;

/// File name of the assembled book page.
pub const BOOK_HTML_FILE: &str = "blog-book.html";
/// File name of the manifest written next to the book page.
pub const BOOK_MANIFEST_FILE: &str = "book-toc.json";
/// File name of the standalone chapter listing.
pub const CHAPTER_LIST_FILE: &str = "book-chapters.json";

/// A rendered book, not yet written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Complete HTML page.
    pub html: String,
    /// Chapter metadata in book order.
    pub manifest: Vec<Chapter>,
}

/// Result of [`BookAssembler::assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleOutcome {
    /// No chapters were given; nothing was written.
    Empty,
    /// The book and its manifest were written.
    Written {
        /// Path of the HTML page.
        html_path: PathBuf,
        /// Path of the JSON manifest.
        manifest_path: PathBuf,
        /// Number of chapters in the book.
        chapters: usize,
    },
}

/// Turns selected chapters into the book page and manifest.
#[derive(Debug, Clone)]
pub struct BookAssembler {
    output_dir: PathBuf,
    title: String,
    date_format: String,
}

impl BookAssembler {
    /// Creates an assembler writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let defaults = Config::default();
        Self {
            output_dir: output_dir.into(),
            title: defaults.book_title,
            date_format: defaults.date_format,
        }
    }

    /// Creates an assembler from run configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            title: config.book_title.clone(),
            date_format: config.date_format.clone(),
        }
    }

    /// Overrides the page title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Overrides the date display format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Directory the book is written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the HTML page inside the output directory.
    pub fn html_path(&self) -> PathBuf {
        self.output_dir.join(BOOK_HTML_FILE)
    }

    /// Path of the manifest inside the output directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir.join(BOOK_MANIFEST_FILE)
    }

    /// Reads every chapter's post, converts its body, and builds the page.
    ///
    /// Chapters are rendered in the order given; the anchor of each chapter
    /// is its position in that order.
    pub fn render(&self, chapters: &[Chapter]) -> Result<Book> {
        let mut toc = Vec::with_capacity(chapters.len());
        let mut blocks = Vec::with_capacity(chapters.len());

        for (index, chapter) in chapters.iter().enumerate() {
            let document = read_document(&chapter.path)?;
            let anchor = chapter_anchor(index);
            let date = self.format_date(chapter.date);
            toc.push(TocEntry {
                anchor: anchor.clone(),
                title: chapter.title.clone(),
                date: date.clone(),
            });
            blocks.push(ChapterBlock {
                anchor,
                title: chapter.title.clone(),
                date,
                category: chapter.category.clone(),
                content_html: convert(&document.body),
            });
        }

        Ok(Book {
            html: render_page(&self.title, &toc, &blocks),
            manifest: chapters.to_vec(),
        })
    }

    /// Renders and writes the book.
    ///
    /// With no chapters this logs and returns [`AssembleOutcome::Empty`]
    /// without creating the output directory or any file.
    pub fn assemble(&self, chapters: &[Chapter]) -> Result<AssembleOutcome> {
        if chapters.is_empty() {
            log::info!(
                "No posts are flagged as book chapters; add \"book_chapter: true\" to a post's front matter"
            );
            return Ok(AssembleOutcome::Empty);
        }

        log::info!("Assembling book from {} chapters", chapters.len());
        let book = self.render(chapters)?;

        fs::create_dir_all(&self.output_dir)
            .map_err(|err| PostbookError::io(&self.output_dir, err))?;

        let html_path = self.html_path();
        fs::write(&html_path, &book.html).map_err(|err| PostbookError::io(&html_path, err))?;
        log::info!("Book written to {}", html_path.display());

        let manifest_path = write_manifest(&book.manifest, &self.manifest_path())?;
        log::info!("Table of contents written to {}", manifest_path.display());

        Ok(AssembleOutcome::Written {
            html_path,
            manifest_path,
            chapters: book.manifest.len(),
        })
    }

    fn format_date(&self, date: Option<NaiveDateTime>) -> String {
        let Some(date) = date else {
            return String::new();
        };
        let mut out = String::new();
        // An invalid user-supplied format surfaces as fmt::Error, not a panic.
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            log::warn!("Invalid date format {:?}; using ISO dates", self.date_format);
            return date.date().to_string();
        }
        out
    }
}

/// Serializes chapters as a pretty JSON array.
pub fn manifest_json(chapters: &[Chapter]) -> Result<String> {
    Ok(serde_json::to_string_pretty(chapters)?)
}

/// Writes the chapter manifest to `path`.
pub fn write_manifest(chapters: &[Chapter], path: &Path) -> Result<PathBuf> {
    let json = manifest_json(chapters)?;
    fs::write(path, json).map_err(|err| PostbookError::io(path, err))?;
    Ok(path.to_path_buf())
}

/// Writes the standalone `book-chapters.json` listing into `dir`.
///
/// Unlike [`BookAssembler::assemble`], an empty list is written as `[]`.
pub fn write_chapter_list(chapters: &[Chapter], dir: &Path) -> Result<PathBuf> {
    write_manifest(chapters, &dir.join(CHAPTER_LIST_FILE))
}
