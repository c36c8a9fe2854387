#![deny(missing_docs)]
//! postbook book engine: Markdown conversion, page rendering, and book assembly.

/// Book assembly and output files.
pub mod assemble;
/// HTML page, table of contents, and chapter blocks.
pub mod render;
/// Body transforms (Markdown to HTML).
pub mod transform;

pub use assemble::{
    AssembleOutcome, BOOK_HTML_FILE, BOOK_MANIFEST_FILE, Book, BookAssembler, CHAPTER_LIST_FILE,
    manifest_json, write_chapter_list, write_manifest,
};
pub use render::{ChapterBlock, TocEntry, chapter_anchor, render_page};
pub use transform::convert;
