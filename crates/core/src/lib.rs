#![deny(missing_docs)]
//! postbook core: front matter, post discovery, access tagging, and chapter selection.

/// Access levels, header merging, and the access tagger.
pub mod access;
/// Book chapter selection and ordering.
pub mod chapters;
/// Run configuration.
pub mod config;
/// Core error types.
pub mod error;
/// YAML front matter extraction and rendering.
pub mod frontmatter;
/// Typed accessors over post headers.
pub mod header;
/// Post discovery and file IO.
pub mod store;

pub use access::{
    AccessDefaults, AccessFields, AccessLevel, AccessTagger, PostAccess, PublishedAudit,
    is_permitted, merge_header,
};
pub use chapters::{Chapter, DEFAULT_CATEGORY, list_chapters, select_chapters, sort_chapters};
pub use config::Config;
pub use error::{PostbookError, Result};
pub use frontmatter::{FrontmatterError, FrontmatterExtraction, extract_frontmatter, render_frontmatter};
pub use header::Header;
pub use store::{Document, DocumentStore, list_documents, path_matches, read_document, write_document};
