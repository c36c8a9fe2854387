//! Filesystem access for posts: discovery, reads, and in-place rewrites.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PostbookError, Result};
use crate::frontmatter::{extract_frontmatter, render_frontmatter};
use crate::header::Header;

/// File extension recognised as a post.
pub const POST_EXTENSION: &str = "md";

/// Pattern that matches every post.
pub const MATCH_ALL: &str = "*";

/// A post loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Where the post was read from.
    pub path: PathBuf,
    /// Parsed front matter.
    pub header: Header,
    /// Markup after the front matter block.
    pub body: String,
}

/// Recursively collects every post under `root`.
///
/// Order is whatever the filesystem yields; callers that need a stable order
/// sort by their own key.
pub fn list_documents(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            PostbookError::io(path, source)
        })?;
        if entry.file_type().is_file() && is_post(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    log::debug!("Found {} posts under {}", paths.len(), root.display());
    Ok(paths)
}

/// Reads a post and splits it into header and body.
pub fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(|err| PostbookError::io(path, err))?;
    let extraction = extract_frontmatter(&content).map_err(|err| PostbookError::parse(path, err))?;
    Ok(Document {
        path: path.to_path_buf(),
        header: Header::from(extraction.value),
        body: content[extraction.body_start..].to_string(),
    })
}

/// Overwrites a post with the given header and body.
///
/// The file is replaced in one `write` call; there is no temp-file rename, so
/// an interrupted write can leave a truncated post behind.
pub fn write_document(path: &Path, header: &Header, body: &str) -> Result<()> {
    let content = render_frontmatter(header.as_mapping(), body)
        .map_err(|err| PostbookError::Serialize(err.to_string()))?;
    fs::write(path, content).map_err(|err| PostbookError::io(path, err))
}

/// Returns true when `path` matches a `--pattern` value.
///
/// `"*"` matches everything; any other pattern is a plain substring test on
/// the displayed path.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use postbook_core::store::path_matches;
///
/// assert!(path_matches(Path::new("posts/2026/hello.md"), "*"));
/// assert!(path_matches(Path::new("posts/2026/hello.md"), "2026/"));
/// assert!(!path_matches(Path::new("posts/2025/hello.md"), "2026/"));
/// ```
pub fn path_matches(path: &Path, pattern: &str) -> bool {
    pattern == MATCH_ALL || path.to_string_lossy().contains(pattern)
}

fn is_post(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == POST_EXTENSION)
}

/// Posts rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every post path under the root.
    pub fn documents(&self) -> Result<Vec<PathBuf>> {
        list_documents(&self.root)
    }

    /// Post paths matching `pattern` (see [`path_matches`]).
    pub fn matching(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        Ok(self
            .documents()?
            .into_iter()
            .filter(|path| path_matches(path, pattern))
            .collect())
    }

    /// Reads one post.
    pub fn read(&self, path: &Path) -> Result<Document> {
        read_document(path)
    }

    /// Rewrites one post.
    pub fn write(&self, path: &Path, header: &Header, body: &str) -> Result<()> {
        write_document(path, header, body)
    }
}
