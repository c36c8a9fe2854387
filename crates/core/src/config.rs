//! Run configuration, optionally loaded from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::access::AccessDefaults;
use crate::error::{PostbookError, Result};

/// Settings shared by the tagger and the book assembler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory scanned for posts.
    pub posts_dir: PathBuf,
    /// Directory receiving `blog-book.html` and `book-toc.json`.
    pub output_dir: PathBuf,
    /// Title shown in the page `<title>` and top heading.
    pub book_title: String,
    /// `chrono` format used for chapter dates.
    pub date_format: String,
    /// Values filled in for unset access fields.
    pub defaults: AccessDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("blog/source/_posts"),
            output_dir: PathBuf::from("book-output"),
            book_title: "Blog Book".to_string(),
            date_format: "%Y/%-m/%-d".to_string(),
            defaults: AccessDefaults::default(),
        }
    }
}

impl Config {
    /// Parses a YAML config; missing keys keep their defaults.
    pub fn from_yaml(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    /// Reads and parses a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|err| PostbookError::io(path, err))?;
        Self::from_yaml(&source)
    }
}
