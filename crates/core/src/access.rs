//! Access levels, header merging, and the access tagger.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chapters::{Chapter, list_chapters};
use crate::error::{PostbookError, Result};
use crate::header::{ACCESS_LEVEL_KEY, BOOK_CHAPTER_KEY, Header, PUBLISHED_KEY};
use crate::store::{DocumentStore, read_document, write_document};

/// Privilege tier attached to a post. Declaration order is rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Visible to everyone.
    Public,
    /// Requires an account.
    Registered,
    /// Requires a paid tier.
    Premium,
    /// Author only.
    Private,
}

impl AccessLevel {
    /// Every level, lowest rank first.
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::Public,
        AccessLevel::Registered,
        AccessLevel::Premium,
        AccessLevel::Private,
    ];

    /// Position in [`AccessLevel::ALL`]; higher is more restricted.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Registered => "registered",
            AccessLevel::Premium => "premium",
            AccessLevel::Private => "private",
        }
    }

    /// Names of all levels in rank order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|level| level.as_str()).collect()
    }

    /// Whether a requester at this level may read a post at `required`.
    pub fn permits(self, required: AccessLevel) -> bool {
        self.rank() >= required.rank()
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = PostbookError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| PostbookError::Validation {
                value: s.to_string(),
                allowed: Self::names(),
            })
    }
}

/// Decides whether `user_level` may read a post tagged `doc_level`.
///
/// Either side naming a level outside the known set denies access.
///
/// # Examples
///
/// ```
/// use postbook_core::access::is_permitted;
///
/// assert!(is_permitted("premium", "registered"));
/// assert!(!is_permitted("public", "private"));
/// assert!(!is_permitted("vip", "public"));
/// assert!(!is_permitted("private", "secret"));
/// ```
pub fn is_permitted(user_level: &str, doc_level: &str) -> bool {
    match (user_level.parse::<AccessLevel>(), doc_level.parse::<AccessLevel>()) {
        (Ok(user), Ok(doc)) => user.permits(doc),
        _ => false,
    }
}

/// Values written for access fields a post does not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessDefaults {
    /// Level for posts without `access_level`.
    pub access_level: AccessLevel,
    /// Flag for posts without `published`.
    pub published: bool,
    /// Flag for posts without `book_chapter`.
    pub book_chapter: bool,
}

impl Default for AccessDefaults {
    fn default() -> Self {
        Self {
            access_level: AccessLevel::Public,
            published: true,
            book_chapter: false,
        }
    }
}

/// Access fields requested by an update; `None` leaves the field alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessFields {
    /// New access level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,
    /// New published flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    /// New book-chapter flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_chapter: Option<bool>,
}

impl AccessFields {
    /// An update that only changes the access level.
    pub fn level(level: AccessLevel) -> Self {
        Self {
            access_level: Some(level),
            ..Self::default()
        }
    }

    /// Validates a raw level name into a level-only update.
    pub fn parse_level(raw: &str) -> Result<Self> {
        raw.parse().map(Self::level)
    }

    /// Sets the book-chapter flag.
    pub fn with_book_chapter(mut self, flag: bool) -> Self {
        self.book_chapter = Some(flag);
        self
    }

    /// Sets the published flag.
    pub fn with_published(mut self, flag: bool) -> Self {
        self.published = Some(flag);
        self
    }
}

/// Merges access fields into a header.
///
/// Precedence per field: `update`, then the value already in `existing`, then
/// `defaults`. Fields other than the three access keys are carried over
/// unchanged, and existing values are kept verbatim even when they name an
/// unknown level. A `null` value counts as unset.
pub fn merge_header(existing: &Header, update: &AccessFields, defaults: &AccessDefaults) -> Header {
    let mut merged = existing.clone();

    match update.access_level {
        Some(level) => merged.set(ACCESS_LEVEL_KEY, level.as_str()),
        None if !existing.has_value(ACCESS_LEVEL_KEY) => {
            merged.set(ACCESS_LEVEL_KEY, defaults.access_level.as_str())
        }
        None => {}
    }

    match update.published {
        Some(flag) => merged.set(PUBLISHED_KEY, flag),
        None if !existing.has_value(PUBLISHED_KEY) => merged.set(PUBLISHED_KEY, defaults.published),
        None => {}
    }

    match update.book_chapter {
        Some(flag) => merged.set(BOOK_CHAPTER_KEY, flag),
        None if !existing.has_value(BOOK_CHAPTER_KEY) => {
            merged.set(BOOK_CHAPTER_KEY, defaults.book_chapter)
        }
        None => {}
    }

    merged
}

/// One row of the post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostAccess {
    /// Post path.
    pub path: PathBuf,
    /// Access level as written, or the default when absent.
    pub access_level: String,
    /// Published flag, or the default when absent.
    pub published: bool,
}

/// Summary of a published-field audit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedAudit {
    /// Posts whose header lacks `published`.
    pub missing: Vec<PathBuf>,
    /// Posts rewritten with default access fields.
    pub fixed: Vec<PathBuf>,
    /// Posts that could not be read or parsed.
    pub unreadable: Vec<PathBuf>,
}

/// Reads and rewrites access metadata for posts under one store.
#[derive(Debug, Clone)]
pub struct AccessTagger {
    store: DocumentStore,
    defaults: AccessDefaults,
}

impl AccessTagger {
    /// Creates a tagger over `store` using `defaults` for unset fields.
    pub fn new(store: DocumentStore, defaults: AccessDefaults) -> Self {
        Self { store, defaults }
    }

    /// The store this tagger operates on.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// The defaults used when merging.
    pub fn defaults(&self) -> &AccessDefaults {
        &self.defaults
    }

    /// Merges `fields` into the post header and rewrites the file.
    ///
    /// The merge happens in memory; the file is written once, in full.
    pub fn update_access(&self, path: &Path, fields: &AccessFields) -> Result<Header> {
        let document = read_document(path)?;
        let merged = merge_header(&document.header, fields, &self.defaults);
        write_document(path, &merged, &document.body)?;
        log::info!(
            "Updated {}: access_level={} published={} book_chapter={}",
            path.display(),
            merged.access_level().unwrap_or("?"),
            merged.published().map_or("?".to_string(), |p| p.to_string()),
            merged.book_chapter()
        );
        Ok(merged)
    }

    /// Validates `level` and sets it on the post.
    ///
    /// An unknown level fails before the file is opened.
    pub fn update_level(&self, path: &Path, level: &str) -> Result<Header> {
        let fields = AccessFields::parse_level(level)?;
        self.update_access(path, &fields)
    }

    /// Applies `level` to every post whose path matches `pattern`.
    ///
    /// Returns the updated paths. Stops at the first failure.
    pub fn update_matching(&self, pattern: &str, level: &str) -> Result<Vec<PathBuf>> {
        let fields = AccessFields::parse_level(level)?;
        let mut updated = Vec::new();
        for path in self.store.matching(pattern)? {
            self.update_access(&path, &fields)?;
            updated.push(path);
        }
        Ok(updated)
    }

    /// Whether a requester at `user_level` may read the post.
    ///
    /// The default level applies only when the post has no `access_level`
    /// key; any value that is not a known level name denies.
    pub fn check_access(&self, path: &Path, user_level: &str) -> Result<bool> {
        let document = read_document(path)?;
        let doc_level = self.effective_level(&document.header);
        Ok(is_permitted(user_level, &doc_level))
    }

    fn effective_level(&self, header: &Header) -> String {
        header
            .access_level_text()
            .unwrap_or_else(|| self.defaults.access_level.as_str().to_string())
    }

    /// Lists every post with its effective access level and published flag.
    pub fn list_posts(&self) -> Result<Vec<PostAccess>> {
        let mut posts = Vec::new();
        for path in self.store.documents()? {
            let document = read_document(&path)?;
            posts.push(PostAccess {
                access_level: self.effective_level(&document.header),
                published: document.header.published().unwrap_or(self.defaults.published),
                path,
            });
        }
        Ok(posts)
    }

    /// Posts flagged as book chapters, newest first.
    pub fn list_chapters_flagged_for_book(&self) -> Result<Vec<Chapter>> {
        list_chapters(&self.store)
    }

    /// Finds posts without a `published` field and optionally fixes them.
    ///
    /// Fixing goes through the regular merge, so the other access defaults are
    /// filled in as well.
    pub fn audit_published(&self, fix: bool) -> Result<PublishedAudit> {
        let mut audit = PublishedAudit::default();
        for path in self.store.documents()? {
            let document = match read_document(&path) {
                Ok(document) => document,
                Err(err) => {
                    log::warn!("Skipping {}: {err}", path.display());
                    audit.unreadable.push(path);
                    continue;
                }
            };
            if document.header.has_value(PUBLISHED_KEY) {
                continue;
            }
            if fix {
                let merged = merge_header(&document.header, &AccessFields::default(), &self.defaults);
                write_document(&path, &merged, &document.body)?;
                audit.fixed.push(path.clone());
            }
            audit.missing.push(path);
        }
        Ok(audit)
    }
}
