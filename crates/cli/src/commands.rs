//! Command handlers behind the CLI flags.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use postbook_book::{AssembleOutcome, BookAssembler, write_chapter_list};
use postbook_core::{AccessTagger, Config, DocumentStore, list_chapters};

fn tagger(config: &Config) -> AccessTagger {
    AccessTagger::new(DocumentStore::new(&config.posts_dir), config.defaults)
}

/// Prints the flagged chapters and saves them to `book-chapters.json` in `dir`.
pub fn generate_chapter_list(config: &Config, dir: &Path, out: &mut impl Write) -> Result<()> {
    let chapters = tagger(config)
        .list_chapters_flagged_for_book()
        .context("Failed to collect book chapters")?;
    writeln!(out, "Book chapters:")?;
    writeln!(out, "{}", postbook_book::manifest_json(&chapters)?)?;
    let path = write_chapter_list(&chapters, dir)?;
    writeln!(out, "Chapter list saved to {}", path.display())?;
    Ok(())
}

/// Prints every post with its access level and published flag.
pub fn list_posts(config: &Config, out: &mut impl Write) -> Result<()> {
    let posts = tagger(config).list_posts().context("Failed to list posts")?;
    writeln!(out, "Posts and access levels:")?;
    for post in posts {
        writeln!(
            out,
            "{}: {} (published: {})",
            post.path.display(),
            post.access_level,
            post.published
        )?;
    }
    Ok(())
}

/// Sets `level` on every post matching `pattern`.
pub fn update_access(config: &Config, level: &str, pattern: &str, out: &mut impl Write) -> Result<()> {
    let updated = tagger(config)
        .update_matching(pattern, level)
        .with_context(|| format!("Failed to update access level to '{level}'"))?;
    for path in &updated {
        writeln!(out, "Updated: {}", path.display())?;
    }
    writeln!(out, "{} posts set to {level}", updated.len())?;
    Ok(())
}

/// Reports, per matching post, whether a reader at `level` may open it.
pub fn check_access(config: &Config, level: &str, pattern: &str, out: &mut impl Write) -> Result<()> {
    let tagger = tagger(config);
    for path in tagger.store().matching(pattern)? {
        let allowed = tagger.check_access(&path, level)?;
        let verdict = if allowed { "allowed" } else { "denied" };
        writeln!(out, "{}: {verdict}", path.display())?;
    }
    Ok(())
}

/// Audits the `published` field; returns how many posts lacked it.
pub fn audit_published(config: &Config, fix: bool, out: &mut impl Write) -> Result<usize> {
    let audit = tagger(config).audit_published(fix)?;
    for path in &audit.missing {
        let status = if fix { "Fixed" } else { "Missing published" };
        writeln!(out, "{status}: {}", path.display())?;
    }
    for path in &audit.unreadable {
        writeln!(out, "Unreadable: {}", path.display())?;
    }
    if audit.missing.is_empty() {
        writeln!(out, "All posts have a published field")?;
    }
    Ok(audit.missing.len())
}

/// Compiles flagged chapters into the book page and manifest.
pub fn build_book(config: &Config, out: &mut impl Write) -> Result<()> {
    let chapters = list_chapters(&DocumentStore::new(&config.posts_dir))
        .context("Failed to collect book chapters")?;
    match BookAssembler::from_config(config).assemble(&chapters)? {
        AssembleOutcome::Empty => {
            writeln!(
                out,
                "No posts are flagged as book chapters. Add \"book_chapter: true\" to a post's front matter."
            )?;
        }
        AssembleOutcome::Written {
            html_path,
            manifest_path,
            chapters,
        } => {
            writeln!(out, "Found {chapters} chapters")?;
            writeln!(out, "Book written to {}", html_path.display())?;
            writeln!(out, "Table of contents written to {}", manifest_path.display())?;
        }
    }
    Ok(())
}
