//! HTML emission for the book page: shell, table of contents, chapter blocks.

use std::fmt::Write as FmtWrite;

use html_escape::{encode_double_quoted_attribute, encode_text};

mod style;

pub use style::BOOK_STYLESHEET;

/// One line of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Fragment id of the chapter block, without `#`.
    pub anchor: String,
    /// Chapter title (plain text).
    pub title: String,
    /// Formatted publish date; empty when unknown.
    pub date: String,
}

/// One rendered chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterBlock {
    /// Element id, shared with the matching [`TocEntry`].
    pub anchor: String,
    /// Chapter title (plain text).
    pub title: String,
    /// Formatted publish date; empty when unknown.
    pub date: String,
    /// Category label (plain text).
    pub category: String,
    /// Body HTML, inserted verbatim.
    pub content_html: String,
}

/// Anchor id for the chapter at `index` in book order.
///
/// # Examples
///
/// ```
/// assert_eq!(postbook_book::render::chapter_anchor(3), "chapter-3");
/// ```
pub fn chapter_anchor(index: usize) -> String {
    format!("chapter-{index}")
}

/// Renders the complete single-file book page.
pub fn render_page(book_title: &str, toc: &[TocEntry], chapters: &[ChapterBlock]) -> String {
    let mut html = String::new();
    let title = encode_text(book_title);

    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html lang=\"en\">");
    let _ = writeln!(html, "<head>");
    let _ = writeln!(html, "  <meta charset=\"UTF-8\">");
    let _ = writeln!(
        html,
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    );
    let _ = writeln!(html, "  <title>{title}</title>");
    let _ = writeln!(html, "  <style>{BOOK_STYLESHEET}  </style>");
    let _ = writeln!(html, "</head>");
    let _ = writeln!(html, "<body>");
    let _ = writeln!(html, "  <div class=\"container\">");
    let _ = writeln!(html, "    <h1>{title}</h1>");

    html.push_str(&render_toc(toc));
    for chapter in chapters {
        html.push_str(&render_chapter(chapter));
    }

    let _ = writeln!(html, "  </div>");
    let _ = writeln!(html, "</body>");
    let _ = write!(html, "</html>");
    html
}

/// Renders the table of contents block.
pub fn render_toc(entries: &[TocEntry]) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "    <div class=\"toc\">");
    let _ = writeln!(html, "      <h2>Contents</h2>");
    let _ = writeln!(html, "      <ul>");
    for entry in entries {
        let _ = write!(
            html,
            "        <li><a href=\"#{}\">{}</a>",
            encode_double_quoted_attribute(&entry.anchor),
            encode_text(&entry.title)
        );
        if !entry.date.is_empty() {
            let _ = write!(
                html,
                " <span class=\"chapter-meta\">({})</span>",
                encode_text(&entry.date)
            );
        }
        let _ = writeln!(html, "</li>");
    }
    let _ = writeln!(html, "      </ul>");
    let _ = writeln!(html, "    </div>");
    html
}

/// Renders one chapter block.
pub fn render_chapter(chapter: &ChapterBlock) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "    <div class=\"chapter\" id=\"{}\">",
        encode_double_quoted_attribute(&chapter.anchor)
    );
    let _ = writeln!(html, "      <div class=\"chapter-header\">");
    let _ = writeln!(
        html,
        "        <h2 class=\"chapter-title\">{}</h2>",
        encode_text(&chapter.title)
    );
    let date = if chapter.date.is_empty() {
        "unknown date"
    } else {
        chapter.date.as_str()
    };
    let _ = writeln!(
        html,
        "        <div class=\"chapter-meta\">Published {} | Category: {}</div>",
        encode_text(date),
        encode_text(&chapter.category)
    );
    let _ = writeln!(html, "      </div>");
    let _ = writeln!(html, "      <div class=\"chapter-content\">");
    let _ = writeln!(html, "        {}", chapter.content_html);
    let _ = writeln!(html, "      </div>");
    let _ = writeln!(html, "    </div>");
    html
}
