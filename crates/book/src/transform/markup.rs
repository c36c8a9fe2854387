//! Minimal Markdown-to-HTML conversion by ordered regex rewrites.
//!
//! Rules run in a fixed order and each sees the output of the previous one:
//!
//! 1. `#`/`##`/`###` heading lines
//! 2. `**bold**`
//! 3. `*italic*` (must follow bold, or bold asterisks would be read as italics)
//! 4. `[text](url)` links
//! 5. `` `code` `` spans
//! 6. blank lines become paragraph breaks, everything is wrapped in `<p>`
//! 7. `- item` lines become `<li>`, consecutive items share one `<ul>`
//!
//! Bold, italic and link patterns are greedy per line, so two spans on the
//! same line merge into one. Tables, nested lists, fences and escaping are not
//! handled.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// One `(pattern, replacement)` rewrite.
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            // Patterns are literals below; a bad one is a programming error.
            pattern: Regex::new(pattern).expect("markup rule pattern must compile"),
            replacement,
        }
    }

    fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(input, self.replacement)
    }
}

static INLINE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"(?m)^### (.*)$", "<h3>${1}</h3>"),
        Rule::new(r"(?m)^## (.*)$", "<h2>${1}</h2>"),
        Rule::new(r"(?m)^# (.*)$", "<h1>${1}</h1>"),
        Rule::new(r"\*\*(.*)\*\*", "<strong>${1}</strong>"),
        Rule::new(r"\*(.*)\*", "<em>${1}</em>"),
        Rule::new(r"\[(.*)\]\((.*)\)", r#"<a href="${2}">${1}</a>"#),
        Rule::new(r"`(.*?)`", "<code>${1}</code>"),
    ]
});

static BLANK_LINE: Lazy<Rule> = Lazy::new(|| Rule::new(r"(?m)^\s*$", "</p><p>"));

// The first line of the document already carries the opening `<p>`, and the
// last one the closing `</p>`, by the time list items are matched.
static LIST_ITEM: Lazy<Rule> = Lazy::new(|| {
    Rule::new(
        r"(?m)^(<p>)?- (.*?)(</p>)?$",
        "${1}<li>${2}</li>${3}",
    )
});

static LIST_RUN: Lazy<Rule> =
    Lazy::new(|| Rule::new(r"<li>.*</li>(?:\n<li>.*</li>)*", "<ul>${0}</ul>"));

const EMPTY_PARAGRAPH_BREAK: &str = "</p><p></p><p>";
const PARAGRAPH_BREAK: &str = "</p><p>";
const EMPTY_PARAGRAPH: &str = "<p></p>";

/// Converts Markdown to HTML.
///
/// Never fails; input no rule recognises comes back as text inside a
/// paragraph. Whitespace-only input yields an empty string. Windows line
/// endings are read as plain `\n`.
///
/// # Examples
///
/// ```
/// use postbook_book::transform::markup::convert;
///
/// assert_eq!(convert("Hello **world**"), "<p>Hello <strong>world</strong></p>");
/// assert_eq!(convert(""), "");
/// ```
pub fn convert(markup: &str) -> String {
    if markup.trim().is_empty() {
        return String::new();
    }

    let mut html = markup.replace("\r\n", "\n");
    for rule in INLINE_RULES.iter() {
        html = rule.apply(&html).into_owned();
    }

    html = wrap_paragraphs(&html);

    html = LIST_ITEM.apply(&html).into_owned();
    LIST_RUN.apply(&html).into_owned()
}

fn wrap_paragraphs(html: &str) -> String {
    let broken = BLANK_LINE.apply(html);
    let mut wrapped = format!("<p>{broken}</p>");
    while wrapped.contains(EMPTY_PARAGRAPH_BREAK) {
        wrapped = wrapped.replace(EMPTY_PARAGRAPH_BREAK, PARAGRAPH_BREAK);
    }
    // Blank first or last lines leave an empty pair at either end.
    if let Some(rest) = wrapped.strip_prefix(EMPTY_PARAGRAPH) {
        wrapped = rest.to_string();
    }
    if let Some(rest) = wrapped.strip_suffix(EMPTY_PARAGRAPH) {
        wrapped = rest.to_string();
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::convert;

    #[test]
    fn converts_reference_sample() {
        let html = convert("# Title\n\nSome **bold** and *italic* text.");
        assert!(html.starts_with("<p>"), "{html}");
        assert!(html.ends_with("</p>"), "{html}");
        assert_eq!(html.matches("<h1>Title</h1>").count(), 1, "{html}");
        assert_eq!(html.matches("<strong>bold</strong>").count(), 1, "{html}");
        assert_eq!(html.matches("<em>italic</em>").count(), 1, "{html}");
        assert!(html.contains("</p><p>"), "{html}");
    }

    #[test]
    fn heading_levels() {
        let html = convert("# One\n## Two\n### Three\n#### Four");
        assert!(html.contains("<h1>One</h1>"));
        assert!(html.contains("<h2>Two</h2>"));
        assert!(html.contains("<h3>Three</h3>"));
        assert!(html.contains("#### Four"), "{html}");
    }

    #[test]
    fn heading_needs_a_space() {
        let html = convert("#hashtag");
        assert_eq!(html, "<p>#hashtag</p>");
    }

    #[test]
    fn bold_is_not_read_as_italic() {
        let html = convert("a **b** c");
        assert_eq!(html, "<p>a <strong>b</strong> c</p>");
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn multiple_bold_pairs_on_a_line_over_match() {
        let html = convert("**a** and **b**");
        assert_eq!(html, "<p><strong>a<em>* and *</em>b</strong></p>");
    }

    #[test]
    fn bold_does_not_span_lines() {
        let html = convert("**open\nclose**");
        assert!(!html.contains("<strong>"), "{html}");
    }

    #[test]
    fn links_and_code() {
        insta::assert_snapshot!(
            convert("## Setup\nRun `cargo build` or see [docs](https://example.com)."),
            @r#"
        <p><h2>Setup</h2>
        Run <code>cargo build</code> or see <a href="https://example.com">docs</a>.</p>
        "#
        );
    }

    #[test]
    fn inline_code_is_lazy() {
        assert_eq!(convert("`a` and `b`"), "<p><code>a</code> and <code>b</code></p>");
    }

    #[test]
    fn consecutive_items_share_one_list() {
        let html = convert("Intro\n\n- apples\n- pears\n\nOutro");
        assert_eq!(html.matches("<ul>").count(), 1, "{html}");
        assert!(html.contains("<ul><li>apples</li>\n<li>pears</li></ul>"), "{html}");
        assert!(html.contains("Outro</p>"), "{html}");
    }

    #[test]
    fn separated_items_get_separate_lists() {
        let html = convert("- a\n\n- b");
        assert_eq!(html.matches("<ul>").count(), 2, "{html}");
        assert!(html.ends_with("<ul><li>b</li></ul></p>"), "{html}");
    }

    #[test]
    fn list_on_first_line_keeps_first_item() {
        let html = convert("- first\n- second");
        assert!(html.contains("<li>first</li>"), "{html}");
        assert!(html.contains("<li>second</li>"), "{html}");
        assert!(html.starts_with("<p><ul>"), "{html}");
    }

    #[test]
    fn adjacent_blank_lines_do_not_leave_empty_paragraphs() {
        let html = convert("one\n\n\n\ntwo");
        assert!(!html.contains("<p></p>"), "{html}");
        assert!(html.starts_with("<p>one"), "{html}");
        assert!(html.ends_with("two</p>"), "{html}");
    }

    #[test]
    fn leading_and_trailing_blank_lines_are_trimmed() {
        assert_eq!(convert("\nText\n"), "<p>\nText\n</p>");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(convert("just text"), "<p>just text</p>");
        assert_eq!(convert("<b>raw</b> & co"), "<p><b>raw</b> & co</p>");
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(convert(""), "");
        assert_eq!(convert("\n\n  \n"), "");
    }

    #[test]
    fn crlf_input_matches_lf_input() {
        let html = convert("# Title\r\n\r\nSome **bold**\r\n\r\n- a\r\n- b\r\n");
        assert!(!html.contains('\r'), "{html:?}");
        assert!(html.contains("<h1>Title</h1>"), "{html}");
        assert!(html.contains("<ul><li>a</li>\n<li>b</li></ul>"), "{html}");
        assert_eq!(html, convert("# Title\n\nSome **bold**\n\n- a\n- b\n"));
    }

    #[test]
    fn is_deterministic() {
        let input = "# T\n\n- a\n- b\n\n**x** *y* `z` [l](u)\n";
        assert_eq!(convert(input), convert(input));
    }
}
