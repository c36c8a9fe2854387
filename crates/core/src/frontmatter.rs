use serde_yaml::{Mapping, Value as YamlValue};
use thiserror::Error;

/// Result returned after extracting front matter from a post.
#[derive(Debug)]
pub struct FrontmatterExtraction {
    /// Parsed front matter, in source order.
    pub value: Mapping,
    /// Byte offset inside the original document where the body begins.
    pub body_start: usize,
}

impl FrontmatterExtraction {
    fn empty() -> Self {
        Self {
            value: Mapping::new(),
            body_start: 0,
        }
    }
}

/// Errors emitted while parsing or extracting front matter.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    /// Unclosed YAML fence (e.g., missing terminating `---`).
    #[error("Unterminated YAML frontmatter block: expected closing '---'")]
    Unterminated,
    /// YAML failed to parse.
    #[error("Frontmatter parse error: {0}")]
    Parse(String),
    /// Top-level YAML node was not a mapping.
    #[error("Frontmatter must be a YAML mapping at the top level")]
    InvalidRootType,
}

/// Extracts YAML front matter from a post.
///
/// A document without a leading `---` fence yields an empty mapping and a
/// body starting at offset zero.
pub fn extract_frontmatter(input: &str) -> Result<FrontmatterExtraction, FrontmatterError> {
    match find_yaml_block(input)? {
        Some((block, body_start)) => {
            let value = parse_yaml_block(block)?;
            Ok(FrontmatterExtraction { value, body_start })
        }
        None => Ok(FrontmatterExtraction::empty()),
    }
}

/// Serializes a header mapping and a body back into the on-disk layout.
///
/// # Examples
///
/// ```
/// use postbook_core::frontmatter::render_frontmatter;
/// use serde_yaml::{Mapping, Value};
///
/// let mut header = Mapping::new();
/// header.insert(Value::from("title"), Value::from("Hello"));
/// let text = render_frontmatter(&header, "\nBody\n").unwrap();
/// assert_eq!(text, "---\ntitle: Hello\n---\n\nBody\n");
/// ```
pub fn render_frontmatter(header: &Mapping, body: &str) -> Result<String, FrontmatterError> {
    let yaml = if header.is_empty() {
        String::new()
    } else {
        serde_yaml::to_string(header).map_err(|err| FrontmatterError::Parse(err.to_string()))?
    };

    let mut out = String::with_capacity(yaml.len() + body.len() + 8);
    out.push_str("---\n");
    out.push_str(&yaml);
    if !yaml.is_empty() && !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("---\n");
    out.push_str(body);
    Ok(out)
}

fn parse_yaml_block(block: &str) -> Result<Mapping, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(Mapping::new());
    }

    let value: YamlValue =
        serde_yaml::from_str(block).map_err(|err| FrontmatterError::Parse(err.to_string()))?;

    match value {
        YamlValue::Null => Ok(Mapping::new()),
        YamlValue::Mapping(mapping) => Ok(mapping),
        _ => Err(FrontmatterError::InvalidRootType),
    }
}

fn find_yaml_block(input: &str) -> Result<Option<(&str, usize)>, FrontmatterError> {
    let (without_bom, bom_len) = strip_bom(input);
    let mut cursor = 0usize;

    loop {
        let Some((line, next_cursor)) = next_line(without_bom, cursor) else {
            return Ok(None);
        };

        if line.trim().is_empty() {
            cursor = next_cursor;
            continue;
        }

        if !is_yaml_fence(line) {
            return Ok(None);
        }

        let block_start = next_cursor;
        let mut scan_cursor = next_cursor;

        while let Some((block_line, next_line_cursor)) = next_line(without_bom, scan_cursor) {
            if is_yaml_fence(block_line) {
                let raw_block = &without_bom[block_start..scan_cursor];
                let trimmed = raw_block.trim_end_matches(['\r', '\n']);
                return Ok(Some((trimmed, bom_len + next_line_cursor)));
            }
            scan_cursor = next_line_cursor;
        }

        return Err(FrontmatterError::Unterminated);
    }
}

fn strip_bom(input: &str) -> (&str, usize) {
    if let Some(stripped) = input.strip_prefix('\u{feff}') {
        (stripped, '\u{feff}'.len_utf8())
    } else {
        (input, 0)
    }
}

fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }

    let rest = &input[start..];
    match rest.find('\n') {
        Some(pos) => Some((&rest[..pos], start + pos + 1)),
        None => Some((rest, input.len())),
    }
}

fn is_yaml_fence(line: &str) -> bool {
    line.trim_end_matches('\r') == "---"
}
