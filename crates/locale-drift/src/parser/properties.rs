use crate::error::DriftError;
use crate::parser::Entries;
use fs_err as fs;
use std::path::Path;

const COMMENT_CHAR: char = '#';
const QUOTE_CHAR: char = '"';

/// Reads and parses a delimited-text locale file.
pub fn parse_file(path: &Path, separator: &str) -> Result<Entries, DriftError> {
    let content = fs::read_to_string(path)?;
    Ok(parse_str(&content, separator))
}

/// Parses delimited-text content line by line.
///
/// Blank lines, comments and lines without `separator` are skipped, and so
/// are entries whose value ends up empty. A repeated key keeps its last value.
pub fn parse_str(content: &str, separator: &str) -> Entries {
    content
        .lines()
        .filter_map(|line| parse_line(line, separator))
        .collect()
}

/// Splits one line on the first `separator`.
///
/// The key is trimmed; the value is trimmed of whitespace and then of
/// surrounding double quotes.
pub fn parse_line(line: &str, separator: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_CHAR) || separator.is_empty() {
        return None;
    }

    let (key, value) = line.split_once(separator)?;
    let value = value.trim().trim_matches(QUOTE_CHAR);

    if value.is_empty() {
        return None;
    }

    Some((key.trim().to_string(), value.to_string()))
}
