//! Value cleanup applied once to every reconstructed LOC value.
//!
//! Lightroom catalogs are line oriented, so a value never carries a real
//! newline. Paragraph breaks are written as the literal text `\n\n` and
//! positional placeholders `^1`, `^2`, ... become `{1}`, `{2}`, ...

/// Literal separator placed between paragraphs of a multi-line value
pub const PARAGRAPH_SEPARATOR: &str = "\\n\\n";

/// Normalizes a raw value assembled from one or more literal fragments.
///
/// Steps, in order:
/// 1. rewrite `^N` placeholders to `{N}`
/// 2. split on `\n`, trim each line and collapse runs of spaces and tabs
/// 3. drop empty lines and rejoin the rest with [`PARAGRAPH_SEPARATOR`]
///
/// ```
/// use lrloc_core::normalize::normalize_value;
///
/// assert_eq!(normalize_value("Hello ^1!"), "Hello {1}!");
/// assert_eq!(normalize_value("Line1\n\n  Line2 "), "Line1\\n\\nLine2");
/// ```
pub fn normalize_value(raw: &str) -> String {
    let rewritten = rewrite_placeholders(raw);
    let lines: Vec<String> = rewritten
        .split('\n')
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect();

    lines.join(PARAGRAPH_SEPARATOR)
}

/// Replaces every `^` followed by one or more ASCII digits with `{digits}`.
///
/// A `^` that is not followed by a digit is kept as-is.
pub fn rewrite_placeholders(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '^' || !chars.peek().is_some_and(char::is_ascii_digit) {
            out.push(c);
            continue;
        }

        out.push('{');
        while let Some(&digit) = chars.peek() {
            if !digit.is_ascii_digit() {
                break;
            }
            out.push(digit);
            chars.next();
        }
        out.push('}');
    }

    out
}

/// Trims a single line and collapses internal runs of horizontal whitespace
/// into one space.
pub fn collapse_whitespace(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for word in line.split(is_horizontal_whitespace).filter(|w| !w.is_empty()) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn is_horizontal_whitespace(c: char) -> bool {
    c.is_whitespace() && c != '\n'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rewrite_placeholders() {
        assert_eq!(rewrite_placeholders("Hello ^1!"), "Hello {1}!");
        assert_eq!(rewrite_placeholders("^1 of ^12"), "{1} of {12}");
        assert_eq!(rewrite_placeholders("2^ power ^x"), "2^ power ^x");
        assert_eq!(rewrite_placeholders("trailing ^"), "trailing ^");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t  b  "), "a b");
        assert_eq!(collapse_whitespace("\t \r"), "");
        assert_eq!(collapse_whitespace("single"), "single");
    }

    #[test]
    fn test_single_line_kept() {
        assert_eq!(normalize_value("  Select   a photo  "), "Select a photo");
    }

    #[test]
    fn test_paragraph_join() {
        assert_eq!(normalize_value("Line1\nLine2"), "Line1\\n\\nLine2");
        assert_eq!(normalize_value("Line1\n\n\nLine2\n"), "Line1\\n\\nLine2");
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(normalize_value("First\r\nSecond"), "First\\n\\nSecond");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(normalize_value(""), "");
        assert_eq!(normalize_value(" \n \t\n"), "");
    }

    #[test]
    fn test_placeholders_across_paragraphs() {
        assert_eq!(
            normalize_value("Found ^1 species\n  in ^2 photos"),
            "Found {1} species\\n\\nin {2} photos"
        );
    }
}
