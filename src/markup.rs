//! Recognition of self-closing markup lines, the reorder noise this tool
//! strips from diffs.
//!
//! # Examples
//!
//! ```
//! use patch_scrub::markup::is_markup_tag_line;
//!
//! assert!(is_markup_tag_line("-  <alpha/>"));
//! assert!(is_markup_tag_line("+<beta/>"));
//! assert!(!is_markup_tag_line(" <gamma/>")); // context line, not a change
//! assert!(!is_markup_tag_line("-  <a b/>")); // whitespace inside the tag
//! ```

/// True if `content` is exactly one self-closing element: `<name/>` with
/// a non-empty name and no internal whitespace.
#[must_use]
pub fn is_self_closing_tag(content: &str) -> bool {
    let Some(inner) = content
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix("/>"))
    else {
        return false;
    };

    !inner.is_empty() && !inner.chars().any(char::is_whitespace)
}

/// True if a diff body line is a markup-tag line: a `+` or `-` marker,
/// optional whitespace, then exactly one self-closing element.
#[must_use]
pub fn is_markup_tag_line(line: &str) -> bool {
    match line.strip_prefix(['+', '-']) {
        Some(rest) => is_self_closing_tag(rest.trim_start()),
        None => false,
    }
}
