// src/core/html.rs
// Byte-level helpers shared by the tokenizer. ASCII case-insensitive only;
// tag and attribute names on the site are plain ASCII.

/// Position of `needle` (already lowercase ASCII) in `hay[from..]`, ignoring ASCII case.
pub fn find_ci(hay: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || from > hay.len() { return None; }
    hay[from..]
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|off| from + off)
}

/// Position of the next `ch` at or after `from`.
pub fn next_byte(hay: &[u8], from: usize, ch: u8) -> Option<usize> {
    hay.get(from..)?.iter().position(|&c| c == ch).map(|off| from + off)
}

pub fn starts_with_ci(hay: &[u8], at: usize, pat: &[u8]) -> bool {
    hay.get(at..at + pat.len()).is_some_and(|w| w.eq_ignore_ascii_case(pat))
}

/// Elements that never have children or a closing tag.
pub fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input"
            | "link" | "meta" | "param" | "source" | "track" | "wbr"
    )
}

/// Elements whose content is raw text up to the matching close tag.
pub fn is_raw_text(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// Like raw text, but character references still decode.
pub fn is_rcdata(tag: &str) -> bool {
    matches!(tag, "textarea" | "title")
}

pub fn is_heading(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}
