//! `LIKE` pattern helpers.

/// Escape character used with every `LIKE` pattern built here.
pub const LIKE_ESCAPE: char = '\\';

/// ## Summary
/// Escapes SQL LIKE wildcards (`%`, `_`) and the escape character itself.
#[must_use]
pub fn escape_like_pattern(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            result.push(LIKE_ESCAPE);
        }
        result.push(c);
    }
    result
}

/// ## Summary
/// Builds a pattern matching `value` anywhere in the column.
#[must_use]
pub fn contains_pattern(value: &str) -> String {
    format!("%{}%", escape_like_pattern(value))
}
