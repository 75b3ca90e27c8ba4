//! Whitespace collapsing shared by every stage.
//!
//! Each stage ends by collapsing runs of Unicode whitespace to one ASCII
//! space and trimming the edges, so stage outputs can be compared and
//! re-split without worrying about stray tabs or newlines.

/// Collapses whitespace runs to single spaces and trims both ends.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  áo \t thun\n nam "), "áo thun nam");
/// assert_eq!(collapse_whitespace("   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("a\r\n\u{00A0}b"), "a b");
    }
}
