//! Whitespace normalization.
use super::Transform;

/// Replaces runs of whitespace (spaces, tabs, newlines, unicode spaces) by a single space
/// and trims both ends.
#[derive(Default)]
pub struct NormalizeWhitespace;

impl Transform for NormalizeWhitespace {
    fn transform(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::NormalizeWhitespace;
    use crate::transformers::Transform;

    #[test]
    fn collapse_and_trim() {
        let t = NormalizeWhitespace;
        assert_eq!(t.transform("  padam \t\n super  "), "padam super");
    }

    #[test]
    fn only_whitespace() {
        let t = NormalizeWhitespace;
        assert_eq!(t.transform(" \u{00A0}\n "), "");
    }
}
