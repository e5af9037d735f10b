/*! Emoji removal

Works on extended grapheme clusters so that skin tone modifiers, ZWJ sequences,
flags and keycaps go away together with their base.
!*/
use unicode_properties::UnicodeEmoji;
use unicode_segmentation::UnicodeSegmentation;

use super::Transform;

/// Combining enclosing keycap, as in `1️⃣`.
const KEYCAP: char = '\u{20E3}';

#[derive(Default)]
pub struct RemoveEmojis;

impl RemoveEmojis {
    /// ASCII digits, `#` and `*` carry the emoji property but are only emojis
    /// when followed by a keycap.
    fn is_emoji_cluster(grapheme: &str) -> bool {
        match grapheme.chars().next() {
            Some(first) if !first.is_ascii() && first.is_emoji_char() => true,
            Some(_) => grapheme.contains(KEYCAP),
            None => false,
        }
    }
}

impl Transform for RemoveEmojis {
    fn transform(&self, text: &str) -> String {
        text.graphemes(true)
            .filter(|g| !Self::is_emoji_cluster(g))
            .collect()
    }
}
