/*! Text transformers.

Normalizes corpus lines by removing or rewriting content.
Each rule is a [Transform], and rules are chained into a [Normalizer].

!*/

mod emoji;
mod punctuation;
mod transform;
mod whitespace;

pub use emoji::RemoveEmojis;
pub use punctuation::SquashPunctuation;
pub use transform::{Normalizer, Transform};
pub use whitespace::NormalizeWhitespace;

/// Enabled normalization rules. Everything is enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub remove_emojis: bool,
    pub squash_punctuation: bool,
    pub normalize_whitespace: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            remove_emojis: true,
            squash_punctuation: true,
            normalize_whitespace: true,
        }
    }
}

impl From<Rules> for Normalizer {
    /// Build a normalizer applying, in order, emoji removal, punctuation squashing
    /// and whitespace normalization.
    fn from(rules: Rules) -> Self {
        let mut normalizer = Normalizer::default();
        if rules.remove_emojis {
            normalizer.add(Box::<RemoveEmojis>::default());
        }
        if rules.squash_punctuation {
            normalizer.add(Box::<SquashPunctuation>::default());
        }
        if rules.normalize_whitespace {
            normalizer.add(Box::<NormalizeWhitespace>::default());
        }
        normalizer
    }
}
