//! Collapse repeated punctuation.
use super::Transform;

/// Characters that get collapsed when repeated.
/// Periods are absent so that ellipses are preserved.
const SQUASHABLE: &str = "!?#$%&*+,-/:;<=>@^_`{|}~\"'";

/// Reduces consecutive occurrences of the *same* punctuation mark to a single one.
///
/// `"wow!!!"` becomes `"wow!"`, but `"?!"` and `"..."` are kept as is.
#[derive(Default)]
pub struct SquashPunctuation;

impl Transform for SquashPunctuation {
    fn transform(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut prev = None;
        for c in text.chars() {
            if prev == Some(c) && SQUASHABLE.contains(c) {
                continue;
            }
            out.push(c);
            prev = Some(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::SquashPunctuation;
    use crate::transformers::Transform;

    #[test]
    fn repeated() {
        let t = SquashPunctuation;
        assert_eq!(t.transform("Hii!!! great???"), "Hii! great?");
        assert_eq!(t.transform("--- ,,, '' \"\""), "- , ' \"");
    }

    #[test]
    fn mixed_kept() {
        let t = SquashPunctuation;
        assert_eq!(t.transform("what?!?!"), "what?!?!");
    }

    #[test]
    fn periods_and_brackets_kept() {
        let t = SquashPunctuation;
        assert_eq!(t.transform("hmm... ((ok))"), "hmm... ((ok))");
    }

    #[test]
    fn letters_kept() {
        let t = SquashPunctuation;
        assert_eq!(t.transform("sooo goood"), "sooo goood");
    }
}
