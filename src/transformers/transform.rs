//! Transform trait and chaining.

/// Text transformations used to normalize corpus lines.
pub trait Transform {
    /// Takes a line and returns its transformed version.
    fn transform(&self, text: &str) -> String;
}

/// Normalizer enables transform chaining, adding multiple transforms and
/// doing the normalization in one step.
///
/// Transforms are applied in insertion order.
#[derive(Default)]
pub struct Normalizer(Vec<Box<dyn Transform + Sync>>);

impl Normalizer {
    pub fn add(&mut self, transform: Box<dyn Transform + Sync>) -> &mut Normalizer {
        self.0.push(transform);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Transform for Normalizer {
    fn transform(&self, text: &str) -> String {
        self.0
            .iter()
            .fold(text.to_string(), |acc, t| t.transform(&acc))
    }
}

#[cfg(test)]
mod tests {
    use super::{Normalizer, Transform};

    struct Upper;
    impl Transform for Upper {
        fn transform(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    struct Exclaim;
    impl Transform for Exclaim {
        fn transform(&self, text: &str) -> String {
            format!("{}!", text)
        }
    }

    #[test]
    fn empty_is_identity() {
        let n = Normalizer::default();
        assert!(n.is_empty());
        assert_eq!(n.transform("vanakkam"), "vanakkam");
    }

    #[test]
    fn chain_in_order() {
        let mut n = Normalizer::default();
        n.add(Box::new(Upper)).add(Box::new(Exclaim));
        assert_eq!(n.transform("mass"), "MASS!");
    }
}
