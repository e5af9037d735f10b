//! Annotate trait
use crate::record::Outcome;

/// Annotation of a single line by an external service.
///
/// Implementors must not fail: any transport or service error is
/// reported as an [Outcome::Failure].
pub trait Annotate {
    fn annotate(&self, prompt: &str, text: &str) -> Outcome;
}

impl<A: Annotate + ?Sized> Annotate for &A {
    fn annotate(&self, prompt: &str, text: &str) -> Outcome {
        (**self).annotate(prompt, text)
    }
}

impl<A: Annotate + ?Sized> Annotate for Box<A> {
    fn annotate(&self, prompt: &str, text: &str) -> Outcome {
        (**self).annotate(prompt, text)
    }
}
