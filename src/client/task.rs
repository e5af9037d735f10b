//! Annotation tasks and their default settings.
use std::fmt;
use std::str::FromStr;

const SENTIMENT_PROMPT: &str =
    "You are a helpful assistant that analyzes sentiment in Tamil language text";

const TRANSLATE_PROMPT: &str = "You are a helpful assistant that translates code-mixed \
Tamil-English text into English. Answer with the translation only.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Sentiment,
    Translate,
}

impl Task {
    /// System prompt used when none is provided.
    pub fn default_prompt(&self) -> &'static str {
        match self {
            Task::Sentiment => SENTIMENT_PROMPT,
            Task::Translate => TRANSLATE_PROMPT,
        }
    }

    /// Sampling temperature used when none is provided.
    /// [None] leaves it to the service.
    pub fn default_temperature(&self) -> Option<f32> {
        match self {
            Task::Sentiment => None,
            Task::Translate => Some(1.3),
        }
    }

    /// Default base name of result files.
    pub fn default_base(&self) -> &'static str {
        match self {
            Task::Sentiment => "ENTACS_sentiment",
            Task::Translate => "ENTACS_translated",
        }
    }
}

impl Default for Task {
    fn default() -> Self {
        Task::Sentiment
    }
}

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sentiment" => Ok(Task::Sentiment),
            "translate" | "translation" => Ok(Task::Translate),
            other => Err(format!(
                "unknown task {:?} (expected sentiment or translate)",
                other
            )),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Sentiment => write!(f, "sentiment"),
            Task::Translate => write!(f, "translate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Task;

    #[test]
    fn parse() {
        assert_eq!("sentiment".parse::<Task>(), Ok(Task::Sentiment));
        assert_eq!("Translation".parse::<Task>(), Ok(Task::Translate));
        assert!("summarize".parse::<Task>().is_err());
    }

    #[test]
    fn translation_is_sampled() {
        assert!(Task::Translate.default_temperature().unwrap() > 0.0);
        assert_eq!(Task::Sentiment.default_temperature(), None);
    }
}
