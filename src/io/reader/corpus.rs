/*! Corpus reader

Loads a preprocessed corpus, stored as a JSON array of strings, and slices it along a [Span].
!*/
use std::{fs::File, io::BufReader, path::Path};

use log::{error, info};

use crate::error::Error;
use crate::span::{Bounds, Span};

/// A corpus line along with its absolute, 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    line_number: usize,
    text: String,
}

impl TextItem {
    pub fn new(line_number: usize, text: String) -> Self {
        Self { line_number, text }
    }

    /// Get the item's absolute line number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Get a reference to the item's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Ordered, in-memory corpus.
#[derive(Debug, Default)]
pub struct Corpus {
    lines: Vec<String>,
}

impl Corpus {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Read a JSON array of strings.
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(src)?);
        let lines: Vec<String> = serde_json::from_reader(reader)?;
        info!("loaded {} lines from {:?}", lines.len(), src);
        Ok(Self { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Clamp `span` against the corpus length.
    pub fn bounds(&self, span: &Span) -> Option<Bounds> {
        span.clamp(self.len())
    }

    /// Get the items covered by `span`, numbered with their absolute line number.
    ///
    /// Out of range spans yield an empty [Vec].
    pub fn slice(&self, span: &Span) -> Vec<TextItem> {
        match self.bounds(span) {
            Some(bounds) => {
                let offset = bounds.start();
                self.lines[bounds.indices()]
                    .iter()
                    .enumerate()
                    .map(|(idx, text)| TextItem::new(offset + idx, text.clone()))
                    .collect()
            }
            None => Vec::new(),
        }
    }
}

/// Load the items of `src` covered by `span`.
///
/// Errors are *not* returned but rather logged: a missing or invalid corpus
/// results in an empty [Vec].
pub fn load_span(src: &Path, span: &Span) -> Vec<TextItem> {
    match Corpus::from_path(src) {
        Ok(corpus) => corpus.slice(span),
        Err(e) => {
            error!("could not load corpus from {:?}: {}", src, e);
            Vec::new()
        }
    }
}
